//! Two-level binarization by adaptive Gaussian thresholding.
//!
//! # Algorithm
//!
//! For every pixel, the local mean is the Gaussian-weighted average of the
//! `block_size x block_size` neighbourhood (separable kernel, replicated
//! borders, rounded to 8 bits). A pixel becomes white when
//! `src > mean - offset` and black otherwise.
//!
//! The kernel sigma follows the usual rule for an automatic sigma:
//! ```text
//! sigma = 0.3 * ((block_size - 1) * 0.5 - 1) + 0.8
//! ```
//! which is 2.0 for the default block size of 11.
//!
//! Flat regions come out white, since every pixel equals its local mean.

use image::{GrayImage, Luma, RgbImage};

use super::{BLACK, WHITE};
use crate::luminance::to_grayscale;

/// Binarize a base image with a Gaussian-weighted adaptive threshold.
///
/// `block_size` is forced odd (an even size is rounded up).
pub fn binarize(base: &RgbImage, block_size: u32, offset: i32) -> RgbImage {
    let gray = to_grayscale(base);
    let kernel = gaussian_kernel(block_size);
    let mean = gaussian_mean(&gray, &kernel);

    RgbImage::from_fn(base.width(), base.height(), |x, y| {
        let src = gray.get_pixel(x, y).0[0] as i32;
        let threshold = mean.get_pixel(x, y).0[0] as i32 - offset;
        if src > threshold {
            WHITE
        } else {
            BLACK
        }
    })
}

/// Normalized 1-D Gaussian kernel of odd length.
fn gaussian_kernel(block_size: u32) -> Vec<f64> {
    let size = block_size.max(1) | 1;
    let sigma = 0.3 * ((size as f64 - 1.0) * 0.5 - 1.0) + 0.8;
    let center = (size / 2) as f64;

    let weights: Vec<f64> = (0..size)
        .map(|i| {
            let d = i as f64 - center;
            (-(d * d) / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f64 = weights.iter().sum();

    weights.into_iter().map(|w| w / sum).collect()
}

#[inline]
fn clamp_coord(v: i64, len: u32) -> u32 {
    v.clamp(0, len as i64 - 1) as u32
}

/// Separable Gaussian blur with replicated borders.
fn gaussian_mean(gray: &GrayImage, kernel: &[f64]) -> GrayImage {
    let (width, height) = gray.dimensions();
    let radius = (kernel.len() / 2) as i64;

    let mut horizontal = vec![0f64; width as usize * height as usize];
    for y in 0..height {
        for x in 0..width {
            let acc: f64 = kernel
                .iter()
                .enumerate()
                .map(|(k, weight)| {
                    let sx = clamp_coord(x as i64 + k as i64 - radius, width);
                    weight * gray.get_pixel(sx, y).0[0] as f64
                })
                .sum();
            horizontal[(y * width + x) as usize] = acc;
        }
    }

    GrayImage::from_fn(width, height, |x, y| {
        let acc: f64 = kernel
            .iter()
            .enumerate()
            .map(|(k, weight)| {
                let sy = clamp_coord(y as i64 + k as i64 - radius, height);
                weight * horizontal[(sy * width + x) as usize]
            })
            .sum();
        Luma([acc.round().clamp(0.0, 255.0) as u8])
    })
}
