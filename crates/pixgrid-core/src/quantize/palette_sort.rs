//! Palette-sort quantization.
//!
//! Steps: grayscale, stretch contrast to the full 0-255 range, median-cut to
//! four levels, expand to RGB, then remap each distinct colour by its
//! brightness rank onto [`OUTPUT_PALETTE`].
//!
//! Rank is the sum of the three channels. When fewer than four distinct
//! colours survive, only the lowest ranks are used (three colours map to
//! black and the two grays, with no white).

use std::collections::{BTreeSet, HashMap};

use image::{GrayImage, Luma, Rgb, RgbImage};

use super::median_cut::median_cut;
use super::{OUTPUT_PALETTE, PALETTE_SIZE};
use crate::luminance::{gray_to_rgb, to_grayscale};

/// Quantize a base image with the palette-sort method.
pub fn quantize_palette_sort(base: &RgbImage) -> RgbImage {
    let gray = to_grayscale(base);
    let stretched = stretch_contrast(&gray);
    let reduced = median_cut(&stretched, PALETTE_SIZE);
    remap_by_rank(&gray_to_rgb(&reduced))
}

/// Linearly map the darkest level to 0 and the lightest to 255.
///
/// A flat image (single level) is returned unchanged.
pub fn stretch_contrast(image: &GrayImage) -> GrayImage {
    let lo = image.pixels().map(|p| p.0[0]).min().unwrap_or(0);
    let hi = image.pixels().map(|p| p.0[0]).max().unwrap_or(0);
    if hi <= lo {
        return image.clone();
    }

    let range = (hi - lo) as u32;
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let v = image.get_pixel(x, y).0[0];
        Luma([((v - lo) as u32 * 255 / range) as u8])
    })
}

/// Remap distinct colours onto [`OUTPUT_PALETTE`] by ascending channel sum.
///
/// Colours beyond the fourth rank are left as they are.
pub fn remap_by_rank(image: &RgbImage) -> RgbImage {
    let mut ranked: Vec<[u8; 3]> = image
        .pixels()
        .map(|p| p.0)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    ranked.sort_by_key(|c| c.iter().map(|&v| v as u32).sum::<u32>());

    let mapping: HashMap<[u8; 3], Rgb<u8>> = ranked
        .into_iter()
        .zip(OUTPUT_PALETTE)
        .collect();

    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let pixel = *image.get_pixel(x, y);
        mapping.get(&pixel.0).copied().unwrap_or(pixel)
    })
}


// ============================================================================
// Property-Based Tests
// ============================================================================
