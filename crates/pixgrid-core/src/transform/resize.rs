//! Nearest-neighbor resizing helpers.
//!
//! Pixel art must never blend neighbouring pixels, so every resize in the
//! pipeline samples with `FilterType::Nearest`.

use image::imageops::{self, FilterType};
use image::RgbImage;

/// Resize an image to exact dimensions with nearest-neighbor sampling.
///
/// Returns a clone when the dimensions already match. Zero target dimensions
/// are raised to 1.
pub fn resize_nearest(image: &RgbImage, width: u32, height: u32) -> RgbImage {
    let (width, height) = (width.max(1), height.max(1));

    // Fast path: if dimensions match, just clone
    if image.dimensions() == (width, height) {
        return image.clone();
    }

    imageops::resize(image, width, height, FilterType::Nearest)
}

/// Upscale an image by an integer factor, replicating each pixel into a
/// `factor x factor` block.
pub fn scale_nearest(image: &RgbImage, factor: u32) -> RgbImage {
    let factor = factor.max(1);
    if factor == 1 {
        return image.clone();
    }

    RgbImage::from_fn(image.width() * factor, image.height() * factor, |x, y| {
        *image.get_pixel(x / factor, y / factor)
    })
}

/// Calculate dimensions that preserve aspect ratio at a fixed target height.
///
/// Width is rounded to the nearest pixel and never drops below 1.
pub(crate) fn fit_to_height(width: u32, height: u32, target_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let ratio = width as f64 / height as f64;
    let new_width = (target_height as f64 * ratio).round() as u32;
    (new_width.max(1), target_height)
}
