//! Fixed-threshold 4-level quantization.
//!
//! Gray levels are banded by integer division into `[0,64)`, `[64,128)`,
//! `[128,192)` and `[192,256)`, giving band values 0, 85, 170 and 255 which
//! map onto [`OUTPUT_PALETTE`] in order. No palette-dependent sorting is
//! involved, so the output is a pure function of the base image.

use image::RgbImage;

use super::OUTPUT_PALETTE;
use crate::luminance::luma_u8;

/// Width of each gray band.
const BAND_WIDTH: u8 = 64;

/// Band value for a gray level: 0, 85, 170 or 255.
#[inline]
pub fn band_level(gray: u8) -> u8 {
    (gray / BAND_WIDTH) * 85
}

/// Quantize a base image with the fixed-threshold method.
pub fn quantize_fixed_threshold(base: &RgbImage) -> RgbImage {
    RgbImage::from_fn(base.width(), base.height(), |x, y| {
        let [r, g, b] = base.get_pixel(x, y).0;
        let band = band_level(luma_u8(r, g, b)) / 85;
        OUTPUT_PALETTE[band as usize]
    })
}


// ============================================================================
// Property-Based Tests
// ============================================================================
