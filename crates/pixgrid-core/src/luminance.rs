//! Grayscale conversion using ITU-R BT.601 coefficients.
//!
//! Every quantizer starts from the same single-channel image, so the luma
//! formula lives here rather than in each quantizer.

use image::{GrayImage, Luma, Rgb, RgbImage};

/// BT.601 red weight in 16.16 fixed point (0.299).
const LUMA_R: u32 = 19595;

/// BT.601 green weight in 16.16 fixed point (0.587).
const LUMA_G: u32 = 38470;

/// BT.601 blue weight in 16.16 fixed point (0.114).
const LUMA_B: u32 = 7471;

/// Calculate 8-bit luma from u8 RGB values.
///
/// Weights sum to exactly 65536, so any neutral gray maps to itself.
#[inline]
pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    let sum = LUMA_R * r as u32 + LUMA_G * g as u32 + LUMA_B * b as u32;
    ((sum + 0x8000) >> 16) as u8
}

/// Convert an RGB image to single-channel grayscale.
pub fn to_grayscale(image: &RgbImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let Rgb([r, g, b]) = *image.get_pixel(x, y);
        Luma([luma_u8(r, g, b)])
    })
}

/// Expand a grayscale image back to three identical channels.
pub fn gray_to_rgb(image: &GrayImage) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let Luma([v]) = *image.get_pixel(x, y);
        Rgb([v, v, v])
    })
}
