//! Pixel-grid overlay.
//!
//! The image is upscaled by an integer factor and a 1-pixel line is drawn on
//! every original pixel boundary, i.e. at every multiple of the scale factor
//! along both axes. The right and bottom edges get no closing line.

use image::{Rgb, RgbImage};

use super::resize::scale_nearest;

/// Default grid line colour.
pub const GRID_BLUE: Rgb<u8> = Rgb([0, 0, 255]);

/// Upscale `image` by `scale` and draw grid lines in `color`.
pub fn apply_grid_overlay(image: &RgbImage, scale: u32, color: Rgb<u8>) -> RgbImage {
    let scale = scale.max(1);
    let mut output = scale_nearest(image, scale);
    let (width, height) = output.dimensions();

    for x in (0..width).step_by(scale as usize) {
        for y in 0..height {
            output.put_pixel(x, y, color);
        }
    }
    for y in (0..height).step_by(scale as usize) {
        for x in 0..width {
            output.put_pixel(x, y, color);
        }
    }

    output
}
