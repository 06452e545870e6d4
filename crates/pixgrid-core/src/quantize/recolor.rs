//! Red-green recolor of the two mid-tone palette entries.

use image::RgbImage;

use super::{LIGHT_GREEN, MID_GRAY_A, MID_GRAY_B, RED};

/// Replace gray B with light green and gray A with red.
///
/// Every other colour, black and white included, is left untouched.
pub fn apply_recolor(image: &RgbImage) -> RgbImage {
    let mut output = image.clone();
    for pixel in output.pixels_mut() {
        if *pixel == MID_GRAY_B {
            *pixel = LIGHT_GREEN;
        } else if *pixel == MID_GRAY_A {
            *pixel = RED;
        }
    }
    output
}
