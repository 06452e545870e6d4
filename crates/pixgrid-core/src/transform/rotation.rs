//! Quarter-turn rotation.
//!
//! Rotation is lossless: the canvas expands to the rotated bounds (width and
//! height swap), so no pixel is cropped or resampled.

use image::imageops;
use image::RgbImage;

/// Rotate an image 90 degrees clockwise.
pub fn rotate_clockwise(image: &RgbImage) -> RgbImage {
    imageops::rotate90(image)
}
