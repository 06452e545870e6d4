//! Pixelation onto a fixed low-resolution canvas.
//!
//! # Modes
//!
//! - **Stretch**: resize straight to the canvas, ignoring aspect ratio.
//! - **Letterbox**: resize to the canvas height keeping aspect ratio, then
//!   centre horizontally on a white canvas.
//!
//! When letterboxed content is wider than the canvas, the paste offset goes
//! negative and the content is centre-cropped: the canvas shows the middle
//! columns and an equal share is dropped from each side (within one pixel).

use image::imageops;
use image::{Rgb, RgbImage};

use super::resize::{fit_to_height, resize_nearest};

/// Background colour for letterbox padding.
pub const LETTERBOX_FILL: Rgb<u8> = Rgb([255, 255, 255]);

/// Fixed canvas dimensions for pixelated output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// How pixelation treats the source aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelateMode {
    /// Resize directly to the canvas.
    #[default]
    Stretch,
    /// Keep aspect ratio at the canvas height and pad/crop horizontally.
    Letterbox,
}

impl PixelateMode {
    /// Select the mode from the session's "maintain aspect ratio" flag.
    pub fn from_maintain_aspect(maintain_aspect_ratio: bool) -> Self {
        if maintain_aspect_ratio {
            PixelateMode::Letterbox
        } else {
            PixelateMode::Stretch
        }
    }
}

/// Pixelate an image onto a canvas of exactly `canvas` dimensions.
pub fn pixelate(image: &RgbImage, canvas: CanvasSize, mode: PixelateMode) -> RgbImage {
    match mode {
        PixelateMode::Stretch => resize_nearest(image, canvas.width, canvas.height),
        PixelateMode::Letterbox => letterbox(image, canvas),
    }
}

fn letterbox(image: &RgbImage, canvas: CanvasSize) -> RgbImage {
    let (content_w, content_h) = fit_to_height(image.width(), image.height(), canvas.height);
    let content = resize_nearest(image, content_w, content_h);

    let mut output = RgbImage::from_pixel(canvas.width, canvas.height, LETTERBOX_FILL);

    // Negative when the content is wider than the canvas; replace clips.
    let offset_x = (canvas.width as i64 - content.width() as i64) / 2;
    imageops::replace(&mut output, &content, offset_x, 0);

    output
}


// ============================================================================
// Property-Based Tests
// ============================================================================
