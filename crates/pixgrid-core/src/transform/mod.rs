//! Geometric transforms: rotation, pixelation and the grid overlay.
//!
//! Every function here takes its input by reference and returns a freshly
//! allocated image; nothing is modified in place.
//!
//! # Pipeline Order
//!
//! 1. Rotation (any number of quarter turns, on the loaded image)
//! 2. Pixelation onto the fixed canvas (produces the base image)
//! 3. Quantization (see [`crate::quantize`])
//! 4. Grid overlay (last, because it upscales)

mod grid;
mod pixelate;
mod resize;
mod rotation;

pub use grid::{apply_grid_overlay, GRID_BLUE};
pub use pixelate::{pixelate, CanvasSize, PixelateMode, LETTERBOX_FILL};
pub use resize::{resize_nearest, scale_nearest};
pub use rotation::rotate_clockwise;
