//! Image decoding for pixgrid.
//!
//! This module provides functionality for:
//! - Detecting the input format from file content
//! - Decoding PNG, JPEG, BMP, GIF and WEBP into RGB8 buffers
//! - Reading image files from disk
//!
//! All operations are synchronous. Decoded images are always `image::RgbImage`;
//! alpha is discarded because every later stage works on three channels.

mod load;
mod types;

pub use load::{decode_image, load_image};
pub use types::{DecodeError, InputFormat};
