//! WASM-compatible wrapper types.
//!
//! These types copy data across the JS boundary; nothing here holds a
//! reference into session state.

use image::RgbImage;
use pixgrid_core::{HistoryEntry, Operation, SessionState};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// An RGB image handed to or from JavaScript.
///
/// Pixels are 3 bytes per pixel, row-major. `pixels()` returns a copy, so
/// call it once per frame rather than per access.
#[wasm_bindgen]
pub struct JsImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsImage {
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsImage {
        JsImage {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory. Optional; the finalizer also releases it.
    pub fn free(self) {}
}

impl JsImage {
    pub(crate) fn from_rgb(image: &RgbImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            pixels: image.as_raw().clone(),
        }
    }

    /// `None` unless the buffer holds exactly `width * height * 3` bytes.
    pub(crate) fn to_rgb(&self) -> Option<RgbImage> {
        let expected = (self.width as usize)
            .checked_mul(self.height as usize)?
            .checked_mul(3)?;
        if self.pixels.len() != expected {
            return None;
        }
        RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }
}

/// One row of the history list, as serialized to JavaScript.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct HistoryRow {
    pub index: usize,
    pub operation: Operation,
    pub label: &'static str,
}

impl HistoryRow {
    pub(crate) fn new(index: usize, entry: &HistoryEntry<SessionState>) -> Self {
        Self {
            index,
            operation: entry.operation,
            label: entry.operation.label(),
        }
    }
}
