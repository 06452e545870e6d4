//! Session WASM bindings.
//!
//! [`JsSession`] wraps a core [`Session`] so the browser UI can drive the
//! whole pipeline. Rejected operations surface as JS `Error`s and are also
//! logged to the console as warnings; the session is unchanged after them.
//!
//! # Example
//!
//! ```typescript
//! const session = new JsSession();
//! session.load(new Uint8Array(await file.arrayBuffer()));
//! session.set_maintain_aspect_ratio(true);
//! session.pixelate();
//! session.quantize_palette_sort();
//! session.apply_grid_overlay();
//!
//! const png = session.export("png");
//! for (const row of session.history()) {
//!   console.log(row.index, row.label);
//! }
//! ```

use std::fmt::Display;

use pixgrid_core::{ExportFormat, PipelineConfig, Session};
use wasm_bindgen::prelude::*;

use crate::types::{HistoryRow, JsImage};

fn to_js_error(err: impl Display) -> JsValue {
    let message = err.to_string();
    web_sys::console::warn_1(&JsValue::from_str(&message));
    js_sys::Error::new(&message).into()
}

/// A pixel-art editing session for JavaScript.
#[wasm_bindgen]
pub struct JsSession {
    inner: Session,
}

impl Default for JsSession {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl JsSession {
    /// Create a session with the default 192x63 canvas.
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsSession {
        JsSession {
            inner: Session::default(),
        }
    }

    /// Create a session from a YAML configuration document.
    pub fn with_config(yaml: &str) -> Result<JsSession, JsValue> {
        let config = PipelineConfig::from_yaml_str(yaml).map_err(to_js_error)?;
        Ok(JsSession {
            inner: Session::new(config),
        })
    }

    /// Decode and load encoded image bytes (PNG, JPEG, BMP, GIF or WEBP).
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.inner.load_bytes(bytes).map_err(to_js_error)
    }

    /// Load raw RGB pixels, e.g. from a canvas capture.
    pub fn load_pixels(&mut self, image: &JsImage) -> Result<(), JsValue> {
        let rgb = image
            .to_rgb()
            .ok_or_else(|| to_js_error("pixel buffer does not match image dimensions"))?;
        self.inner.load_image(rgb).map_err(to_js_error)
    }

    pub fn rotate(&mut self) -> Result<(), JsValue> {
        self.inner.rotate().map_err(to_js_error)
    }

    pub fn pixelate(&mut self) -> Result<(), JsValue> {
        self.inner.pixelate().map_err(to_js_error)
    }

    pub fn quantize_palette_sort(&mut self) -> Result<(), JsValue> {
        self.inner.quantize_palette_sort().map_err(to_js_error)
    }

    pub fn quantize_fixed_threshold(&mut self) -> Result<(), JsValue> {
        self.inner.quantize_fixed_threshold().map_err(to_js_error)
    }

    pub fn binarize(&mut self) -> Result<(), JsValue> {
        self.inner.binarize().map_err(to_js_error)
    }

    /// Toggle red-green mode. Returns whether it is now active.
    pub fn toggle_recolor(&mut self) -> Result<bool, JsValue> {
        self.inner.toggle_recolor().map_err(to_js_error)
    }

    pub fn apply_grid_overlay(&mut self) -> Result<(), JsValue> {
        self.inner.apply_grid_overlay().map_err(to_js_error)
    }

    pub fn set_maintain_aspect_ratio(&mut self, maintain: bool) {
        self.inner.set_maintain_aspect_ratio(maintain);
    }

    #[wasm_bindgen(getter)]
    pub fn maintain_aspect_ratio(&self) -> bool {
        self.inner.state().maintain_aspect_ratio()
    }

    #[wasm_bindgen(getter)]
    pub fn recolor_active(&self) -> bool {
        self.inner.state().recolor_active()
    }

    #[wasm_bindgen(getter)]
    pub fn has_grid_overlay(&self) -> bool {
        self.inner.state().has_grid_overlay()
    }

    /// Whether a 4-level quantization is in place, i.e. recolor is available.
    #[wasm_bindgen(getter)]
    pub fn can_recolor(&self) -> bool {
        self.inner.state().last_quantize().is_some()
    }

    /// Copy of the image to display, or `undefined` before anything is loaded.
    pub fn current_image(&self) -> Option<JsImage> {
        self.inner.current_image().map(JsImage::from_rgb)
    }

    /// Encode the current image. `format` is `"png"`, `"jpg"`/`"jpeg"` or `"bmp"`.
    pub fn export(&self, format: &str) -> Result<Vec<u8>, JsValue> {
        let format = ExportFormat::from_extension(format)
            .ok_or_else(|| to_js_error(format!("unsupported export format: {}", format)))?;
        self.inner.export_bytes(format).map_err(to_js_error)
    }

    /// MIME type matching an export format name, for building a `Blob`.
    pub fn mime_type(format: &str) -> Option<String> {
        ExportFormat::from_extension(format).map(|f| f.mime_type().to_string())
    }

    /// History rows as `{ index, operation, label }` objects, oldest first.
    pub fn history(&self) -> Result<JsValue, JsValue> {
        let rows: Vec<HistoryRow> = self
            .inner
            .history()
            .iter()
            .enumerate()
            .map(|(i, entry)| HistoryRow::new(i, entry))
            .collect();
        serde_wasm_bindgen::to_value(&rows).map_err(to_js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn history_len(&self) -> usize {
        self.inner.history().len()
    }

    pub fn set_history_recording(&mut self, recording: bool) {
        self.inner.set_history_recording(recording);
    }

    /// Restore history entry `index`, discarding every later entry.
    pub fn jump_to(&mut self, index: usize) -> Result<(), JsValue> {
        self.inner.jump_to(index).map(|_| ()).map_err(to_js_error)
    }

    pub fn undo(&mut self) -> Result<(), JsValue> {
        self.inner.undo().map(|_| ()).map_err(to_js_error)
    }
}
