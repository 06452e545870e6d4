//! Pixgrid WASM - WebAssembly bindings for pixgrid
//!
//! This crate exposes the pixgrid-core session to JavaScript/TypeScript so a
//! browser UI can run the pixelate, quantize and grid pipeline locally.
//!
//! # Module Structure
//!
//! - `session` - `JsSession`, the stateful editing session with undo history
//! - `types` - WASM-compatible wrapper types for image data and history rows
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsSession } from '@pixgrid/wasm';
//!
//! await init();
//!
//! const session = new JsSession();
//! session.load(new Uint8Array(await file.arrayBuffer()));
//! session.pixelate();
//! const preview = session.current_image();
//! console.log(`Canvas ${preview.width}x${preview.height}`);
//! ```

use wasm_bindgen::prelude::*;

mod session;
mod types;

pub use session::JsSession;
pub use types::JsImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// File extensions `JsSession::load` accepts, for a file picker's `accept`.
#[wasm_bindgen]
pub fn supported_input_extensions() -> Vec<String> {
    pixgrid_core::InputFormat::ALL
        .iter()
        .flat_map(|format| format.extensions())
        .map(|ext| ext.to_string())
        .collect()
}
