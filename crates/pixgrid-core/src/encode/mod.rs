//! Image encoding for pixgrid export.
//!
//! This module provides functionality for:
//! - Choosing an output format from a destination path
//! - Encoding RGB images to PNG, JPEG (configurable quality) or BMP
//! - Writing the encoded bytes to disk
//!
//! The export-time resize rule lives in the session, not here: this module
//! writes exactly the pixels it is given.

mod format;
mod writer;

pub use format::ExportFormat;
pub use writer::{encode_image, write_image, EncodeError};
