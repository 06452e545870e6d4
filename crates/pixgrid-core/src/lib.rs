//! Pixgrid Core - Pixel-art preparation pipeline
//!
//! This crate turns an arbitrary photo into a small, 4-level (or 2-level)
//! pixel-art image on a fixed canvas, with an optional upscaled grid overlay
//! for hand copying. It provides decoding, the transform and quantize
//! stages, a bounded undo history and export.
//!
//! Most callers drive it through [`Session`]:
//!
//! ```ignore
//! let mut session = Session::default();
//! session.load_path(Path::new("photo.jpg"))?;
//! session.pixelate()?;
//! session.quantize_palette_sort()?;
//! session.apply_grid_overlay()?;
//! session.export(Path::new("pattern.png"))?;
//! ```

pub mod config;
pub mod decode;
pub mod encode;
pub mod history;
pub mod luminance;
pub mod quantize;
pub mod session;
pub mod transform;

pub use config::{ConfigError, PipelineConfig};
pub use decode::{decode_image, load_image, DecodeError, InputFormat};
pub use encode::{encode_image, write_image, EncodeError, ExportFormat};
pub use history::{History, HistoryEntry};
pub use quantize::QuantizeMethod;
pub use session::{Operation, PipelineError, Precondition, Session, SessionState};
pub use transform::{CanvasSize, PixelateMode};
