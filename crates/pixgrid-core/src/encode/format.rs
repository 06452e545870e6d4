//! Export format selection.

use std::path::Path;

use super::EncodeError;

/// Formats the exporter can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Jpeg,
    Bmp,
}

impl ExportFormat {
    /// Pick a format from a file extension (case-insensitive, no leading dot).
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "png" => Some(ExportFormat::Png),
            "jpg" | "jpeg" => Some(ExportFormat::Jpeg),
            "bmp" => Some(ExportFormat::Bmp),
            _ => None,
        }
    }

    /// Pick a format from the extension of a destination path.
    ///
    /// # Errors
    ///
    /// Returns `EncodeError::UnsupportedFormat` when the path has no extension
    /// or the extension is not one of `png`, `jpg`, `jpeg`, `bmp`.
    pub fn from_path(path: &Path) -> Result<Self, EncodeError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();

        Self::from_extension(extension).ok_or_else(|| EncodeError::UnsupportedFormat {
            extension: extension.to_string(),
        })
    }

    /// Canonical file extension.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Bmp => "bmp",
        }
    }

    /// MIME type, for callers that hand the bytes to a browser.
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
            ExportFormat::Bmp => "image/bmp",
        }
    }
}
