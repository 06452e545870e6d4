//! Core types for image decoding.

use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file could not be read from disk.
    #[error("I/O error: {0}")]
    Io(String),

    /// The content is not one of the accepted raster formats.
    #[error("Invalid or unsupported image format")]
    UnsupportedFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The image decoded to zero width or height.
    #[error("Decoded image has no pixels")]
    EmptyImage,
}

/// Raster formats accepted by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Png,
    Jpeg,
    Bmp,
    Gif,
    WebP,
}

impl InputFormat {
    /// Every accepted input format, in display order.
    pub const ALL: [InputFormat; 5] = [
        InputFormat::Png,
        InputFormat::Jpeg,
        InputFormat::Bmp,
        InputFormat::Gif,
        InputFormat::WebP,
    ];

    /// Map a format detected by the image crate onto an accepted input format.
    ///
    /// Returns `None` for formats the image crate knows but the loader rejects
    /// (TIFF, ICO, ...).
    pub fn from_image_format(format: image::ImageFormat) -> Option<Self> {
        match format {
            image::ImageFormat::Png => Some(InputFormat::Png),
            image::ImageFormat::Jpeg => Some(InputFormat::Jpeg),
            image::ImageFormat::Bmp => Some(InputFormat::Bmp),
            image::ImageFormat::Gif => Some(InputFormat::Gif),
            image::ImageFormat::WebP => Some(InputFormat::WebP),
            _ => None,
        }
    }

    /// File extensions conventionally used for this format.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            InputFormat::Png => &["png"],
            InputFormat::Jpeg => &["jpg", "jpeg"],
            InputFormat::Bmp => &["bmp"],
            InputFormat::Gif => &["gif"],
            InputFormat::WebP => &["webp"],
        }
    }
}
