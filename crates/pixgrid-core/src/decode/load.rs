//! Image loading from bytes or from a file on disk.

use std::io::Cursor;
use std::path::Path;

use image::{ImageReader, RgbImage};
use tracing::debug;

use super::{DecodeError, InputFormat};

/// Decode an image from bytes into an RGB buffer.
///
/// The format is detected from the content, not from any file name. Alpha
/// channels are discarded and other colour types are converted to RGB8.
///
/// # Errors
///
/// Returns `DecodeError::UnsupportedFormat` if the bytes do not look like
/// PNG, JPEG, BMP, GIF or WEBP.
/// Returns `DecodeError::CorruptedFile` if the decoder fails part way.
/// Returns `DecodeError::EmptyImage` if the decoded image has no pixels.
pub fn decode_image(bytes: &[u8]) -> Result<RgbImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let format = reader
        .format()
        .and_then(InputFormat::from_image_format)
        .ok_or(DecodeError::UnsupportedFormat)?;

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let rgb = img.into_rgb8();
    if rgb.width() == 0 || rgb.height() == 0 {
        return Err(DecodeError::EmptyImage);
    }

    debug!(?format, width = rgb.width(), height = rgb.height(), "Decoded image");
    Ok(rgb)
}

/// Read and decode an image file.
///
/// # Errors
///
/// Returns `DecodeError::Io` if the file cannot be read, otherwise the same
/// errors as [`decode_image`].
pub fn load_image(path: &Path) -> Result<RgbImage, DecodeError> {
    let bytes =
        std::fs::read(path).map_err(|e| DecodeError::Io(format!("{}: {}", path.display(), e)))?;
    decode_image(&bytes)
}
