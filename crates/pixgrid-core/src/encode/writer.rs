//! PNG, JPEG and BMP encoding for export.
//!
//! Encoding goes through the `image` crate's encoders into an in-memory
//! buffer first, so a failed encode never leaves a partial file behind.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use thiserror::Error;
use tracing::info;

use super::ExportFormat;

/// Errors that can occur while encoding or writing an export.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Destination extension does not name a supported output format
    #[error("Unsupported export format: '{extension}' (expected png, jpg, jpeg or bmp)")]
    UnsupportedFormat { extension: String },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The encoder rejected the image
    #[error("{format:?} encoding failed: {message}")]
    EncodingFailed {
        format: ExportFormat,
        message: String,
    },

    /// The encoded bytes could not be written to disk
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Encode an RGB image to bytes in the given format.
///
/// # Arguments
///
/// * `image` - RGB image to encode
/// * `format` - Output format
/// * `quality` - JPEG quality (1-100); ignored for PNG and BMP
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` for an empty image and
/// `EncodeError::EncodingFailed` if the encoder fails.
pub fn encode_image(
    image: &RgbImage,
    format: ExportFormat,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let mut buffer = Cursor::new(Vec::new());
    let pixels = image.as_raw();

    let result = match format {
        ExportFormat::Png => {
            PngEncoder::new(&mut buffer).write_image(pixels, width, height, ExtendedColorType::Rgb8)
        }
        ExportFormat::Jpeg => {
            // Clamp quality to valid range (1-100)
            let quality = quality.clamp(1, 100);
            JpegEncoder::new_with_quality(&mut buffer, quality).write_image(
                pixels,
                width,
                height,
                ExtendedColorType::Rgb8,
            )
        }
        ExportFormat::Bmp => {
            BmpEncoder::new(&mut buffer).write_image(pixels, width, height, ExtendedColorType::Rgb8)
        }
    };

    result.map_err(|e| EncodeError::EncodingFailed {
        format,
        message: e.to_string(),
    })?;

    Ok(buffer.into_inner())
}

/// Encode an image and write it to `path`, choosing the format from the extension.
///
/// Returns the format that was written.
///
/// # Errors
///
/// Returns `EncodeError::UnsupportedFormat` for an unknown extension,
/// `EncodeError::Write` if the file cannot be written, and any error from
/// [`encode_image`].
pub fn write_image(image: &RgbImage, path: &Path, quality: u8) -> Result<ExportFormat, EncodeError> {
    let format = ExportFormat::from_path(path)?;
    let bytes = encode_image(image, format, quality)?;

    std::fs::write(path, &bytes).map_err(|source| EncodeError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        path = %path.display(),
        ?format,
        bytes = bytes.len(),
        width = image.width(),
        height = image.height(),
        "Exported image"
    );
    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn gray(width: u32, height: u32) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb([128, 128, 128]))
    }

    #[test]
    fn test_encode_png_signature() {
        let png = encode_image(&gray(10, 10), ExportFormat::Png, 90).unwrap();
        assert_eq!(&png[0..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_encode_jpeg_markers() {
        let jpeg = encode_image(&gray(100, 100), ExportFormat::Jpeg, 90).unwrap();

        // Check JPEG magic bytes (SOI marker)
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);

        // Check JPEG ends with EOI marker
        let len = jpeg.len();
        assert_eq!(&jpeg[len - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_jpeg_quality_clamping() {
        // Quality 0 should be clamped to 1
        assert!(encode_image(&gray(10, 10), ExportFormat::Jpeg, 0).is_ok());

        // Quality 255 should be clamped to 100
        assert!(encode_image(&gray(10, 10), ExportFormat::Jpeg, 255).is_ok());
    }

    #[test]
    fn test_encode_bmp_signature() {
        let bmp = encode_image(&gray(3, 2), ExportFormat::Bmp, 90).unwrap();
        assert_eq!(&bmp[0..2], b"BM");
    }

    #[test]
    fn test_encode_empty_image() {
        let empty = RgbImage::new(0, 10);
        let result = encode_image(&empty, ExportFormat::Png, 90);
        assert!(matches!(
            result,
            Err(EncodeError::InvalidDimensions {
                width: 0,
                height: 10
            })
        ));
    }

    #[test]
    fn test_write_image_to_disk() {
        let path = std::env::temp_dir().join(format!("pixgrid-writer-{}.png", std::process::id()));
        let format = write_image(&gray(4, 4), &path, 90).unwrap();
        assert_eq!(format, ExportFormat::Png);

        let written = std::fs::read(&path).unwrap();
        assert_eq!(&written[1..4], b"PNG");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_image_unsupported_extension() {
        let path = std::env::temp_dir().join("pixgrid-writer-unsupported.tga");
        let result = write_image(&gray(4, 4), &path, 90);
        assert!(matches!(result, Err(EncodeError::UnsupportedFormat { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn test_write_image_missing_directory() {
        let path = std::env::temp_dir()
            .join("pixgrid-no-such-dir")
            .join("nested")
            .join("out.png");
        let result = write_image(&gray(4, 4), &path, 90);
        assert!(matches!(result, Err(EncodeError::Write { .. })));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
