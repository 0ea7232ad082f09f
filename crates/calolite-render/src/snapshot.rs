//! Saving rendered frames as image files.

use std::path::Path;

use image::RgbaImage;

/// Error type for snapshot operations.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Failed to save image: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),
}

/// Saves a frame to an image file.
///
/// The format is chosen from the extension: `.png`, `.jpg` or `.jpeg`.
/// JPEG output drops the alpha channel.
pub fn save_image(path: impl AsRef<Path>, image: &RgbaImage) -> Result<(), SnapshotError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "png" => {
            image.save_with_format(path, image::ImageFormat::Png)?;
        }
        "jpg" | "jpeg" => {
            let rgb = image::DynamicImage::ImageRgba8(image.clone()).to_rgb8();
            rgb.save_with_format(path, image::ImageFormat::Jpeg)?;
        }
        _ => {
            return Err(SnapshotError::UnsupportedFormat(extension));
        }
    }

    log::info!("saved frame to {}", path.display());
    Ok(())
}

/// Encodes a frame as PNG in memory.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, SnapshotError> {
    let mut buffer = std::io::Cursor::new(Vec::new());
    image.write_to(&mut buffer, image::ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_extension() {
        let image = RgbaImage::new(2, 2);
        let err = save_image("frame.bmpx", &image).unwrap_err();
        assert!(matches!(err, SnapshotError::UnsupportedFormat(ext) if ext == "bmpx"));
    }

    #[test]
    fn test_encode_png_signature() {
        let image = RgbaImage::new(3, 2);
        let bytes = encode_png(&image).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
