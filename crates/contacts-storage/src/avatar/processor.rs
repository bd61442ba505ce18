//! Decode, crop, and re-encode uploaded avatars.

use std::io::Cursor;

use bytes::Bytes;
use image::ImageFormat;
use image::imageops::FilterType;

use contacts_core::error::{AppError, ErrorKind};
use contacts_core::result::AppResult;

/// Normalizes uploads to a fixed-size square PNG.
#[derive(Debug, Clone, Copy)]
pub struct AvatarProcessor {
    size: u32,
}

impl AvatarProcessor {
    pub fn new(size: u32) -> Self {
        Self { size: size.max(1) }
    }

    /// Check if a declared content type is an accepted image format.
    pub fn is_supported(mime_type: &str) -> bool {
        matches!(
            mime_type,
            "image/jpeg" | "image/png" | "image/gif" | "image/webp" | "image/bmp"
        )
    }

    /// Run [`normalize`] on the blocking pool.
    pub async fn process(&self, data: Bytes) -> AppResult<Bytes> {
        let size = self.size;
        tokio::task::spawn_blocking(move || normalize(&data, size))
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Avatar task panicked", e))?
    }
}

/// Decode any supported image, crop-fill it to `size`×`size` around the
/// centre, and encode the result as PNG.
pub fn normalize(data: &[u8], size: u32) -> AppResult<Bytes> {
    if data.is_empty() {
        return Err(AppError::validation("Empty image data"));
    }

    let img = image::load_from_memory(data).map_err(|e| {
        AppError::with_source(ErrorKind::Validation, "Unsupported or corrupt image", e)
    })?;

    let square = img.resize_to_fill(size, size, FilterType::Lanczos3);

    let mut out = Cursor::new(Vec::new());
    square
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to encode avatar", e))?;

    tracing::debug!(
        source_width = img.width(),
        source_height = img.height(),
        size,
        "Normalized avatar"
    );

    Ok(Bytes::from(out.into_inner()))
}

#[cfg(test)]
mod tests {
    use image::{ImageBuffer, Rgb};

    use super::*;

    fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = ImageBuffer::from_pixel(width, height, Rgb([200u8, 40, 40]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, format).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_wide_jpeg_becomes_square_png() {
        let result = normalize(&encoded(400, 120, ImageFormat::Jpeg), 250).unwrap();
        assert_eq!(image::guess_format(&result).unwrap(), ImageFormat::Png);
        let decoded = image::load_from_memory(&result).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (250, 250));
    }

    #[test]
    fn test_small_image_is_upscaled() {
        let result = normalize(&encoded(16, 32, ImageFormat::Png), 64).unwrap();
        let decoded = image::load_from_memory(&result).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (64, 64));
    }

    #[test]
    fn test_garbage_is_validation_error() {
        let err = normalize(b"definitely not an image", 250).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(normalize(&[], 250).unwrap_err().kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_process_runs_off_thread() {
        let processor = AvatarProcessor::new(32);
        let out = processor
            .process(Bytes::from(encoded(50, 50, ImageFormat::Png)))
            .await
            .unwrap();
        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!(decoded.width(), 32);
        assert!(AvatarProcessor::is_supported("image/webp"));
        assert!(!AvatarProcessor::is_supported("application/pdf"));
    }
}
