//! Bitmap scaling for pasting onto canvases of a different size.

use std::io::Cursor;

use bytes::Bytes;
use image::ImageFormat;
use image::imageops::FilterType;
use tracing::debug;

use crate::domain::errors::ImageError;

/// Stateless bitmap transform.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageResizer;

impl ImageResizer {
    /// Decodes `data`, stretches it to exactly `width`x`height` and
    /// re-encodes it as PNG.
    ///
    /// # Errors
    /// Returns `DecodeError` if `data` is not a readable image or the result
    /// cannot be encoded.
    pub fn resize(data: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ImageError> {
        let source = image::load_from_memory(data).map_err(ImageError::decode)?;
        debug!(
            from_width = source.width(),
            from_height = source.height(),
            width,
            height,
            "Resizing image"
        );

        let resized = source.resize_exact(width, height, FilterType::Triangle);

        let mut encoded = Cursor::new(Vec::new());
        resized
            .write_to(&mut encoded, ImageFormat::Png)
            .map_err(ImageError::decode)?;
        Ok(encoded.into_inner())
    }

    /// Runs [`ImageResizer::resize`] on the blocking pool.
    ///
    /// # Errors
    /// Returns `DecodeError` from the resize, or `Backend` if the task
    /// panicked.
    pub async fn resize_blocking(data: Bytes, width: u32, height: u32) -> Result<Bytes, ImageError> {
        tokio::task::spawn_blocking(move || Self::resize(&data, width, height))
            .await
            .map_err(|e| ImageError::backend(format!("Resize task panicked: {e}")))?
            .map(Bytes::from)
    }
}

#[cfg(test)]
pub(crate) fn sample_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
    });
    let mut out = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    out.into_inner()
}
