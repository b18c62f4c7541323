//! Thumbnail byte encoding.

use std::io::Cursor;

use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::assets::loader::ImageFormat;
use crate::foundation::error::{ThumbnailError, ThumbnailResult};
use crate::render::composite::CompositeResult;

/// JPEG quality used by the built-in encoder.
const JPEG_QUALITY: u8 = 90;

/// Serializes a composited bitmap into target-format bytes.
pub trait ThumbnailEncoder {
    /// Encode the composite into its output format.
    fn encode(&self, composite: &CompositeResult) -> ThumbnailResult<Vec<u8>>;

    /// MIME type for a given output format.
    fn content_type(&self, format: ImageFormat) -> &'static str;
}

/// Encoder backed by the `image` crate's built-in codecs.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageCrateEncoder;

impl ThumbnailEncoder for ImageCrateEncoder {
    fn encode(&self, composite: &CompositeResult) -> ThumbnailResult<Vec<u8>> {
        let pixels = &composite.pixels;
        let mut out = Vec::new();
        match composite.format {
            ImageFormat::Png => {
                PngEncoder::new(Cursor::new(&mut out))
                    .write_image(
                        pixels.as_raw(),
                        pixels.width(),
                        pixels.height(),
                        ExtendedColorType::Rgba8,
                    )
                    .map_err(|e| ThumbnailError::encoding(format!("png encode: {e}")))?;
            }
            ImageFormat::Gif => {
                let mut encoder = GifEncoder::new(Cursor::new(&mut out));
                encoder
                    .encode(
                        pixels.as_raw(),
                        pixels.width(),
                        pixels.height(),
                        ExtendedColorType::Rgba8,
                    )
                    .map_err(|e| ThumbnailError::encoding(format!("gif encode: {e}")))?;
            }
            ImageFormat::Jpeg => {
                // JPEG carries no alpha; flatten to RGB.
                let rgb = image::DynamicImage::ImageRgba8(pixels.clone()).to_rgb8();
                JpegEncoder::new_with_quality(Cursor::new(&mut out), JPEG_QUALITY)
                    .write_image(
                        rgb.as_raw(),
                        rgb.width(),
                        rgb.height(),
                        ExtendedColorType::Rgb8,
                    )
                    .map_err(|e| ThumbnailError::encoding(format!("jpeg encode: {e}")))?;
            }
        }
        Ok(out)
    }

    fn content_type(&self, format: ImageFormat) -> &'static str {
        match format {
            ImageFormat::Gif => "image/gif",
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode.rs"]
mod tests;
