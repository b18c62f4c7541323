use std::fs;
use std::path::PathBuf;

use image::RgbaImage;

use crate::foundation::geom::Size;

/// Output format class of a source, derived from its file extension.
///
/// Anything that is neither GIF nor PNG encodes as JPEG, so BMP and TIFF
/// sources classify as [`ImageFormat::Jpeg`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    /// JPEG output (`image/jpeg`). The default for non-GIF, non-PNG sources.
    Jpeg,
    /// PNG output (`image/png`).
    Png,
    /// GIF output (`image/gif`). Palette-based.
    Gif,
}

impl ImageFormat {
    /// Classify a source id (or file name) by its extension, case-insensitive.
    pub fn from_source_name(name: &str) -> Self {
        let ext = name.rsplit('.').next().unwrap_or("");
        if ext.eq_ignore_ascii_case("gif") {
            Self::Gif
        } else if ext.eq_ignore_ascii_case("png") {
            Self::Png
        } else {
            Self::Jpeg
        }
    }

    /// Return `true` when the format keeps an alpha channel in its output.
    ///
    /// This drives the default background: transparent for PNG/GIF, white
    /// for JPEG.
    pub fn supports_transparency(self) -> bool {
        matches!(self, Self::Png | Self::Gif)
    }
}

/// Palette depth class of a decoded source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorDepth {
    /// Full-color source; composites pass through untouched.
    TrueColor,
    /// 1-bit indexed source.
    Indexed1,
    /// 4-bit indexed source.
    Indexed4,
    /// 8-bit indexed source.
    Indexed8,
}

impl ColorDepth {
    /// Return `true` when a composite of this source must be re-quantized.
    pub fn is_indexed(self) -> bool {
        !matches!(self, Self::TrueColor)
    }
}

/// A decoded source image together with its format classification.
///
/// Owned exclusively by one pipeline invocation; never shared across requests.
#[derive(Clone, Debug)]
pub struct SourceImage {
    /// Decoded pixels, straight-alpha RGBA8.
    pub pixels: RgbaImage,
    /// Output format class derived from the source name.
    pub format: ImageFormat,
    /// Palette depth class of the source.
    pub depth: ColorDepth,
}

impl SourceImage {
    /// Pixel dimensions of the decoded source.
    pub fn size(&self) -> Size {
        Size::new(self.pixels.width(), self.pixels.height())
    }
}

/// Reasons a source could not be produced.
///
/// Every variant routes to the fallback image; none of them surface to the
/// caller as an error.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("source not found: {0}")]
    NotFound(String),

    #[error("source read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("source decode failed: {0}")]
    Decode(#[from] image::ImageError),
}

/// Resolves a request descriptor's source id to raw pixel data.
pub trait SourceLoader {
    /// Load and decode the source behind `source_id`.
    fn load(&self, source_id: &str) -> Result<SourceImage, LoadError>;
}

/// Decode raw bytes into a [`SourceImage`], classifying format and depth from
/// `source_name`'s extension.
///
/// The decoder expands palettes, so the source's palette depth is not
/// observable after decode; GIF sources classify as 8-bit indexed (GIF is
/// always palette-based) and everything else as true color.
pub fn decode_source(bytes: &[u8], source_name: &str) -> Result<SourceImage, LoadError> {
    let format = ImageFormat::from_source_name(source_name);
    let pixels = image::load_from_memory(bytes)?.to_rgba8();
    let depth = if format == ImageFormat::Gif {
        ColorDepth::Indexed8
    } else {
        ColorDepth::TrueColor
    };
    Ok(SourceImage {
        pixels,
        format,
        depth,
    })
}

/// Loader that reads source images from a directory on disk.
#[derive(Clone, Debug)]
pub struct FsLoader {
    root: PathBuf,
}

impl FsLoader {
    /// Create a loader rooted at `root`. Source ids resolve relative to it.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl SourceLoader for FsLoader {
    fn load(&self, source_id: &str) -> Result<SourceImage, LoadError> {
        // Source ids must stay inside the root.
        let id = source_id.replace('\\', "/");
        if id.starts_with('/') || id.split('/').any(|part| part == "..") {
            return Err(LoadError::NotFound(source_id.to_string()));
        }

        let path = self.root.join(&id);
        if !path.is_file() {
            return Err(LoadError::NotFound(source_id.to_string()));
        }

        let bytes = fs::read(&path)?;
        tracing::debug!(source = source_id, len = bytes.len(), "decoding source");
        decode_source(&bytes, source_id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
