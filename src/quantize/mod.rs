//! Palette quantization for indexed-color outputs.

pub mod octree;

use image::RgbaImage;

/// Reduces a true-color bitmap to a palette-mapped bitmap.
///
/// Injected into the pipeline so hosts can substitute their own quantizer.
pub trait ColorQuantizer {
    /// Quantize `image` to at most `max_colors` colors using a color tree of
    /// `tree_depth` levels, returning a palette-mapped bitmap of the same
    /// dimensions. Per-pixel alpha is carried through unchanged.
    fn quantize(&self, image: &RgbaImage, max_colors: u16, tree_depth: u8) -> RgbaImage;
}
