use image::{Rgba, RgbaImage, imageops};

use crate::assets::color::Rgba8;
use crate::assets::loader::{ImageFormat, SourceImage};
use crate::foundation::geom::{Point, Size};
use crate::quantize::ColorQuantizer;
use crate::render::geometry::{self, ResolvedGeometry};

/// Palette capacity handed to the quantizer for indexed sources.
pub const QUANTIZE_MAX_COLORS: u16 = 255;

/// Octree depth handed to the quantizer for indexed sources.
pub const QUANTIZE_TREE_DEPTH: u8 = 8;

/// Composited output bitmap at the requested size.
#[derive(Clone, Debug)]
pub struct CompositeResult {
    /// Output pixels, straight-alpha RGBA8.
    pub pixels: RgbaImage,
    /// Output format class, carried through from the source.
    pub format: ImageFormat,
}

impl CompositeResult {
    /// Pixel dimensions of the composite.
    pub fn size(&self) -> Size {
        Size::new(self.pixels.width(), self.pixels.height())
    }
}

/// Composite a source image onto a canvas of the requested size.
///
/// When the source already matches the requested size its pixels are returned
/// unchanged. Otherwise the canvas is filled with `background`, the source is
/// scaled (Catmull-Rom) to the resolved draw size and blended at the resolved
/// offset, and `mask` (when its alpha is non-zero) is blended uniformly over
/// the drawn region. Indexed sources re-quantize the whole composite so the
/// output stays palette-based even though background and mask may introduce
/// colors outside the source palette.
pub fn composite(
    source: SourceImage,
    requested: Size,
    fit_inside: bool,
    background: Rgba8,
    mask: Rgba8,
    quantizer: &dyn ColorQuantizer,
) -> CompositeResult {
    let format = source.format;

    if source.size() == requested {
        return CompositeResult {
            pixels: source.pixels,
            format,
        };
    }

    let ResolvedGeometry { draw, offset } = geometry::resolve(source.size(), requested, fit_inside);

    let mut canvas = RgbaImage::from_pixel(
        requested.width,
        requested.height,
        Rgba([background.r, background.g, background.b, background.a]),
    );

    let scaled = imageops::resize(
        &source.pixels,
        draw.width.max(1),
        draw.height.max(1),
        imageops::FilterType::CatmullRom,
    );
    blit_over(&mut canvas, &scaled, offset);

    if mask.a > 0 {
        apply_mask(&mut canvas, mask, offset, draw);
    }

    let pixels = if source.depth.is_indexed() {
        tracing::debug!("re-quantizing composite of indexed source");
        quantizer.quantize(&canvas, QUANTIZE_MAX_COLORS, QUANTIZE_TREE_DEPTH)
    } else {
        canvas
    };

    CompositeResult { pixels, format }
}

/// Draw `src` over `dst` at `offset`, clipping at the canvas edges.
fn blit_over(dst: &mut RgbaImage, src: &RgbaImage, offset: Point) {
    let (dw, dh) = (i64::from(dst.width()), i64::from(dst.height()));
    for sy in 0..src.height() {
        let dy = i64::from(offset.y) + i64::from(sy);
        if dy < 0 || dy >= dh {
            continue;
        }
        for sx in 0..src.width() {
            let dx = i64::from(offset.x) + i64::from(sx);
            if dx < 0 || dx >= dw {
                continue;
            }
            let s = *src.get_pixel(sx, sy);
            let d = dst.get_pixel_mut(dx as u32, dy as u32);
            *d = over(*d, s);
        }
    }
}

/// Blend `mask` uniformly over `[offset, offset + region]`, clipped.
fn apply_mask(dst: &mut RgbaImage, mask: Rgba8, offset: Point, region: Size) {
    let m = Rgba([mask.r, mask.g, mask.b, mask.a]);
    let (dw, dh) = (i64::from(dst.width()), i64::from(dst.height()));
    for ry in 0..region.height {
        let dy = i64::from(offset.y) + i64::from(ry);
        if dy < 0 || dy >= dh {
            continue;
        }
        for rx in 0..region.width {
            let dx = i64::from(offset.x) + i64::from(rx);
            if dx < 0 || dx >= dw {
                continue;
            }
            let d = dst.get_pixel_mut(dx as u32, dy as u32);
            *d = over(*d, m);
        }
    }
}

/// Straight-alpha source-over blend.
fn over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let sa = u32::from(src[3]);
    if sa == 255 {
        return src;
    }
    if sa == 0 {
        return dst;
    }

    let da = u32::from(dst[3]);
    let inv = 255 - sa;
    let out_a = sa + mul_div255(da, inv);
    if out_a == 0 {
        return Rgba([0, 0, 0, 0]);
    }

    let mut out = [0u8; 4];
    for i in 0..3 {
        let sc = u32::from(src[i]);
        let dc = u32::from(dst[i]);
        // Weighted channels scaled by 255*255, divided back out by out_a*255.
        let num = sc * sa * 255 + dc * da * inv;
        let den = out_a * 255;
        out[i] = ((num + den / 2) / den) as u8;
    }
    out[3] = out_a as u8;
    Rgba(out)
}

fn mul_div255(x: u32, y: u32) -> u32 {
    (x * y + 127) / 255
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
