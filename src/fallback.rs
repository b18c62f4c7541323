//! Substitute images for sources that cannot be loaded.

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::assets::color::Rgba8;
use crate::assets::loader::{self, ColorDepth, ImageFormat, SourceImage};

/// Edge length of the synthesized placeholder canvas.
pub const PLACEHOLDER_EDGE: u32 = 300;

const TEXT_FONT_SIZE: u32 = 24;
const TEXT_LINE_HEIGHT: u32 = 30;
const TEXT_TOP: u32 = 100;
const TEXT_INSET: u32 = 10;

/// Produce a substitute image for a source that could not be loaded.
///
/// A configured static image wins when it is loadable; otherwise a
/// [`PLACEHOLDER_EDGE`]-square canvas is synthesized with the background
/// color and the placeholder text centered in the foreground color. This path
/// never fails outward: if the configured image is unreadable, synthesis runs,
/// and if text rasterization is unavailable the canvas degrades to a flat
/// background fill.
pub fn not_found_image(
    background: Rgba8,
    foreground: Rgba8,
    text: &str,
    configured_image: Option<&Path>,
    format: ImageFormat,
) -> SourceImage {
    if let Some(path) = configured_image {
        match load_configured(path, format) {
            Ok(img) => return img,
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "configured not-found image unusable, synthesizing placeholder"
                );
            }
        }
    }

    let pixels = rasterize_placeholder(background, foreground, text)
        .unwrap_or_else(|| flat_canvas(background));
    SourceImage {
        pixels,
        format,
        depth: ColorDepth::TrueColor,
    }
}

fn load_configured(path: &Path, format: ImageFormat) -> Result<SourceImage, loader::LoadError> {
    let bytes = std::fs::read(path)?;
    let name = path.to_string_lossy();
    // Depth classification follows the configured file; the output format
    // still follows the request.
    let decoded = loader::decode_source(&bytes, &name)?;
    Ok(SourceImage {
        pixels: decoded.pixels,
        format,
        depth: decoded.depth,
    })
}

/// Rasterize the text placeholder through SVG.
///
/// SVG text has no automatic wrapping, so the text is greedily wrapped into
/// lines sized for the interior rectangle and emitted as one `<text>` element
/// per line.
fn rasterize_placeholder(background: Rgba8, foreground: Rgba8, text: &str) -> Option<RgbaImage> {
    let inner_width = PLACEHOLDER_EDGE - 2 * TEXT_INSET;
    // Bold glyphs at this size average a bit over half the font size in width.
    let max_chars = (inner_width / (TEXT_FONT_SIZE * 6 / 10)).max(1) as usize;

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{0}" height="{0}">"#,
        PLACEHOLDER_EDGE
    ));
    svg.push_str(&format!(
        r##"<rect width="{0}" height="{0}" fill="#{1:02x}{2:02x}{3:02x}" fill-opacity="{4}"/>"##,
        PLACEHOLDER_EDGE,
        background.r,
        background.g,
        background.b,
        f64::from(background.a) / 255.0,
    ));
    for (i, line) in wrap_text(text, max_chars).iter().enumerate() {
        let y = TEXT_TOP + TEXT_FONT_SIZE + (i as u32) * TEXT_LINE_HEIGHT;
        if y > PLACEHOLDER_EDGE {
            break;
        }
        svg.push_str(&format!(
            r##"<text x="{x}" y="{y}" text-anchor="middle" font-family="sans-serif" font-weight="bold" font-size="{size}" fill="#{r:02x}{g:02x}{b:02x}" fill-opacity="{a}">{line}</text>"##,
            x = PLACEHOLDER_EDGE / 2,
            size = TEXT_FONT_SIZE,
            r = foreground.r,
            g = foreground.g,
            b = foreground.b,
            a = f64::from(foreground.a) / 255.0,
            line = escape_xml(line),
        ));
    }
    svg.push_str("</svg>");

    let mut opts = usvg::Options::default();
    opts.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(&svg, &opts).ok()?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(PLACEHOLDER_EDGE, PLACEHOLDER_EDGE)?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );

    let mut rgba = Vec::with_capacity((PLACEHOLDER_EDGE * PLACEHOLDER_EDGE * 4) as usize);
    for px in pixmap.pixels() {
        let c = px.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    RgbaImage::from_raw(PLACEHOLDER_EDGE, PLACEHOLDER_EDGE, rgba)
}

fn flat_canvas(background: Rgba8) -> RgbaImage {
    RgbaImage::from_pixel(
        PLACEHOLDER_EDGE,
        PLACEHOLDER_EDGE,
        Rgba([background.r, background.g, background.b, background.a]),
    )
}

/// Greedy word wrap; words longer than a line stand alone on their own line.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../tests/unit/fallback.rs"]
mod tests;
