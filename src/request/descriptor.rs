use crate::foundation::error::{ThumbnailError, ThumbnailResult};
use crate::foundation::geom::Size;
use crate::request::options::OptionSet;

/// Source extensions accepted inside a thumbnail path.
const SOURCE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "gif", "bmp", "png", "tif", "tiff"];

/// Trailing path segment that marks a thumbnail request.
const THUMB_SUFFIX: &str = "thumb";

/// A parsed thumbnail request. Immutable once parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestDescriptor {
    /// Original source identifier (`<name>.<ext>`), preserved verbatim.
    pub source_id: String,
    /// Requested output size; both axes are non-zero.
    pub requested: Size,
    /// Raw query options, captured verbatim.
    pub options: OptionSet,
}

impl RequestDescriptor {
    /// Parse a thumbnail request path plus its query-parameter map.
    ///
    /// The path must end in `<name>.<ext>.<width>x<height>.thumb`
    /// (case-insensitive) where `<ext>` is a recognized image extension and
    /// width/height are non-zero decimal integers. Option values are captured
    /// verbatim; their validation is deferred to resolution, which falls back
    /// to defaults per value.
    pub fn parse<K, V, I>(path: &str, query: I) -> ThumbnailResult<Self>
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let path = path.split('?').next().unwrap_or(path);
        let file = path.rsplit('/').next().unwrap_or(path);

        let mut parts: Vec<&str> = file.split('.').collect();
        if parts.len() < 4 {
            return Err(ThumbnailError::invalid_request(format!(
                "'{file}' does not match <name>.<ext>.<width>x<height>.{THUMB_SUFFIX}"
            )));
        }

        let suffix = parts.pop().unwrap_or_default();
        if !suffix.eq_ignore_ascii_case(THUMB_SUFFIX) {
            return Err(ThumbnailError::invalid_request(format!(
                "'{file}' does not end in .{THUMB_SUFFIX}"
            )));
        }

        let dims = parts.pop().unwrap_or_default();
        let requested = parse_dimensions(dims)
            .ok_or_else(|| ThumbnailError::invalid_request(format!("bad dimensions '{dims}'")))?;

        let ext = parts.last().copied().unwrap_or_default();
        if !SOURCE_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)) {
            return Err(ThumbnailError::invalid_request(format!(
                "unrecognized source extension '{ext}'"
            )));
        }

        Ok(Self {
            source_id: parts.join("."),
            requested,
            options: OptionSet::from_pairs(query),
        })
    }
}

/// Parse `<width>x<height>`, rejecting zero on either axis.
fn parse_dimensions(dims: &str) -> Option<Size> {
    let (w, h) = dims.split_once(['x', 'X'])?;
    let width = parse_decimal(w)?;
    let height = parse_decimal(h)?;
    if width == 0 || height == 0 {
        return None;
    }
    Some(Size::new(width, height))
}

/// Strict unsigned decimal parse (no sign, no whitespace).
fn parse_decimal(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
#[path = "../../tests/unit/request/descriptor.rs"]
mod tests;
