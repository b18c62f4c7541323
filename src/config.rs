//! Process-wide thumbnail defaults.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::assets::color::Rgba8;
use crate::foundation::error::{ThumbnailError, ThumbnailResult};

/// Immutable configuration shared by every pipeline invocation.
///
/// Built once at process start and passed by reference; safe for concurrent
/// reads. Every field can be overridden per request through query options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailConfig {
    /// Static image served when a source cannot be loaded. When unset (or
    /// itself unreadable) a text placeholder is synthesized instead.
    pub not_found_image: Option<PathBuf>,
    /// Text drawn on the synthesized placeholder.
    pub not_found_text: String,
    /// Default canvas background. `None` selects the format default:
    /// transparent for PNG/GIF, white for JPEG.
    pub background: Option<Rgba8>,
    /// Default placeholder text color.
    pub foreground: Rgba8,
    /// Default fit mode: `true` fits inside the target box, `false` fills the
    /// box and crops the overflow.
    pub fit_inside: bool,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            not_found_image: None,
            not_found_text: "Image not available".to_string(),
            background: None,
            foreground: Rgba8::RED,
            fit_inside: true,
        }
    }
}

impl ThumbnailConfig {
    /// Parse configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ThumbnailResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ThumbnailError::config(format!("parse thumbnail config JSON: {e}")))
    }

    /// Parse configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ThumbnailResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ThumbnailError::config(format!("open thumbnail config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
