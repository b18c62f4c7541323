use std::collections::BTreeMap;

use crate::assets::color::{Rgba8, parse_hex};
use crate::assets::loader::ImageFormat;
use crate::config::ThumbnailConfig;

/// Raw option values captured verbatim from the query map.
///
/// No validation happens here; each consumer applies its own
/// fallback-on-malformed policy during [`ResolvedOptions::resolve`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OptionSet {
    values: BTreeMap<String, String>,
}

impl OptionSet {
    /// Build an option set from key/value pairs.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up a raw option value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// Options after defaulting and validation, ready for compositing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedOptions {
    /// Canvas background color.
    pub background: Rgba8,
    /// Placeholder text color.
    pub foreground: Rgba8,
    /// Placeholder text.
    pub text: String,
    /// `true` fits the image inside the target box; `false` fills and crops.
    pub fit_inside: bool,
    /// Overlay mask color; `a == 0` disables the mask.
    pub mask: Rgba8,
}

impl ResolvedOptions {
    /// Resolve raw options against process configuration.
    ///
    /// Malformed values fall back to the configured default; they never fail
    /// the request. The background default depends on the output format:
    /// transparent for PNG/GIF, white otherwise.
    pub fn resolve(options: &OptionSet, config: &ThumbnailConfig, format: ImageFormat) -> Self {
        let mut background = config.background.unwrap_or(if format.supports_transparency() {
            Rgba8::TRANSPARENT
        } else {
            Rgba8::WHITE
        });
        if let Some(c) = options.get("bg").and_then(parse_hex) {
            background = c;
        }

        let mut foreground = config.foreground;
        if let Some(c) = options.get("fg").and_then(parse_hex) {
            foreground = c;
        }

        let text = options
            .get("txt")
            .map(str::to_string)
            .unwrap_or_else(|| config.not_found_text.clone());

        let fit_inside = options
            .get("inside")
            .and_then(parse_bool)
            .unwrap_or(config.fit_inside);

        // The mask only accepts the 8-digit ARGB form; a 6-digit value would
        // read as fully opaque and hide the image under it.
        let mask = options
            .get("mask")
            .filter(|v| v.len() == 8)
            .and_then(parse_hex)
            .unwrap_or(Rgba8::TRANSPARENT);

        Self {
            background,
            foreground,
            text,
            fit_inside,
            mask,
        }
    }
}

/// Case-insensitive boolean parse; anything else is `None`.
fn parse_bool(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "../../tests/unit/request/options.rs"]
mod tests;
