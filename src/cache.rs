//! Advisory HTTP cache metadata.

/// Cache lifetime when the original source was located.
pub const FOUND_LIFETIME_MINUTES: u32 = 30;

/// Cache lifetime when a fallback image was served; short because the absence
/// may be transient.
pub const FALLBACK_LIFETIME_MINUTES: u32 = 2;

/// Cache lifetime and dependency hints derived from one pipeline run.
///
/// Consumed by an HTTP response layer to set cache-control lifetime and a
/// resource dependency key; nothing is persisted here.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CacheDirective {
    /// Advisory cache lifetime in minutes.
    pub lifetime_minutes: u32,
    /// Source id the cached response depends on, when the source existed. The
    /// transport layer invalidates the cached thumbnail when it changes.
    pub depends_on_source: Option<String>,
}

/// Derive the cache directive for a request.
pub fn advise(original_existed: bool, source_id: &str) -> CacheDirective {
    if original_existed {
        CacheDirective {
            lifetime_minutes: FOUND_LIFETIME_MINUTES,
            depends_on_source: Some(source_id.to_string()),
        }
    } else {
        CacheDirective {
            lifetime_minutes: FALLBACK_LIFETIME_MINUTES,
            depends_on_source: None,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/cache.rs"]
mod tests;
