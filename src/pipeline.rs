//! Per-request thumbnail pipeline.

use crate::assets::loader::{ImageFormat, SourceLoader};
use crate::cache::{self, CacheDirective};
use crate::config::ThumbnailConfig;
use crate::encode::ThumbnailEncoder;
use crate::fallback;
use crate::foundation::error::ThumbnailResult;
use crate::quantize::ColorQuantizer;
use crate::render::composite;
use crate::request::descriptor::RequestDescriptor;
use crate::request::options::ResolvedOptions;

/// Encoded thumbnail plus transport-facing metadata.
#[derive(Clone, Debug)]
pub struct ThumbnailResponse {
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
    /// MIME type of `bytes`.
    pub content_type: &'static str,
    /// Advisory cache metadata for the HTTP layer.
    pub cache: CacheDirective,
}

/// One-shot thumbnail pipeline over injected collaborators.
///
/// Every invocation is independent: all intermediate state is request-scoped,
/// so one pipeline value can serve concurrent requests without locking.
///
/// A request always produces a generated thumbnail, a fallback image, or an
/// explicit rejection; load failures are absorbed into the fallback path and
/// malformed options are replaced by defaults. Only an invalid path or an
/// encoder failure surfaces as an error.
pub struct ThumbnailPipeline<'a> {
    loader: &'a dyn SourceLoader,
    encoder: &'a dyn ThumbnailEncoder,
    quantizer: &'a dyn ColorQuantizer,
    config: &'a ThumbnailConfig,
}

impl<'a> ThumbnailPipeline<'a> {
    /// Wire a pipeline over its collaborators.
    pub fn new(
        loader: &'a dyn SourceLoader,
        encoder: &'a dyn ThumbnailEncoder,
        quantizer: &'a dyn ColorQuantizer,
        config: &'a ThumbnailConfig,
    ) -> Self {
        Self {
            loader,
            encoder,
            quantizer,
            config,
        }
    }

    /// Parse a raw request path and query map, then run the pipeline.
    #[tracing::instrument(skip_all, fields(path = %path))]
    pub fn handle<K, V, I>(&self, path: &str, query: I) -> ThumbnailResult<ThumbnailResponse>
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let descriptor = RequestDescriptor::parse(path, query)?;
        self.run(&descriptor)
    }

    /// Run the pipeline for an already-parsed descriptor.
    pub fn run(&self, descriptor: &RequestDescriptor) -> ThumbnailResult<ThumbnailResponse> {
        let format = ImageFormat::from_source_name(&descriptor.source_id);
        let resolved = ResolvedOptions::resolve(&descriptor.options, self.config, format);

        let (source, original_existed) = match self.loader.load(&descriptor.source_id) {
            Ok(img) => (img, true),
            Err(err) => {
                tracing::debug!(
                    source = %descriptor.source_id,
                    error = %err,
                    "source load failed, serving fallback"
                );
                let img = fallback::not_found_image(
                    resolved.background,
                    resolved.foreground,
                    &resolved.text,
                    self.config.not_found_image.as_deref(),
                    format,
                );
                (img, false)
            }
        };

        let composited = composite::composite(
            source,
            descriptor.requested,
            resolved.fit_inside,
            resolved.background,
            resolved.mask,
            self.quantizer,
        );

        let cache = cache::advise(original_existed, &descriptor.source_id);
        let bytes = self.encoder.encode(&composited)?;
        Ok(ThumbnailResponse {
            bytes,
            content_type: self.encoder.content_type(composited.format),
            cache,
        })
    }
}
