//! Thumbweave generates resized image variants ("thumbnails") on demand.
//!
//! A request descriptor (`photo.jpg.200x150.thumb` plus the query options
//! `bg`, `fg`, `txt`, `inside`, `mask`) selects a source image, a target
//! geometry and decoration. The pipeline loads the source (or synthesizes a
//! placeholder when it is missing), composites it onto a canvas with
//! deterministic proportional geometry, re-quantizes indexed sources, and
//! encodes the result together with advisory HTTP cache metadata.
//!
//! - Build a [`ThumbnailConfig`] once at startup
//! - Wire a [`ThumbnailPipeline`] over a [`SourceLoader`], a
//!   [`ThumbnailEncoder`] and a [`ColorQuantizer`]
//! - Call [`ThumbnailPipeline::handle`] per request
#![forbid(unsafe_code)]

mod foundation;

pub mod assets;
pub mod cache;
pub mod config;
pub mod encode;
pub mod fallback;
pub mod pipeline;
pub mod quantize;
pub mod render;
pub mod request;

pub use crate::foundation::error::{ThumbnailError, ThumbnailResult};
pub use crate::foundation::geom::{Point, Size};

pub use crate::assets::color::{Rgba8, parse_hex};
pub use crate::assets::loader::{
    ColorDepth, FsLoader, ImageFormat, LoadError, SourceImage, SourceLoader,
};
pub use crate::cache::CacheDirective;
pub use crate::config::ThumbnailConfig;
pub use crate::encode::{ImageCrateEncoder, ThumbnailEncoder};
pub use crate::pipeline::{ThumbnailPipeline, ThumbnailResponse};
pub use crate::quantize::{ColorQuantizer, octree::OctreeQuantizer};
pub use crate::render::composite::CompositeResult;
pub use crate::request::descriptor::RequestDescriptor;
pub use crate::request::options::{OptionSet, ResolvedOptions};
