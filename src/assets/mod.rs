//! Source-side building blocks: color parsing and image loading.

pub mod color;
pub mod loader;
