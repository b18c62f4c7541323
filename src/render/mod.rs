//! Geometry resolution and canvas compositing.

pub mod composite;
pub mod geometry;
