//! Request descriptor parsing and option resolution.

pub mod descriptor;
pub mod options;
