//! Scene parameters and the geometry derived from them.

/// Drawing parameters.
pub mod config;
/// Per-frame geometry and label layout.
pub mod geometry;
