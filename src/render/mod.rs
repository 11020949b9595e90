//! Rasterization of the scene into RGBA frames.

/// CPU renderer powered by `vello_cpu`.
pub mod cpu;
/// Frame pixel buffers.
pub mod frame;
pub(crate) mod text;
