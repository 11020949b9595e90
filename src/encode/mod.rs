//! Frame sinks.
//!
//! Sinks consume rendered or decoded frames in index order: numbered JPEG files during
//! generation, an `ffmpeg` MP4 during assembly.

/// `ffmpeg`-based MP4 sink (system `ffmpeg` on `PATH`).
pub mod ffmpeg;
/// Numbered JPEG frame files.
pub mod frames;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
