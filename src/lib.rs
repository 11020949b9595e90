//! Renders an animation of a circle whose center slides horizontally while its radius keeps the
//! outline on two fixed points, annotated with live measurements.
//!
//! A run has two sequential stages:
//!
//! - [`FrameGenerator`] renders each displacement with [`CpuRenderer`] and writes numbered JPEG
//!   files through a [`JpegSequenceSink`]
//! - [`VideoAssembler`] reads those files back in index order and streams them into an
//!   [`FfmpegSink`] MP4
//!
//! [`run`] performs both after removing stale outputs.
#![forbid(unsafe_code)]

mod foundation;

/// Frame sinks: JPEG sequences, MP4 via `ffmpeg`, in-memory.
pub mod encode;
/// Rasterization.
pub mod render;
/// Scene parameters and geometry.
pub mod scene;
/// Generation, assembly and the orchestrating run.
pub mod session;

pub use crate::foundation::color::Rgba8;
pub use crate::foundation::core::{Canvas, Fps, FrameIndex, Point, Size};
pub use crate::foundation::error::{SweepError, SweepResult};

pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::frames::{
    FrameFile, JpegSequenceSink, clear_frames_dir, frame_file_name, list_frame_files,
    parse_frame_file_name,
};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::render::cpu::CpuRenderer;
pub use crate::render::frame::FrameRGBA;
pub use crate::scene::config::SceneConfig;
pub use crate::scene::geometry::{
    LabelPlacement, LabelTexts, RadiusHook, SceneGeometry, follow_offset, radius_for, radius_hook,
    stated_value,
};
pub use crate::session::assembler::VideoAssembler;
pub use crate::session::config::{SweepConfig, SweepRange};
pub use crate::session::generator::FrameGenerator;
pub use crate::session::run::{RunReport, clean_outputs, run, run_with_sink};
