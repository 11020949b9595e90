use std::path::PathBuf;

use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::encode::frames::{JpegSequenceSink, clear_frames_dir};
use crate::encode::sink::FrameSink;
use crate::foundation::error::SweepResult;
use crate::session::assembler::VideoAssembler;
use crate::session::config::SweepConfig;
use crate::session::generator::FrameGenerator;

/// What a run produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Stale frame files deleted before generating.
    pub stale_frames_removed: usize,
    /// Whether an existing output video was deleted.
    pub removed_old_output: bool,
    /// Frames rendered and written to disk.
    pub frames_generated: u64,
    /// Frames read back and handed to the video sink.
    pub frames_encoded: u64,
    /// Output video path.
    pub output: PathBuf,
}

/// Delete the previous output video and every prefixed file in the frames directory.
///
/// Returns `(stale_frames_removed, removed_old_output)`.
pub fn clean_outputs(cfg: &SweepConfig) -> SweepResult<(usize, bool)> {
    let removed_old_output = match std::fs::remove_file(&cfg.output) {
        Ok(()) => true,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context(format!("remove old output '{}'", cfg.output.display()))
                .into());
        }
    };
    let stale = clear_frames_dir(&cfg.frames_dir, &cfg.frame_prefix)?;
    Ok((stale, removed_old_output))
}

/// Full run: clean, generate every frame, then encode them into `cfg.output` with `ffmpeg`.
pub fn run(cfg: &SweepConfig) -> SweepResult<RunReport> {
    let mut video = FfmpegSink::new(FfmpegSinkOpts {
        background: cfg.scene.background_color.rgb_bytes(),
        ..FfmpegSinkOpts::new(&cfg.output)
    });
    run_with_sink(cfg, &mut video)
}

/// Full run with a caller-provided video sink.
#[tracing::instrument(skip_all, fields(output = %cfg.output.display()))]
pub fn run_with_sink(cfg: &SweepConfig, video: &mut dyn FrameSink) -> SweepResult<RunReport> {
    cfg.validate()?;

    let (stale_frames_removed, removed_old_output) = clean_outputs(cfg)?;
    if stale_frames_removed > 0 || removed_old_output {
        tracing::info!(
            stale_frames_removed,
            removed_old_output,
            "cleaned previous outputs"
        );
    }

    let mut generator =
        FrameGenerator::new(cfg.scene.clone())?.with_progress_every(cfg.progress_every);
    let mut frames = JpegSequenceSink::new(&cfg.frames_dir, &cfg.frame_prefix, cfg.jpeg_quality)
        .with_background(cfg.scene.background_color.rgb_bytes());
    let frames_generated = generator.generate(&cfg.range, cfg.fps, &mut frames)?;
    tracing::info!(frames = frames_generated, "frames created");

    let assembler = VideoAssembler::new(&cfg.frames_dir, &cfg.frame_prefix);
    let frames_encoded = assembler.assemble(cfg.scene.canvas(), cfg.fps, video)?;
    tracing::info!(
        frames = frames_encoded,
        secs = cfg.fps.frames_to_secs(frames_encoded),
        output = %cfg.output.display(),
        "video created"
    );

    Ok(RunReport {
        stale_frames_removed,
        removed_old_output,
        frames_generated,
        frames_encoded,
        output: cfg.output.clone(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/session/run.rs"]
mod tests;
