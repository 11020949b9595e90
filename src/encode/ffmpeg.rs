use std::io::{Read as _, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use anyhow::Context as _;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{SweepError, SweepResult};
use crate::foundation::math::flatten_rgba8_to_opaque_rgba8;
use crate::render::frame::FrameRGBA;

/// Options for [`FfmpegSink`] MP4 output.
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output MP4 file path.
    pub out_path: PathBuf,
    /// Replace the output file if it already exists.
    pub overwrite: bool,
    /// Opaque color that translucent pixels are flattened onto.
    pub background: [u8; 3],
}

impl FfmpegSinkOpts {
    /// Options writing to `out_path`, overwriting, over black.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            background: [0, 0, 0],
        }
    }
}

/// A running `ffmpeg` child with its stdin pipe and stderr collector.
struct Encoder {
    child: Child,
    stdin: Option<ChildStdin>,
    stderr: Option<JoinHandle<std::io::Result<Vec<u8>>>>,
}

impl Encoder {
    fn spawn(opts: &FfmpegSinkOpts, cfg: &SinkConfig) -> SweepResult<Self> {
        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .arg(if opts.overwrite { "-y" } else { "-n" })
            .args(["-loglevel", "error", "-f", "rawvideo", "-pix_fmt", "rgba"])
            .args(["-s", &format!("{}x{}", cfg.width, cfg.height)]);
        // Raw input needs its rate before `-i`.
        cmd.args(["-r", &rate_arg(cfg.fps)])
            .args(["-i", "pipe:0", "-an"])
            .args(["-c:v", "libx264", "-pix_fmt", "yuv420p"])
            .args(["-movflags", "+faststart"])
            .arg(&opts.out_path);

        tracing::debug!(
            out = %opts.out_path.display(),
            width = cfg.width,
            height = cfg.height,
            "spawning ffmpeg"
        );
        let mut child = cmd
            .spawn()
            .map_err(|e| SweepError::encode(format!("could not start ffmpeg: {e}")))?;

        let stderr = child.stderr.take().map(|mut pipe| {
            std::thread::spawn(move || -> std::io::Result<Vec<u8>> {
                let mut buf = Vec::new();
                pipe.read_to_end(&mut buf)?;
                Ok(buf)
            })
        });
        let stdin = child.stdin.take();
        let mut encoder = Self {
            child,
            stdin,
            stderr,
        };
        if encoder.stdin.is_none() {
            encoder.abort();
            return Err(SweepError::encode("ffmpeg stdin is not piped"));
        }
        Ok(encoder)
    }

    fn write(&mut self, bytes: &[u8]) -> SweepResult<()> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| SweepError::encode("ffmpeg stdin already closed"))?;
        stdin
            .write_all(bytes)
            .map_err(|e| SweepError::encode(format!("writing frame to ffmpeg failed: {e}")))
    }

    fn collect_stderr(&mut self) -> String {
        let bytes = self
            .stderr
            .take()
            .and_then(|h| h.join().ok())
            .and_then(Result::ok)
            .unwrap_or_default();
        String::from_utf8_lossy(&bytes).trim().to_owned()
    }

    /// Close stdin so ffmpeg finalizes the file, then wait for it.
    fn finish(mut self) -> SweepResult<()> {
        drop(self.stdin.take());
        let status = self
            .child
            .wait()
            .map_err(|e| SweepError::encode(format!("waiting for ffmpeg failed: {e}")))?;
        let stderr = self.collect_stderr();
        if !status.success() {
            return Err(SweepError::encode(format!("ffmpeg exited with {status}: {stderr}")));
        }
        Ok(())
    }

    /// Stop an unfinished encode and reap the process.
    fn abort(&mut self) {
        drop(self.stdin.take());
        let _ = self.child.kill();
        let _ = self.child.wait();
        let _ = self.collect_stderr();
    }
}

/// Sink that spawns the system `ffmpeg` and streams raw RGBA frames to its stdin.
///
/// Output is H.264 in `yuv420p` with the moov atom moved to the front. A sink dropped between
/// `begin` and `end` kills and reaps its `ffmpeg` process.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,
    encoder: Option<Encoder>,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
    scratch: Vec<u8>,
}

impl std::fmt::Debug for FfmpegSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FfmpegSink")
            .field("opts", &self.opts)
            .field("running", &self.is_running())
            .field("last_idx", &self.last_idx)
            .finish()
    }
}

impl FfmpegSink {
    /// Sink writing to `opts.out_path`; nothing is spawned until `begin`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            encoder: None,
            cfg: None,
            last_idx: None,
            scratch: Vec::new(),
        }
    }

    /// Whether an `ffmpeg` process is currently attached.
    pub fn is_running(&self) -> bool {
        self.encoder.is_some()
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> SweepResult<()> {
        Fps::new(cfg.fps.num, cfg.fps.den)?;
        if cfg.width == 0 || cfg.height == 0 {
            return Err(SweepError::validation("video width and height must be > 0"));
        }
        if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
            return Err(SweepError::validation(
                "video width and height must be even for yuv420p",
            ));
        }
        if self.encoder.is_some() {
            return Err(SweepError::encode("ffmpeg sink already started"));
        }

        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(SweepError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(SweepError::encode(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        self.encoder = Some(Encoder::spawn(&self.opts, &cfg)?);
        self.scratch = vec![0u8; cfg.frame_len()];
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> SweepResult<()> {
        let (Some(cfg), Some(encoder)) = (self.cfg.as_ref(), self.encoder.as_mut()) else {
            return Err(SweepError::encode("ffmpeg sink not started"));
        };
        if self.last_idx.is_some_and(|last| idx <= last) {
            return Err(SweepError::encode(
                "ffmpeg sink received out-of-order frame index",
            ));
        }
        cfg.check_frame(frame)?;
        if frame.data.len() != self.scratch.len() {
            return Err(SweepError::validation(format!(
                "frame data is {} bytes, expected {}",
                frame.data.len(),
                self.scratch.len()
            )));
        }

        flatten_rgba8_to_opaque_rgba8(
            &mut self.scratch,
            &frame.data,
            frame.premultiplied,
            self.opts.background,
        );
        encoder.write(&self.scratch)?;
        self.last_idx = Some(idx);
        Ok(())
    }

    fn end(&mut self) -> SweepResult<()> {
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| SweepError::encode("ffmpeg sink not started"))?;
        self.cfg = None;
        encoder.finish()
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        if let Some(mut encoder) = self.encoder.take() {
            tracing::debug!(out = %self.opts.out_path.display(), "aborting unfinished ffmpeg encode");
            encoder.abort();
        }
    }
}

fn rate_arg(fps: Fps) -> String {
    format!("{}/{}", fps.num, fps.den)
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> SweepResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
