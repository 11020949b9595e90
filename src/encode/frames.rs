//! Numbered JPEG frame files on disk.
//!
//! Files are named `<prefix><index>.jpg` with no zero padding. Ordering always goes through the
//! parsed [`FrameIndex`], never through the file name.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{SweepError, SweepResult};
use crate::render::frame::FrameRGBA;

/// Extension of frame files.
pub const FRAME_EXTENSION: &str = "jpg";

/// A frame file with its parsed index.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct FrameFile {
    /// Position in the sequence.
    pub index: FrameIndex,
    /// Location on disk.
    pub path: PathBuf,
}

/// File name for frame `index`.
pub fn frame_file_name(prefix: &str, index: FrameIndex) -> String {
    format!("{prefix}{}.{FRAME_EXTENSION}", index.0)
}

/// Parse the index out of `<prefix><digits>.jpg`; any other name yields `None`.
pub fn parse_frame_file_name(prefix: &str, name: &str) -> Option<FrameIndex> {
    let digits = name
        .strip_prefix(prefix)?
        .strip_suffix(FRAME_EXTENSION)?
        .strip_suffix('.')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().map(FrameIndex)
}

/// Every frame file in `dir`, sorted by index.
pub fn list_frame_files(dir: &Path, prefix: &str) -> SweepResult<Vec<FrameFile>> {
    let rd = std::fs::read_dir(dir)
        .with_context(|| format!("read frames directory '{}'", dir.display()))?;

    let mut out = Vec::new();
    for entry in rd {
        let entry = entry.with_context(|| format!("list '{}'", dir.display()))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        let Some(index) = parse_frame_file_name(prefix, name) else {
            continue;
        };
        out.push(FrameFile {
            index,
            path: entry.path(),
        });
    }

    out.sort_by_key(|f| f.index);
    if let Some(w) = out.windows(2).find(|w| w[0].index == w[1].index) {
        return Err(SweepError::validation(format!(
            "frame index {} appears twice ('{}' and '{}')",
            w[0].index,
            w[0].path.display(),
            w[1].path.display()
        )));
    }
    Ok(out)
}

/// Delete every file in `dir` whose name starts with `prefix`.
///
/// A missing directory is not an error. Returns the number of files removed.
pub fn clear_frames_dir(dir: &Path, prefix: &str) -> SweepResult<usize> {
    let rd = match std::fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context(format!("read frames directory '{}'", dir.display()))
                .into());
        }
    };

    let mut removed = 0;
    for entry in rd {
        let entry = entry.with_context(|| format!("list '{}'", dir.display()))?;
        let starts_with_prefix = entry
            .file_name()
            .to_str()
            .is_some_and(|n| n.starts_with(prefix));
        if !starts_with_prefix || !entry.path().is_file() {
            continue;
        }
        let path = entry.path();
        std::fs::remove_file(&path)
            .with_context(|| format!("remove stale frame '{}'", path.display()))?;
        removed += 1;
    }
    Ok(removed)
}

/// Write `frame` as a JPEG, flattening alpha over `bg`.
pub fn write_jpeg(path: &Path, frame: &FrameRGBA, quality: u8, bg: [u8; 3]) -> SweepResult<()> {
    let rgb = frame.to_rgb8(bg)?;
    let file =
        File::create(path).with_context(|| format!("create frame file '{}'", path.display()))?;
    let mut encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(BufWriter::new(file), quality);
    encoder
        .encode(&rgb, frame.width, frame.height, image::ExtendedColorType::Rgb8)
        .with_context(|| format!("encode jpeg '{}'", path.display()))?;
    Ok(())
}

/// Decode a frame file into straight-alpha RGBA.
pub fn read_frame(path: &Path) -> SweepResult<FrameRGBA> {
    let img = image::open(path)
        .with_context(|| format!("decode frame file '{}'", path.display()))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    FrameRGBA::from_straight(width, height, img.into_raw())
}

/// Sink writing each frame to `<dir>/<prefix><index>.jpg`.
#[derive(Debug)]
pub struct JpegSequenceSink {
    dir: PathBuf,
    prefix: String,
    quality: u8,
    bg: [u8; 3],
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
}

impl JpegSequenceSink {
    /// Create a sink for `dir`; the directory is created in `begin`.
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>, quality: u8) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            quality,
            bg: [0, 0, 0],
            cfg: None,
            last_idx: None,
        }
    }

    /// Background used when a frame carries transparency.
    pub fn with_background(mut self, bg: [u8; 3]) -> Self {
        self.bg = bg;
        self
    }
}

impl FrameSink for JpegSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> SweepResult<()> {
        if self.prefix.is_empty() {
            return Err(SweepError::validation("frame prefix must not be empty"));
        }
        if !(1..=100).contains(&self.quality) {
            return Err(SweepError::validation("jpeg quality must be in 1..=100"));
        }
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create frames directory '{}'", self.dir.display()))?;
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> SweepResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| SweepError::encode("jpeg sequence sink not started"))?;
        cfg.check_frame(frame)?;
        if self.last_idx.is_some_and(|last| idx <= last) {
            return Err(SweepError::encode(
                "jpeg sequence sink received out-of-order frame index",
            ));
        }

        let path = self.dir.join(frame_file_name(&self.prefix, idx));
        write_jpeg(&path, frame, self.quality, self.bg)?;
        self.last_idx = Some(idx);
        Ok(())
    }

    fn end(&mut self) -> SweepResult<()> {
        self.cfg = None;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/frames.rs"]
mod tests;
