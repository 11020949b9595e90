use std::path::PathBuf;

use crate::encode::frames::{FrameFile, list_frame_files, read_frame};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{SweepError, SweepResult};

/// Reads numbered frame files back and streams them into a video sink.
#[derive(Clone, Debug)]
pub struct VideoAssembler {
    frames_dir: PathBuf,
    prefix: String,
}

impl VideoAssembler {
    /// Assemble files named `<prefix><index>.jpg` from `frames_dir`.
    pub fn new(frames_dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            frames_dir: frames_dir.into(),
            prefix: prefix.into(),
        }
    }

    /// Frame files in the order they will be encoded.
    pub fn frame_files(&self) -> SweepResult<Vec<FrameFile>> {
        list_frame_files(&self.frames_dir, &self.prefix)
    }

    /// Decode every frame in index order and push it into `sink` at `fps`.
    ///
    /// Every frame must match `canvas`. Returns the number of frames encoded.
    #[tracing::instrument(skip(self, sink), fields(dir = %self.frames_dir.display()))]
    pub fn assemble(
        &self,
        canvas: Canvas,
        fps: Fps,
        sink: &mut dyn FrameSink,
    ) -> SweepResult<u64> {
        let files = self.frame_files()?;
        if files.is_empty() {
            return Err(SweepError::validation(format!(
                "no '{}<index>.jpg' frame files found in '{}'",
                self.prefix,
                self.frames_dir.display()
            )));
        }

        sink.begin(SinkConfig::for_canvas(canvas, fps))?;
        let mut encoded = 0u64;
        for file in &files {
            let frame = read_frame(&file.path)?;
            sink.push_frame(file.index, &frame)?;
            encoded += 1;
            tracing::debug!(frame = file.index.0, path = %file.path.display(), "encoded frame");
        }
        sink.end()?;
        Ok(encoded)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/assembler.rs"]
mod tests;
