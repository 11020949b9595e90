use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{SweepError, SweepResult};
use crate::scene::config::SceneConfig;

/// Upper bound on the number of frames one sweep may produce.
pub const MAX_FRAMES: u64 = u32::MAX as u64;

/// Horizontal displacements swept by the animation, in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SweepRange {
    /// Displacement of frame 0.
    pub initial_x: f64,
    /// Last displacement that is still rendered (inclusive when reached exactly).
    pub final_x: f64,
    /// Displacement added per frame.
    pub step: f64,
}

impl Default for SweepRange {
    fn default() -> Self {
        Self {
            initial_x: -6000.0,
            final_x: 6000.0,
            step: 10.0,
        }
    }
}

impl SweepRange {
    /// Create a validated range.
    pub fn new(initial_x: f64, final_x: f64, step: f64) -> SweepResult<Self> {
        let r = Self {
            initial_x,
            final_x,
            step,
        };
        r.validate()?;
        Ok(r)
    }

    /// Check that the range is finite, increasing and has a positive step.
    pub fn validate(&self) -> SweepResult<()> {
        if !self.initial_x.is_finite() || !self.final_x.is_finite() || !self.step.is_finite() {
            return Err(SweepError::validation("sweep range values must be finite"));
        }
        if self.step <= 0.0 {
            return Err(SweepError::validation("sweep step must be > 0"));
        }
        if self.final_x < self.initial_x {
            return Err(SweepError::validation("sweep final_x must be >= initial_x"));
        }
        let steps = ((self.final_x - self.initial_x) / self.step).floor();
        if !steps.is_finite() || steps >= MAX_FRAMES as f64 {
            return Err(SweepError::validation(format!(
                "sweep step {} yields more than {MAX_FRAMES} frames",
                self.step
            )));
        }
        Ok(())
    }

    /// `floor((final_x - initial_x) / step) + 1`, saturating for ranges that fail `validate`.
    pub fn frame_count(&self) -> u64 {
        (((self.final_x - self.initial_x) / self.step).floor() as u64).saturating_add(1)
    }

    /// Displacement rendered at `idx`.
    pub fn x_at(&self, idx: FrameIndex) -> f64 {
        self.initial_x + (idx.0 as f64) * self.step
    }

    /// Frame indices paired with their displacement, in order.
    pub fn frames(&self) -> impl Iterator<Item = (FrameIndex, f64)> + '_ {
        (0..self.frame_count()).map(|i| (FrameIndex(i), self.x_at(FrameIndex(i))))
    }
}

/// Everything one run needs: what to sweep, where to write, and how to draw.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Displacements to render.
    pub range: SweepRange,
    /// Output video frame rate.
    pub fps: Fps,
    /// Directory holding the numbered frame files.
    pub frames_dir: PathBuf,
    /// Frame file name prefix; cleanup removes every file starting with it.
    pub frame_prefix: String,
    /// Output video path.
    pub output: PathBuf,
    /// JPEG quality of frame files (1-100).
    pub jpeg_quality: u8,
    /// Log progress every this many frames; 0 disables progress logging.
    pub progress_every: u64,
    /// Drawing parameters.
    pub scene: SceneConfig,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            range: SweepRange::default(),
            fps: Fps::default(),
            frames_dir: PathBuf::from("frames"),
            frame_prefix: "frame".to_owned(),
            output: PathBuf::from("video.mp4"),
            jpeg_quality: 95,
            progress_every: 100,
            scene: SceneConfig::default(),
        }
    }
}

impl SweepConfig {
    /// Parse JSON; missing fields take their defaults.
    pub fn from_json_str(s: &str) -> SweepResult<Self> {
        serde_json::from_str(s).map_err(|e| SweepError::serde(e.to_string()))
    }

    /// Read and parse a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> SweepResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&s).map_err(|e| match e {
            SweepError::Serde(msg) => {
                SweepError::serde(format!("parse config '{}': {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Pretty JSON of the effective configuration.
    pub fn to_json_pretty(&self) -> SweepResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SweepError::serde(e.to_string()))
    }

    /// Validate every section.
    pub fn validate(&self) -> SweepResult<()> {
        self.range.validate()?;
        Fps::new(self.fps.num, self.fps.den)?;
        if self.frame_prefix.is_empty() {
            return Err(SweepError::validation("frame_prefix must not be empty"));
        }
        if self.frame_prefix.contains(['/', '\\']) {
            return Err(SweepError::validation(
                "frame_prefix must not contain path separators",
            ));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(SweepError::validation("jpeg_quality must be in 1..=100"));
        }
        if self.output.as_os_str().is_empty() {
            return Err(SweepError::validation("output path must not be empty"));
        }
        self.scene.validate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;
