use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::Fps;
use crate::foundation::error::SweepResult;
use crate::render::cpu::CpuRenderer;
use crate::render::frame::FrameRGBA;
use crate::scene::config::SceneConfig;
use crate::scene::geometry::SceneGeometry;
use crate::session::config::SweepRange;

/// Renders the sweep frame by frame into a [`FrameSink`].
#[derive(Debug)]
pub struct FrameGenerator {
    renderer: CpuRenderer,
    progress_every: u64,
}

impl FrameGenerator {
    /// Prepare a renderer for `scene`.
    pub fn new(scene: SceneConfig) -> SweepResult<Self> {
        Ok(Self {
            renderer: CpuRenderer::new(scene)?,
            progress_every: 0,
        })
    }

    /// Log an `info` progress line every `n` frames (0 disables).
    pub fn with_progress_every(mut self, n: u64) -> Self {
        self.progress_every = n;
        self
    }

    /// Scene parameters in use.
    pub fn scene(&self) -> &SceneConfig {
        self.renderer.scene()
    }

    /// Render a single frame with the circle center displaced by `x` pixels.
    pub fn render_at(&mut self, x: f64) -> SweepResult<FrameRGBA> {
        let geom = SceneGeometry::at(self.renderer.scene(), x);
        self.renderer.render(&geom)
    }

    /// Render every frame of `range` into `sink`, returning the number of frames produced.
    #[tracing::instrument(skip(self, sink), fields(frames = range.frame_count()))]
    pub fn generate(
        &mut self,
        range: &SweepRange,
        fps: Fps,
        sink: &mut dyn FrameSink,
    ) -> SweepResult<u64> {
        range.validate()?;
        let total = range.frame_count();
        sink.begin(SinkConfig::for_canvas(self.scene().canvas(), fps))?;

        let mut produced = 0u64;
        for (idx, x) in range.frames() {
            let frame = self.render_at(x)?;
            sink.push_frame(idx, &frame)?;
            produced += 1;
            tracing::debug!(frame = idx.0, x, "rendered frame");
            if self.progress_every > 0 && produced % self.progress_every == 0 {
                tracing::info!("rendered {produced}/{total} frames");
            }
        }

        sink.end()?;
        Ok(produced)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/generator.rs"]
mod tests;
