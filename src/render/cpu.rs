use kurbo::{Circle, Line, Shape, Stroke, StrokeOpts};

use crate::foundation::color::Rgba8;
use crate::foundation::core::{Affine, BezPath, Point, Size};
use crate::foundation::error::{SweepError, SweepResult};
use crate::render::frame::FrameRGBA;
use crate::render::text::{LabelFont, TextBrushRgba8, TextLayoutEngine};
use crate::scene::config::SceneConfig;
use crate::scene::geometry::{LabelPlacement, LabelTexts, SceneGeometry};

const PATH_TOLERANCE: f64 = 0.1;

struct LabelText {
    engine: TextLayoutEngine,
    font: vello_cpu::peniko::FontData,
}

/// CPU rasterizer for the scene, backed by `vello_cpu`.
///
/// Each call to [`CpuRenderer::render`] draws onto a fresh pixmap; only the render context and
/// the shaped font are kept between frames.
pub struct CpuRenderer {
    scene: SceneConfig,
    width: u16,
    height: u16,
    ctx: Option<vello_cpu::RenderContext>,
    labels: Option<LabelText>,
}

impl std::fmt::Debug for CpuRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuRenderer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("labels", &self.labels.is_some())
            .finish()
    }
}

impl CpuRenderer {
    /// Validate `scene` and prepare the label font when labels are enabled.
    pub fn new(scene: SceneConfig) -> SweepResult<Self> {
        scene.validate()?;
        let canvas = scene.canvas();
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| SweepError::validation("canvas width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| SweepError::validation("canvas height exceeds u16"))?;

        let labels = if scene.draw_labels {
            let font = LabelFont::resolve(&scene)?;
            let engine = TextLayoutEngine::new(&font)?;
            let font = vello_cpu::peniko::FontData::new(
                vello_cpu::peniko::Blob::from(font.bytes.to_vec()),
                font.index,
            );
            Some(LabelText { engine, font })
        } else {
            None
        };

        Ok(Self {
            scene,
            width,
            height,
            ctx: None,
            labels,
        })
    }

    /// Scene parameters this renderer draws with.
    pub fn scene(&self) -> &SceneConfig {
        &self.scene
    }

    /// Draw one frame of the animation.
    pub fn render(&mut self, geom: &SceneGeometry) -> SweepResult<FrameRGBA> {
        let mut ctx = match self.ctx.take() {
            Some(ctx) => ctx,
            None => vello_cpu::RenderContext::new(self.width, self.height),
        };
        ctx.reset();

        let out = self.draw(&mut ctx, geom);
        let frame = out.map(|()| {
            ctx.flush();
            let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
            ctx.render_to_pixmap(&mut pixmap);
            FrameRGBA {
                width: u32::from(self.width),
                height: u32::from(self.height),
                data: pixmap.data_as_u8_slice().to_vec(),
                premultiplied: true,
            }
        });
        self.ctx = Some(ctx);
        frame
    }

    fn draw(&mut self, ctx: &mut vello_cpu::RenderContext, geom: &SceneGeometry) -> SweepResult<()> {
        let scene = &self.scene;
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

        ctx.set_paint(scene.background_color.to_cpu());
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));

        // The outline radius is truncated to whole pixels.
        let outline = Circle::new(geom.circle_center, geom.radius.trunc());
        fill_stroked(
            ctx,
            &outline,
            scene.circle_line_thickness_px(),
            scene.circle_color,
        );

        // Lines share one layer so overlaps are not blended twice.
        ctx.push_opacity_layer(scene.infoline_color.opacity());
        for line in [
            Line::new(geom.top_point, geom.bottom_point),
            Line::new(geom.top_point, geom.circle_center),
            Line::new(geom.leg_start(), geom.circle_center),
        ] {
            fill_stroked(
                ctx,
                &line,
                scene.infoline_thickness_px(),
                scene.infoline_color.opaque(),
            );
        }
        ctx.pop_layer();

        if let Some(labels) = self.labels.as_mut() {
            draw_labels(ctx, labels, scene, geom)?;
        }

        fill_disk(
            ctx,
            geom.circle_center,
            scene.circle_center_radius_px(),
            scene.circle_center_color,
        );
        fill_disk(
            ctx,
            geom.top_point,
            scene.points_radius_px(),
            scene.point_color,
        );
        fill_disk(
            ctx,
            geom.bottom_point,
            scene.points_radius_px(),
            scene.point_color,
        );
        Ok(())
    }
}

fn draw_labels(
    ctx: &mut vello_cpu::RenderContext,
    labels: &mut LabelText,
    scene: &SceneConfig,
    geom: &SceneGeometry,
) -> SweepResult<()> {
    let texts = LabelTexts::for_geometry(scene, geom);
    let size_px = scene.font_size_px() as f32;
    let brush = TextBrushRgba8::from(scene.text_color.opaque());

    let gap = labels.engine.layout_line(&texts.gap, size_px, brush)?;
    let horizontal = labels.engine.layout_line(&texts.horizontal, size_px, brush)?;
    let radius = labels.engine.layout_line(&texts.radius, size_px, brush)?;

    let placement = LabelPlacement::compute(
        scene,
        geom,
        layout_size(&gap),
        layout_size(&horizontal),
        layout_size(&radius),
    );

    ctx.push_opacity_layer(scene.text_color.opacity());
    for (layout, origin) in [
        (&gap, placement.gap),
        (&horizontal, placement.horizontal),
        (&radius, placement.radius),
    ] {
        draw_layout(ctx, &labels.font, layout, origin);
    }
    ctx.pop_layer();
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    Ok(())
}

fn layout_size(layout: &parley::Layout<TextBrushRgba8>) -> Size {
    Size::new(f64::from(layout.width()), f64::from(layout.height()))
}

fn draw_layout(
    ctx: &mut vello_cpu::RenderContext,
    font: &vello_cpu::peniko::FontData,
    layout: &parley::Layout<TextBrushRgba8>,
    origin: Point,
) {
    ctx.set_transform(affine_to_cpu(Affine::translate(origin.to_vec2())));
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
}

fn fill_stroked(ctx: &mut vello_cpu::RenderContext, shape: &impl Shape, width: f64, color: Rgba8) {
    let outline = kurbo::stroke(
        shape.path_elements(PATH_TOLERANCE),
        &Stroke::new(width),
        &StrokeOpts::default(),
        PATH_TOLERANCE,
    );
    ctx.set_paint(color.to_cpu());
    ctx.fill_path(&bezpath_to_cpu(&outline));
}

fn fill_disk(ctx: &mut vello_cpu::RenderContext, center: Point, radius: f64, color: Rgba8) {
    let disk = Circle::new(center, radius).to_path(PATH_TOLERANCE);
    ctx.set_paint(color.to_cpu());
    ctx.fill_path(&bezpath_to_cpu(&disk));
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
