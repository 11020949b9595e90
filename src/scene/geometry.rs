//! Per-frame scene geometry and label placement.
//!
//! Everything here is pure arithmetic on [`SceneConfig`] values; the renderer only measures text
//! and asks these functions where to put it.

use crate::foundation::core::{Point, Size};
use crate::scene::config::SceneConfig;

/// Radius of the circle centered `x` pixels from the point column that passes through both
/// points `gap` pixels apart.
pub fn radius_for(x: f64, gap: f64) -> f64 {
    let half = gap / 2.0;
    (x * x + half * half).sqrt()
}

/// Geometry of one frame, all in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneGeometry {
    /// Horizontal displacement of the circle center from the points.
    pub x: f64,
    pub frame_center: Point,
    pub top_point: Point,
    pub bottom_point: Point,
    pub circle_center: Point,
    pub radius: f64,
}

impl SceneGeometry {
    /// Lay out the scene with the circle center displaced by `x` pixels.
    pub fn at(cfg: &SceneConfig, x: f64) -> Self {
        let frame_center = cfg.canvas().center();
        let half_gap = cfg.points_gap_px() / 2.0;
        Self {
            x,
            frame_center,
            top_point: Point::new(frame_center.x, frame_center.y - half_gap),
            bottom_point: Point::new(frame_center.x, frame_center.y + half_gap),
            circle_center: Point::new(frame_center.x + x, frame_center.y),
            radius: radius_for(x, cfg.points_gap_px()),
        }
    }

    /// Vertical midpoint between the two points.
    pub fn mid_y(&self) -> f64 {
        (self.top_point.y + self.bottom_point.y) / 2.0
    }

    /// Signed horizontal distance from the point column to the circle center.
    pub fn horizontal_offset(&self) -> f64 {
        self.circle_center.x - self.top_point.x
    }

    /// Foot of the adjacent leg: the point column at the circle center's height.
    pub fn leg_start(&self) -> Point {
        Point::new(self.top_point.x, self.circle_center.y)
    }
}

/// Convert a pixel distance into the unit the animation states on screen.
pub fn stated_value(cfg: &SceneConfig, px: f64) -> f64 {
    cfg.stated_per_px() * px
}

/// Text of the three labels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelTexts {
    pub gap: String,
    pub horizontal: String,
    pub radius: String,
}

impl LabelTexts {
    pub fn for_geometry(cfg: &SceneConfig, geom: &SceneGeometry) -> Self {
        Self {
            gap: format!("{}", cfg.stated_gap_size),
            horizontal: format!(
                "{:.1}",
                stated_value(cfg, geom.horizontal_offset().abs())
            ),
            radius: format!("{:.1}", stated_value(cfg, geom.radius)),
        }
    }
}

/// Where the radius label hangs off the hypotenuse.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadiusHook {
    /// Canvas x the label is centered on.
    pub x: f64,
    /// Height of the hypotenuse at `x`, relative to the circle center (negative is up).
    pub dy: f64,
}

/// Horizontal label offset that follows the circle center, bounded by `label_max_offset`.
pub fn follow_offset(cfg: &SceneConfig, geom: &SceneGeometry) -> f64 {
    let max = cfg.label_max_offset_px();
    (geom.horizontal_offset() / 2.0).clamp(-max, max)
}

/// Locate the radius label hook.
///
/// With the circle center directly between the points the hypotenuse is vertical, so the hook
/// takes the full point-to-center height.
pub fn radius_hook(cfg: &SceneConfig, geom: &SceneGeometry) -> RadiusHook {
    let x = geom.top_point.x + follow_offset(cfg, geom);
    let rise = geom.top_point.y - geom.circle_center.y;
    let run = geom.top_point.x - geom.circle_center.x;
    let dy = if run == 0.0 {
        rise
    } else {
        rise * ((x - geom.circle_center.x) / run).abs()
    };
    RadiusHook { x, dy }
}

/// Top-left corners of the three labels for measured text sizes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelPlacement {
    pub gap: Point,
    pub horizontal: Point,
    pub radius: Point,
}

impl LabelPlacement {
    pub fn compute(
        cfg: &SceneConfig,
        geom: &SceneGeometry,
        gap_size: Size,
        horizontal_size: Size,
        radius_size: Size,
    ) -> Self {
        let mid_y = geom.mid_y();
        let column_x = geom.top_point.x;

        // Gap label sits on the side of the point column away from the circle center.
        let side = (gap_size.width / 2.0 + cfg.gap_label_pad_px())
            .copysign(geom.top_point.x - geom.circle_center.x);
        let gap = Point::new(
            column_x - gap_size.width / 2.0 + side,
            mid_y - gap_size.height / 2.0,
        );

        let horizontal = Point::new(
            column_x - horizontal_size.width / 2.0 + follow_offset(cfg, geom),
            mid_y + cfg.below_label_pad_px(),
        );

        let hook = radius_hook(cfg, geom);
        let radius = Point::new(
            hook.x - radius_size.width / 2.0,
            mid_y + hook.dy - radius_size.height - cfg.above_label_pad_px(),
        );

        Self {
            gap,
            horizontal,
            radius,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/geometry.rs"]
mod tests;
