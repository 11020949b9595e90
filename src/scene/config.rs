use std::path::PathBuf;

use crate::foundation::color::Rgba8;
use crate::foundation::core::Canvas;
use crate::foundation::error::{SweepError, SweepResult};

/// Drawing parameters for one animation.
///
/// Lengths are stored in design units (the 1920x1080 layout) and multiplied by
/// [`SceneConfig::scale_factor`] through the `*_px` accessors, so the same value can be rendered
/// at several resolutions without touching the individual sizes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Canvas width in design units.
    pub base_width: u32,
    /// Canvas height in design units.
    pub base_height: u32,
    /// Multiplier applied to every design-unit length.
    pub scale_factor: f64,

    /// Stroke width of the circle outline.
    pub circle_line_thickness: f64,
    /// Radius of the circle center marker.
    pub circle_center_radius: f64,
    /// Vertical distance between the two fixed points.
    pub points_gap: f64,
    /// Radius of the fixed point markers.
    pub points_radius: f64,
    /// Stroke width of the measurement lines.
    pub infoline_thickness: f64,

    pub circle_color: Rgba8,
    pub circle_center_color: Rgba8,
    pub point_color: Rgba8,
    pub background_color: Rgba8,
    /// Measurement line color; alpha is the overlay opacity.
    pub infoline_color: Rgba8,
    /// Label color; alpha is the overlay opacity.
    pub text_color: Rgba8,

    /// Value the point-to-point gap is labelled with.
    pub stated_gap_size: f64,

    /// Whether the numeric labels are drawn at all.
    pub draw_labels: bool,
    /// Preferred system font family for labels.
    pub font_family: String,
    /// Font file to use instead of a system lookup.
    pub font_path: Option<PathBuf>,
    /// Label font size in design units.
    pub font_size: f64,

    /// Horizontal gap between the point column and the gap label.
    pub gap_label_pad: f64,
    /// Vertical gap between the adjacent leg and the horizontal label.
    pub below_label_pad: f64,
    /// Vertical gap between the hypotenuse and the radius label.
    pub above_label_pad: f64,
    /// Bound on how far the horizontal and radius labels follow the circle center.
    pub label_max_offset: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            base_width: 1920,
            base_height: 1080,
            scale_factor: 2.0,

            circle_line_thickness: 10.0,
            circle_center_radius: 10.0,
            points_gap: 300.0,
            points_radius: 10.0,
            infoline_thickness: 5.0,

            circle_color: Rgba8::rgb(200, 30, 30),
            circle_center_color: Rgba8::rgb(150, 170, 150),
            point_color: Rgba8::rgb(220, 220, 220),
            background_color: Rgba8::rgb(15, 20, 15),
            infoline_color: Rgba8::rgba(150, 170, 150, 150),
            text_color: Rgba8::rgba(150, 170, 150, 150),

            stated_gap_size: 2.0,

            draw_labels: true,
            font_family: "Cambria Math".to_owned(),
            font_path: None,
            font_size: 60.0,

            gap_label_pad: 15.0,
            below_label_pad: 20.0,
            above_label_pad: 20.0,
            label_max_offset: 300.0,
        }
    }
}

impl SceneConfig {
    /// Default scene rendered at `scale_factor`.
    pub fn scaled(scale_factor: f64) -> Self {
        Self {
            scale_factor,
            ..Self::default()
        }
    }

    /// Check every size and the derived canvas.
    pub fn validate(&self) -> SweepResult<()> {
        if !self.scale_factor.is_finite() || self.scale_factor <= 0.0 {
            return Err(SweepError::validation(
                "scale_factor must be finite and > 0",
            ));
        }

        let positive = [
            ("circle_line_thickness", self.circle_line_thickness),
            ("circle_center_radius", self.circle_center_radius),
            ("points_gap", self.points_gap),
            ("points_radius", self.points_radius),
            ("infoline_thickness", self.infoline_thickness),
            ("stated_gap_size", self.stated_gap_size),
            ("font_size", self.font_size),
        ];
        for (name, v) in positive {
            if !v.is_finite() || v <= 0.0 {
                return Err(SweepError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }

        let non_negative = [
            ("gap_label_pad", self.gap_label_pad),
            ("below_label_pad", self.below_label_pad),
            ("above_label_pad", self.above_label_pad),
            ("label_max_offset", self.label_max_offset),
        ];
        for (name, v) in non_negative {
            if !v.is_finite() || v < 0.0 {
                return Err(SweepError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }

        let canvas = self.canvas();
        if canvas.width == 0 || canvas.height == 0 {
            return Err(SweepError::validation("canvas width/height must be non-zero"));
        }
        if canvas.width > u32::from(u16::MAX) || canvas.height > u32::from(u16::MAX) {
            return Err(SweepError::validation(format!(
                "canvas {}x{} exceeds the rasterizer limit of {} pixels per side",
                canvas.width,
                canvas.height,
                u16::MAX
            )));
        }
        if !canvas.width.is_multiple_of(2) || !canvas.height.is_multiple_of(2) {
            return Err(SweepError::validation(
                "canvas width/height must be even (required for yuv420p mp4 output)",
            ));
        }

        if self.draw_labels && self.font_path.is_none() && self.font_family.trim().is_empty() {
            return Err(SweepError::validation(
                "font_family must be set when labels are drawn without font_path",
            ));
        }
        Ok(())
    }

    /// Output canvas in pixels.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: (f64::from(self.base_width) * self.scale_factor).round() as u32,
            height: (f64::from(self.base_height) * self.scale_factor).round() as u32,
        }
    }

    fn px(&self, design: f64) -> f64 {
        design * self.scale_factor
    }

    pub fn circle_line_thickness_px(&self) -> f64 {
        self.px(self.circle_line_thickness)
    }

    pub fn circle_center_radius_px(&self) -> f64 {
        self.px(self.circle_center_radius)
    }

    /// Point-to-point distance in pixels.
    pub fn points_gap_px(&self) -> f64 {
        self.px(self.points_gap)
    }

    pub fn points_radius_px(&self) -> f64 {
        self.px(self.points_radius)
    }

    pub fn infoline_thickness_px(&self) -> f64 {
        self.px(self.infoline_thickness)
    }

    pub fn font_size_px(&self) -> f64 {
        self.px(self.font_size)
    }

    pub fn gap_label_pad_px(&self) -> f64 {
        self.px(self.gap_label_pad)
    }

    pub fn below_label_pad_px(&self) -> f64 {
        self.px(self.below_label_pad)
    }

    pub fn above_label_pad_px(&self) -> f64 {
        self.px(self.above_label_pad)
    }

    pub fn label_max_offset_px(&self) -> f64 {
        self.px(self.label_max_offset)
    }

    /// Stated (display) units per pixel.
    pub fn stated_per_px(&self) -> f64 {
        self.stated_gap_size / self.points_gap_px()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
