use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::color::Rgba8;
use crate::foundation::error::{SweepError, SweepResult};
use crate::scene::config::SceneConfig;

/// Brush type stored in Parley layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Font bytes for the labels, plus the face index inside collections.
#[derive(Clone, Debug)]
pub(crate) struct LabelFont {
    pub(crate) bytes: Arc<Vec<u8>>,
    pub(crate) index: u32,
}

impl LabelFont {
    /// Load `font_path` when configured, otherwise look `font_family` up among system fonts.
    pub(crate) fn resolve(cfg: &SceneConfig) -> SweepResult<Self> {
        match cfg.font_path.as_deref() {
            Some(path) => Self::from_file(path),
            None => Self::from_system(&cfg.font_family),
        }
    }

    fn from_file(path: &Path) -> SweepResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font file '{}'", path.display()))?;
        Ok(Self {
            bytes: Arc::new(bytes),
            index: 0,
        })
    }

    fn from_system(family: &str) -> SweepResult<Self> {
        use usvg::fontdb::{Database, Family, Query};

        let mut db = Database::new();
        db.load_system_fonts();

        let families = [Family::Name(family), Family::SansSerif, Family::Serif];
        let id = db
            .query(&Query {
                families: &families,
                ..Query::default()
            })
            .ok_or_else(|| {
                SweepError::render(format!(
                    "no system font matches '{family}' or a sans-serif/serif fallback \
                     ({} faces loaded); set font_path or disable labels",
                    db.len()
                ))
            })?;

        if let Some(face) = db.face(id) {
            tracing::debug!(
                family,
                resolved = ?face.families.first().map(|(name, _)| name.as_str()),
                "resolved label font"
            );
        }

        let (bytes, index) = db
            .with_face_data(id, |data, index| (data.to_vec(), index))
            .ok_or_else(|| SweepError::render("failed to read system font data"))?;
        Ok(Self {
            bytes: Arc::new(bytes),
            index,
        })
    }
}

/// Parley-backed text shaper bound to one registered font.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
}

impl TextLayoutEngine {
    /// Register `font` and keep its family for every later layout.
    pub(crate) fn new(font: &LabelFont) -> SweepResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.bytes.to_vec()), None);

        let family_id = families
            .iter()
            .find(|(_, infos)| infos.iter().any(|info| info.index() == font.index))
            .or_else(|| families.first())
            .map(|(id, _)| *id)
            .ok_or_else(|| SweepError::render("no font families registered from font bytes"))?;

        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| SweepError::render("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    /// Shape a single line of text.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> SweepResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(SweepError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}
