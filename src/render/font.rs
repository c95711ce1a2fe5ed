//! Label typeface and Parley text shaping.
//!
//! A [`LabelFont`] is validated font bytes plus the family name they register under. A
//! [`TextEngine`] owns the Parley contexts and turns a string into positioned glyphs that
//! `vello_cpu` can fill and stroke.

use std::borrow::Cow;
use std::path::Path;

use vello_cpu::peniko::{Blob, FontData};

use crate::foundation::error::{SpacebattleError, SpacebattleResult};

/// Font bytes for scoreboard and banner labels.
#[derive(Clone)]
pub struct LabelFont {
    data: FontData,
    family: String,
}

impl std::fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelFont")
            .field("family", &self.family)
            .field("font_bytes_len", &self.bytes().len())
            .finish()
    }
}

impl LabelFont {
    /// Validate `bytes` as a font (first face of a TTF/OTF/collection).
    pub fn from_bytes(bytes: Vec<u8>) -> SpacebattleResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let family = register_family(&mut font_ctx, &bytes)?;
        Ok(Self {
            data: FontData::new(Blob::from(bytes), 0),
            family,
        })
    }

    pub fn load(path: &Path) -> SpacebattleResult<Self> {
        crate::assets::decode::load_font(path)
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn data(&self) -> &FontData {
        &self.data
    }

    fn bytes(&self) -> &[u8] {
        self.data.data.as_ref()
    }
}

fn register_family(
    font_ctx: &mut parley::FontContext,
    bytes: &[u8],
) -> SpacebattleResult<String> {
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
    let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
        SpacebattleError::validation("no font families registered from font bytes")
    })?;
    let name = font_ctx
        .collection
        .family_name(family_id)
        .ok_or_else(|| SpacebattleError::validation("registered font family has no name"))?;
    Ok(name.to_string())
}

/// One shaped label: glyphs positioned relative to the baseline-left origin.
#[derive(Clone, Debug)]
pub struct ShapedText {
    pub glyphs: Vec<vello_cpu::Glyph>,
    /// Pixels per em.
    pub font_size: f32,
    /// Pen advance of the whole string.
    pub advance: f64,
    /// Line ascent above the baseline.
    pub ascent: f64,
    /// Line descent below the baseline.
    pub descent: f64,
}

/// Stateful Parley shaper bound to one [`LabelFont`].
pub struct TextEngine {
    font: LabelFont,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
}

impl std::fmt::Debug for TextEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextEngine")
            .field("font", &self.font)
            .finish_non_exhaustive()
    }
}

impl TextEngine {
    pub fn new(font: LabelFont) -> Self {
        let mut font_ctx = parley::FontContext::default();
        font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.bytes().to_vec()), None);
        Self {
            font,
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    pub fn font(&self) -> &LabelFont {
        &self.font
    }

    /// Shape `text` on a single unbroken line at `size_px` pixels per em.
    pub fn shape(&mut self, text: &str, size_px: f32) -> SpacebattleResult<ShapedText> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(SpacebattleError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.font.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);

        let mut glyphs = Vec::new();
        let (mut ascent, mut descent) = (0.0f32, 0.0f32);
        for line in layout.lines() {
            let metrics = line.metrics();
            ascent = ascent.max(metrics.ascent);
            descent = descent.max(metrics.descent);
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let baseline = run.baseline();
                glyphs.extend(run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y - baseline,
                }));
            }
        }

        Ok(ShapedText {
            glyphs,
            font_size: size_px,
            advance: f64::from(layout.width()),
            ascent: f64::from(ascent),
            descent: f64::from(descent),
        })
    }
}

/// The vendored test font under `tests/data/fonts`.
#[cfg(test)]
pub(crate) fn fixture() -> LabelFont {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/fonts/DejaVuSans.ttf");
    LabelFont::load(&path).expect("vendored test font")
}

#[cfg(test)]
#[path = "../../tests/unit/render/font.rs"]
mod tests;
