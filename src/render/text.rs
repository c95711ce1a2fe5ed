use kurbo::Point;
use vello_cpu::kurbo::{Affine, Cap, Join, Stroke, Vec2};

use crate::foundation::core::{PixelPoint, Rgb8, round_point};
use crate::foundation::error::{SpacebattleError, SpacebattleResult};
use crate::render::canvas::Canvas;
use crate::render::composite::over_premul;
use crate::render::font::{ShapedText, TextEngine};

/// Outline strokes are this many times wider than the foreground stroke.
pub const HALO_FACTOR: f64 = 3.0;

/// Font size, in pixels per em, of a label drawn at scale 1.
pub const EM_PX: f64 = 30.0;

/// Horizontal placement of a label relative to its anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Text starts at the anchor.
    Left,
    /// Text ends at the anchor.
    Right,
    /// Text is centered on the anchor.
    Center,
}

/// Colors and stroke geometry for one label.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub color: Rgb8,
    pub outline: Rgb8,
    pub scale: f64,
    pub thickness: u32,
}

impl TextStyle {
    fn validate(&self) -> SpacebattleResult<()> {
        validate_scale(self.scale)?;
        if self.thickness == 0 {
            return Err(SpacebattleError::validation("text thickness must be > 0"));
        }
        Ok(())
    }
}

/// Measured label extent in pixels (baseline to ascent line, plus stroke).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextSize {
    pub width: u32,
    pub height: u32,
}

/// Measure `text` at `scale` with strokes of `thickness` pixels.
pub fn measure_text(
    engine: &mut TextEngine,
    text: &str,
    scale: f64,
    thickness: u32,
) -> SpacebattleResult<TextSize> {
    validate_scale(scale)?;
    let shaped = engine.shape(text, font_px(scale))?;
    Ok(label_size(&shaped, thickness))
}

/// Baseline-left origin for a label of `size` placed at `anchor`.
pub fn text_origin(anchor: PixelPoint, size: TextSize, align: Alignment) -> PixelPoint {
    let x = match align {
        Alignment::Left => anchor.x,
        Alignment::Right => anchor.x.saturating_sub(i64::from(size.width)),
        Alignment::Center => {
            anchor.x.saturating_sub((f64::from(size.width) / 2.0).round() as i64)
        }
    };
    PixelPoint::new(x, anchor.y)
}

/// Draw `text` at `anchor` with a halo in `style.outline`, then the body in `style.color`.
///
/// `anchor.y` is the baseline. Returns the measured size so callers can stack labels.
pub fn draw_text(
    canvas: &mut Canvas,
    engine: &mut TextEngine,
    text: &str,
    anchor: Point,
    style: &TextStyle,
    align: Alignment,
) -> SpacebattleResult<TextSize> {
    style.validate()?;

    let shaped = engine.shape(text, font_px(style.scale))?;
    let size = label_size(&shaped, style.thickness);
    let origin = text_origin(round_point(anchor)?, size, align);

    let Some(region) = text_region(canvas, origin, &shaped, style)? else {
        return Ok(size);
    };

    let font = engine.font().data();
    let halo_width = f64::from(style.thickness) * HALO_FACTOR;

    let mut ctx = vello_cpu::RenderContext::new(region.width, region.height);
    ctx.set_transform(Affine::translate(Vec2::new(
        (origin.x - i64::from(region.x)) as f64,
        (origin.y - i64::from(region.y)) as f64,
    )));
    for (paint, width) in [
        (style.outline, halo_width),
        (style.color, f64::from(style.thickness)),
    ] {
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            paint.r, paint.g, paint.b, 255,
        ));
        ctx.set_stroke(
            Stroke::new(width)
                .with_caps(Cap::Round)
                .with_join(Join::Round),
        );
        ctx.glyph_run(font)
            .font_size(shaped.font_size)
            .fill_glyphs(shaped.glyphs.iter().copied());
        ctx.glyph_run(font)
            .font_size(shaped.font_size)
            .stroke_glyphs(shaped.glyphs.iter().copied());
    }
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(region.width, region.height);
    ctx.render_to_pixmap(&mut pixmap);
    blend_pixmap(canvas, &pixmap, &region);

    Ok(size)
}

fn validate_scale(scale: f64) -> SpacebattleResult<()> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(SpacebattleError::validation(
            "text scale must be finite and > 0",
        ));
    }
    Ok(())
}

fn font_px(scale: f64) -> f32 {
    (EM_PX * scale) as f32
}

fn label_size(shaped: &ShapedText, thickness: u32) -> TextSize {
    let width = shaped.advance + f64::from(thickness);
    let height = shaped.ascent + f64::from((thickness + 1) / 2);
    TextSize {
        width: width.round().max(0.0) as u32,
        height: height.round().max(0.0) as u32,
    }
}

/// Canvas-space rectangle covered by the rasterized label.
#[derive(Clone, Copy, Debug)]
struct Region {
    x: u32,
    y: u32,
    width: u16,
    height: u16,
}

fn text_region(
    canvas: &Canvas,
    origin: PixelPoint,
    shaped: &ShapedText,
    style: &TextStyle,
) -> SpacebattleResult<Option<Region>> {
    let pad = (f64::from(style.thickness) * HALO_FACTOR / 2.0).ceil() as i64 + 1;
    let advance = shaped.advance.ceil() as i64;
    let ascent = shaped.ascent.ceil() as i64;
    let descent = shaped.descent.ceil() as i64;

    let x0 = origin.x.saturating_sub(pad).max(0);
    let y0 = origin.y.saturating_sub(ascent).saturating_sub(pad).max(0);
    let x1 = origin
        .x
        .saturating_add(advance)
        .saturating_add(pad)
        .min(i64::from(canvas.width()));
    let y1 = origin
        .y
        .saturating_add(descent)
        .saturating_add(pad)
        .min(i64::from(canvas.height()));
    if x0 >= x1 || y0 >= y1 {
        return Ok(None);
    }

    let (width, height) = (x1 - x0, y1 - y0);
    let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
        return Err(SpacebattleError::validation(format!(
            "text region {width}x{height} exceeds the {}px rasterizer limit",
            u16::MAX
        )));
    };
    Ok(Some(Region {
        x: x0 as u32,
        y: y0 as u32,
        width: w,
        height: h,
    }))
}

fn blend_pixmap(canvas: &mut Canvas, pixmap: &vello_cpu::Pixmap, region: &Region) {
    let stride = canvas.width() as usize * 3;
    let src_stride = usize::from(region.width) * 4;
    let src = pixmap.data_as_u8_slice();
    let dst = canvas.as_raw_mut();

    for row in 0..usize::from(region.height) {
        let src_row = &src[row * src_stride..(row + 1) * src_stride];
        let start = (region.y as usize + row) * stride + region.x as usize * 3;
        let dst_row = &mut dst[start..start + usize::from(region.width) * 3];
        for (d, s) in dst_row.chunks_exact_mut(3).zip(src_row.chunks_exact(4)) {
            let out = over_premul([d[0], d[1], d[2]], [s[0], s[1], s[2], s[3]]);
            d.copy_from_slice(&out);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
