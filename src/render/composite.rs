use kurbo::Point;

use crate::foundation::core::{Rgb8, round_point};
use crate::foundation::error::{SpacebattleError, SpacebattleResult};
use crate::render::canvas::{Canvas, Sprite};

/// Blend one straight-alpha RGBA pixel over an opaque RGB pixel.
///
/// `out = a * src + (1 - a) * dst` with `a = src_alpha / 255`.
pub fn over(dst: [u8; 3], src: [u8; 4]) -> [u8; 3] {
    match src[3] {
        0 => dst,
        255 => [src[0], src[1], src[2]],
        a => {
            let alpha = f32::from(a) / 255.0;
            let inv = 1.0 - alpha;
            let mut out = [0u8; 3];
            for i in 0..3 {
                let v = alpha * f32::from(src[i]) + inv * f32::from(dst[i]);
                out[i] = v.round().clamp(0.0, 255.0) as u8;
            }
            out
        }
    }
}

/// Flatten one premultiplied RGBA pixel over an opaque RGB pixel.
pub fn over_premul(dst: [u8; 3], src: [u8; 4]) -> [u8; 3] {
    let a = u16::from(src[3]);
    if a == 0 {
        return dst;
    }
    if a == 255 {
        return [src[0], src[1], src[2]];
    }
    let inv = 255u16 - a;
    let mut out = [0u8; 3];
    for i in 0..3 {
        let v = u16::from(src[i]) + mul_div255(u16::from(dst[i]), inv);
        out[i] = v.min(255) as u8;
    }
    out
}

/// Top-left corner and size of a sprite centered on `anchor`, after rounding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpriteBox {
    pub x0: i64,
    pub y0: i64,
    pub width: u32,
    pub height: u32,
}

impl SpriteBox {
    pub fn centered(anchor: Point, width: u32, height: u32) -> SpacebattleResult<Self> {
        let p = round_point(anchor)?;
        Ok(Self {
            x0: p.x.saturating_sub(i64::from(width / 2)),
            y0: p.y.saturating_sub(i64::from(height / 2)),
            width,
            height,
        })
    }

    pub fn fits_within(&self, canvas_width: u32, canvas_height: u32) -> bool {
        // Widened so a box near the i64 limits cannot wrap back into range.
        self.x0 >= 0
            && self.y0 >= 0
            && i128::from(self.x0) + i128::from(self.width) <= i128::from(canvas_width)
            && i128::from(self.y0) + i128::from(self.height) <= i128::from(canvas_height)
    }
}

/// Alpha-blend `sprite` onto `canvas`, centered on `anchor`.
///
/// Fails with [`SpacebattleError::OutOfBounds`] when any part of the sprite would land
/// outside the canvas; the canvas is not modified in that case.
pub fn draw_sprite(canvas: &mut Canvas, sprite: &Sprite, anchor: Point) -> SpacebattleResult<()> {
    let bbox = SpriteBox::centered(anchor, sprite.width(), sprite.height())?;
    if !bbox.fits_within(canvas.width(), canvas.height()) {
        return Err(SpacebattleError::out_of_bounds(format!(
            "sprite {}x{} at ({}, {}) exceeds canvas {}x{}",
            bbox.width,
            bbox.height,
            bbox.x0,
            bbox.y0,
            canvas.width(),
            canvas.height()
        )));
    }

    let stride = canvas.width() as usize * 3;
    let (x0, y0) = (bbox.x0 as usize, bbox.y0 as usize);
    let dst = canvas.as_raw_mut();
    for (sy, row) in sprite.as_image().rows().enumerate() {
        let row_start = (y0 + sy) * stride + x0 * 3;
        let dst_row = &mut dst[row_start..row_start + bbox.width as usize * 3];
        for (d, s) in dst_row.chunks_exact_mut(3).zip(row) {
            let out = over([d[0], d[1], d[2]], s.0);
            d.copy_from_slice(&out);
        }
    }
    Ok(())
}

/// Fill every pixel whose center lies within `radius` of the rounded `center`.
///
/// Pixels outside the canvas are skipped.
pub fn fill_disc(
    canvas: &mut Canvas,
    center: Point,
    radius: u32,
    color: Rgb8,
) -> SpacebattleResult<()> {
    let c = round_point(center)?;
    let r = i64::from(radius);
    let r2 = i128::from(r) * i128::from(r);

    let (w, h) = (i64::from(canvas.width()), i64::from(canvas.height()));
    let y_lo = c.y.saturating_sub(r).max(0);
    let y_hi = c.y.saturating_add(r).min(h - 1);
    let x_lo = c.x.saturating_sub(r).max(0);
    let x_hi = c.x.saturating_add(r).min(w - 1);
    if y_lo > y_hi || x_lo > x_hi {
        return Ok(());
    }

    let stride = canvas.width() as usize * 3;
    let rgb = color.to_array();
    let dst = canvas.as_raw_mut();
    for y in y_lo..=y_hi {
        let dy = i128::from(y) - i128::from(c.y);
        for x in x_lo..=x_hi {
            let dx = i128::from(x) - i128::from(c.x);
            if dx * dx + dy * dy <= r2 {
                let idx = y as usize * stride + x as usize * 3;
                dst[idx..idx + 3].copy_from_slice(&rgb);
            }
        }
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
