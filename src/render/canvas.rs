use image::{RgbImage, RgbaImage};

use crate::foundation::core::Rgb8;
use crate::foundation::error::{SpacebattleError, SpacebattleResult};

/// Opaque RGB8 render target.
///
/// Dimensions are fixed at construction; there is no resize API. A larger target is a new
/// canvas (see [`Canvas::extended`]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    pixels: RgbImage,
}

impl Canvas {
    /// Allocate a black canvas.
    pub fn new(width: u32, height: u32) -> SpacebattleResult<Self> {
        validate_dims(width, height, "canvas")?;
        Ok(Self {
            pixels: RgbImage::new(width, height),
        })
    }

    /// Allocate a canvas filled with one color.
    pub fn filled(width: u32, height: u32, color: Rgb8) -> SpacebattleResult<Self> {
        validate_dims(width, height, "canvas")?;
        Ok(Self {
            pixels: RgbImage::from_pixel(width, height, image::Rgb(color.to_array())),
        })
    }

    /// Wrap an already decoded RGB image.
    pub fn from_image(pixels: RgbImage) -> SpacebattleResult<Self> {
        validate_dims(pixels.width(), pixels.height(), "canvas")?;
        Ok(Self { pixels })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb8> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let [r, g, b] = self.pixels.get_pixel(x, y).0;
        Some(Rgb8::new(r, g, b))
    }

    /// Packed RGB8 rows, top to bottom.
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    pub(crate) fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub fn as_image(&self) -> &RgbImage {
        &self.pixels
    }

    pub fn into_image(self) -> RgbImage {
        self.pixels
    }

    /// Build a fresh, taller canvas with `self` copied into its top rows.
    ///
    /// The new height is `round(height * ratio)`; rows below the copy are black.
    pub fn extended(&self, ratio: f64) -> SpacebattleResult<Self> {
        if !ratio.is_finite() || ratio < 1.0 {
            return Err(SpacebattleError::validation(format!(
                "extension ratio must be finite and >= 1, got {ratio}"
            )));
        }
        let height = extended_height(self.height(), ratio);
        let mut out = Self::new(self.width(), height)?;
        let src = self.as_raw();
        out.as_raw_mut()[..src.len()].copy_from_slice(src);
        Ok(out)
    }
}

/// Height of a canvas extended by `ratio`, rounded to the nearest row.
pub fn extended_height(height: u32, ratio: f64) -> u32 {
    (f64::from(height) * ratio).round() as u32
}

/// RGBA8 image with straight (non-premultiplied) alpha.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sprite {
    pixels: RgbaImage,
}

impl Sprite {
    pub fn from_image(pixels: RgbaImage) -> SpacebattleResult<Self> {
        validate_dims(pixels.width(), pixels.height(), "sprite")?;
        Ok(Self { pixels })
    }

    /// Sprite where every pixel has the same color and alpha.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> SpacebattleResult<Self> {
        validate_dims(width, height, "sprite")?;
        Ok(Self {
            pixels: RgbaImage::from_pixel(width, height, image::Rgba(rgba)),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels.get_pixel(x, y).0
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Rotate 90 degrees counter-clockwise (left-side ships face the arena).
    pub fn rotated_ccw(&self) -> Self {
        Self {
            pixels: image::imageops::rotate270(&self.pixels),
        }
    }

    /// Rotate 90 degrees clockwise (right-side ships face the arena).
    pub fn rotated_cw(&self) -> Self {
        Self {
            pixels: image::imageops::rotate90(&self.pixels),
        }
    }
}

fn validate_dims(width: u32, height: u32, what: &str) -> SpacebattleResult<()> {
    if width == 0 || height == 0 {
        return Err(SpacebattleError::validation(format!(
            "{what} width/height must be non-zero, got {width}x{height}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
