use crate::foundation::error::{SpacebattleError, SpacebattleResult};

pub use kurbo::Point;

/// Opaque RGB8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Which half of the arena a player defends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// Integer pixel coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelPoint {
    pub x: i64,
    pub y: i64,
}

impl PixelPoint {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Round a canvas-space point to the nearest pixel (half away from zero).
pub fn round_point(p: Point) -> SpacebattleResult<PixelPoint> {
    Ok(PixelPoint {
        x: round_coord(p.x)?,
        y: round_coord(p.y)?,
    })
}

pub(crate) fn round_coord(v: f64) -> SpacebattleResult<i64> {
    if !v.is_finite() {
        return Err(SpacebattleError::validation(format!(
            "coordinate must be finite, got {v}"
        )));
    }
    Ok(v.round() as i64)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
