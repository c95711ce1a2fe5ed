use std::path::{Path, PathBuf};

use kurbo::Point;

use crate::foundation::core::Side;

/// What the renderer needs to know about a participant, resolved once at match setup.
pub trait Player {
    fn initial_position(&self) -> Point;
    fn side(&self) -> Side;
    fn display_name(&self) -> &str;
    fn sprite_path(&self) -> &Path;
}

/// Config-backed [`Player`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlayerProfile {
    pub display_name: String,
    pub side: Side,
    pub sprite: PathBuf,
    pub initial_position: Point,
}

impl PlayerProfile {
    /// Profile placed at its side's kickoff spot on a `width` x `height` board.
    pub fn at_kickoff(
        display_name: impl Into<String>,
        side: Side,
        sprite: impl Into<PathBuf>,
        width: u32,
        height: u32,
        goal_size: f64,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            side,
            sprite: sprite.into(),
            initial_position: kickoff_position(side, width, height, goal_size),
        }
    }
}

impl Player for PlayerProfile {
    fn initial_position(&self) -> Point {
        self.initial_position
    }

    fn side(&self) -> Side {
        self.side
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn sprite_path(&self) -> &Path {
        &self.sprite
    }
}

/// Ships start one pixel inside the goal-area line, vertically centered.
pub fn kickoff_position(side: Side, width: u32, height: u32, goal_size: f64) -> Point {
    let w = f64::from(width);
    let offset = w * goal_size / 2.0 + 1.0;
    let x = match side {
        Side::Left => offset,
        Side::Right => w - offset,
    };
    Point::new(x, f64::from(height) / 2.0)
}

#[cfg(test)]
#[path = "../../tests/unit/sim/player.rs"]
mod tests;
