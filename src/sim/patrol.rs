use kurbo::Point;
use rand::Rng;

use crate::foundation::core::Side;
use crate::foundation::error::{SpacebattleError, SpacebattleResult};

/// A background satellite drifting up and down around its home position.
#[derive(Clone, Debug, PartialEq)]
pub struct PatrolEntity {
    pub home: Point,
    pub current: Point,
    /// +1 moves towards larger `y`, -1 towards smaller.
    pub direction: i8,
    pub motion_range: f64,
    pub speed: f64,
    pub side: Side,
}

impl PatrolEntity {
    pub fn new(home: Point, side: Side, direction: i8, speed: f64, motion_range: f64) -> Self {
        Self {
            home,
            current: home,
            direction: if direction < 0 { -1 } else { 1 },
            motion_range,
            speed,
            side,
        }
    }

    /// Advance one tick of `delta_t` seconds. Only `current.y` changes.
    pub fn advance(&mut self, delta_t: f64) {
        if self.direction > 0 && self.current.y > self.home.y + self.motion_range {
            self.direction = -1;
        } else if self.direction < 0 && self.current.y < self.home.y - self.motion_range {
            self.direction = 1;
        }
        self.current.y += f64::from(self.direction) * self.speed * delta_t;
    }

    /// Hook for the simulation when a shot lands; satellites don't react yet.
    pub fn on_hit(&mut self) {}
}

/// Bounds for randomized patrol sets.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PatrolConfig {
    pub count: u32,
    pub min_speed: u32,
    pub max_speed: u32,
    pub min_motion: u32,
    pub max_motion: u32,
    /// Goal area width as a fraction of board width; satellites guard its edge.
    pub goal_size: f64,
}

impl Default for PatrolConfig {
    fn default() -> Self {
        Self {
            count: 4,
            min_speed: 2,
            max_speed: 8,
            min_motion: 2,
            max_motion: 6,
            goal_size: 0.45,
        }
    }
}

impl PatrolConfig {
    pub fn validate(&self) -> SpacebattleResult<()> {
        if self.min_speed > self.max_speed {
            return Err(SpacebattleError::validation(
                "patrol min_speed must be <= max_speed",
            ));
        }
        if self.min_motion > self.max_motion {
            return Err(SpacebattleError::validation(
                "patrol min_motion must be <= max_motion",
            ));
        }
        if !(0.0..=1.0).contains(&self.goal_size) {
            return Err(SpacebattleError::validation(
                "patrol goal_size must be within [0, 1]",
            ));
        }
        Ok(())
    }
}

/// Build one side's patrol set, evenly spaced down a `width` x `height` board.
pub fn make_patrol<R: Rng + ?Sized>(
    cfg: &PatrolConfig,
    side: Side,
    width: u32,
    height: u32,
    rng: &mut R,
) -> SpacebattleResult<Vec<PatrolEntity>> {
    cfg.validate()?;

    let w = f64::from(width);
    let spacing = f64::from(height) / f64::from(cfg.count + 1);
    let x = match side {
        Side::Left => w * cfg.goal_size / 2.0 + 1.0,
        Side::Right => w - w * cfg.goal_size / 2.0 + 1.0,
    };

    let entities = (0..cfg.count)
        .map(|i| {
            let home = Point::new(x, spacing * f64::from(i + 1));
            let speed = rng.random_range(cfg.min_speed..=cfg.max_speed);
            let motion = rng.random_range(cfg.min_motion..=cfg.max_motion);
            let direction = if rng.random_bool(0.5) { 1 } else { -1 };
            PatrolEntity::new(home, side, direction, f64::from(speed), f64::from(motion))
        })
        .collect();
    Ok(entities)
}

#[cfg(test)]
#[path = "../../tests/unit/sim/patrol.rs"]
mod tests;
