use kurbo::Point;

use crate::foundation::core::Side;
use crate::foundation::error::{SpacebattleError, SpacebattleResult};

/// Goals scored by each side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Goals {
    pub left: u32,
    pub right: u32,
}

impl Goals {
    pub fn for_side(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Immutable per-tick snapshot produced by the simulation.
///
/// Ship 1 always defends the left goal and ship 2 the right one.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderState {
    pub puck_pos: Point,
    pub puck_radius: u32,
    pub ship1_pos: Point,
    pub ship2_pos: Point,
    #[serde(default)]
    pub goals: Goals,
    /// Side that just scored; `None` during normal play.
    #[serde(default)]
    pub goal_side: Option<Side>,
    /// Patrol entity positions, drawn with the satellite sprite when one is loaded.
    #[serde(default)]
    pub satellites: Vec<Point>,
}

impl RenderState {
    pub fn is_goal(&self) -> bool {
        self.goal_side.is_some()
    }

    /// Parse a JSON-lines replay (one snapshot per non-empty line).
    pub fn parse_replay(text: &str) -> SpacebattleResult<Vec<Self>> {
        let mut out = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let state: Self = serde_json::from_str(line).map_err(|e| {
                SpacebattleError::serde(format!("replay line {}: {e}", line_no + 1))
            })?;
            out.push(state);
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sim/state.rs"]
mod tests;
