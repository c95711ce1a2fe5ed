use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::core::Side;
use crate::foundation::error::{SpacebattleError, SpacebattleResult};
use crate::sim::patrol::PatrolConfig;
use crate::sim::player::PlayerProfile;

pub const DEFAULT_WINDOW_TITLE: &str = "AIR HOCKEY";
pub const DEFAULT_DELTA_T: f64 = 1.0 / 30.0;

/// Which sinks a match renders to.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub show_window: bool,
    /// Encode the match to this file when set.
    pub video_path: Option<PathBuf>,
    pub window_title: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            show_window: false,
            video_path: None,
            window_title: DEFAULT_WINDOW_TITLE.to_string(),
        }
    }
}

/// Everything needed to set up one match, read from a JSON file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MatchConfig {
    pub background: PathBuf,
    /// TTF/OTF font for names, scores and the goal banner.
    pub font: PathBuf,
    #[serde(default)]
    pub satellite_sprite: Option<PathBuf>,
    pub left: PlayerProfile,
    pub right: PlayerProfile,
    #[serde(default)]
    pub patrol: Option<PatrolConfig>,
    #[serde(default = "default_delta_t")]
    pub delta_t: f64,
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_delta_t() -> f64 {
    DEFAULT_DELTA_T
}

impl MatchConfig {
    /// Read, resolve and validate a match file.
    ///
    /// Relative paths inside the file are resolved against the file's directory.
    pub fn load(path: &Path) -> SpacebattleResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("open match config '{}'", path.display()))?;
        let mut cfg = Self::from_json(&text)?;
        let root = path.parent().unwrap_or_else(|| Path::new("."));
        cfg.resolve_paths(root);
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json(text: &str) -> SpacebattleResult<Self> {
        serde_json::from_str(text)
            .map_err(|e| SpacebattleError::serde(format!("match config: {e}")))
    }

    /// Rebase every relative path onto `root`.
    pub fn resolve_paths(&mut self, root: &Path) {
        let rebase = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = root.join(&*p);
            }
        };
        rebase(&mut self.background);
        rebase(&mut self.font);
        rebase(&mut self.left.sprite);
        rebase(&mut self.right.sprite);
        if let Some(p) = self.satellite_sprite.as_mut() {
            rebase(p);
        }
        if let Some(p) = self.output.video_path.as_mut() {
            rebase(p);
        }
    }

    pub fn validate(&self) -> SpacebattleResult<()> {
        if self.left.side != Side::Left {
            return Err(SpacebattleError::validation(
                "player 'left' must have side \"left\"",
            ));
        }
        if self.right.side != Side::Right {
            return Err(SpacebattleError::validation(
                "player 'right' must have side \"right\"",
            ));
        }
        for p in [&self.left, &self.right] {
            if p.display_name.trim().is_empty() {
                return Err(SpacebattleError::validation(format!(
                    "{} player display_name must be non-empty",
                    p.side.as_str()
                )));
            }
        }
        if !self.delta_t.is_finite() || self.delta_t <= 0.0 {
            return Err(SpacebattleError::validation("delta_t must be finite and > 0"));
        }
        if let Some(patrol) = &self.patrol {
            patrol.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
