pub mod decode;

use std::path::Path;

use anyhow::Context;

use crate::SpacebattleResult;
use crate::render::canvas::{Canvas, Sprite};
use crate::render::font::LabelFont;
use crate::sim::player::Player;

/// Decoded images and the label font for one match. Ship sprites are already turned to
/// face the arena.
#[derive(Clone, Debug)]
pub struct MatchAssets {
    pub background: Canvas,
    pub ship1: Sprite,
    pub ship2: Sprite,
    pub satellite: Option<Sprite>,
    pub font: LabelFont,
}

impl MatchAssets {
    /// Assemble assets from decoded images, rotating the raw ship sprites.
    ///
    /// `ship1` belongs to the left player and is turned counter-clockwise; `ship2` clockwise.
    pub fn from_parts(
        background: Canvas,
        ship1_raw: &Sprite,
        ship2_raw: &Sprite,
        satellite: Option<Sprite>,
        font: LabelFont,
    ) -> Self {
        Self {
            background,
            ship1: ship1_raw.rotated_ccw(),
            ship2: ship2_raw.rotated_cw(),
            satellite,
            font,
        }
    }

    /// Load the background, both player sprites and the label font from disk.
    #[tracing::instrument(skip(left, right), fields(left = left.display_name(), right = right.display_name()))]
    pub fn load(
        background: &Path,
        left: &dyn Player,
        right: &dyn Player,
        satellite: Option<&Path>,
        font: &Path,
    ) -> SpacebattleResult<Self> {
        let bg = decode::load_background(background)
            .with_context(|| format!("load background '{}'", background.display()))?;
        let ship1 = load_player_sprite(left)?;
        let ship2 = load_player_sprite(right)?;
        let satellite = satellite
            .map(|p| {
                decode::load_sprite(p)
                    .with_context(|| format!("load satellite sprite '{}'", p.display()))
            })
            .transpose()?;
        let font = decode::load_font(font)?;

        tracing::debug!(
            width = bg.width(),
            height = bg.height(),
            satellite = satellite.is_some(),
            font = font.family(),
            "match assets loaded"
        );
        Ok(Self::from_parts(bg, &ship1, &ship2, satellite, font))
    }
}

fn load_player_sprite(player: &dyn Player) -> anyhow::Result<Sprite> {
    let path = player.sprite_path();
    let sprite = decode::load_sprite(path).with_context(|| {
        format!(
            "load sprite for player '{}' from '{}'",
            player.display_name(),
            path.display()
        )
    })?;
    Ok(sprite)
}

#[cfg(test)]
#[path = "../tests/unit/assets/match_assets.rs"]
mod tests;
