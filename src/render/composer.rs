use kurbo::Point;

use crate::assets::MatchAssets;
use crate::foundation::core::{Side, round_coord};
use crate::foundation::error::SpacebattleResult;
use crate::render::canvas::{Canvas, extended_height};
use crate::render::composite::{draw_sprite, fill_disc};
use crate::render::layout::{
    BANNER_COLOR, BANNER_PREFIX, BANNER_SCALE, EXTENSION_RATIO, LABEL_BASELINE_RATIO,
    LABEL_MARGIN_PX, LABEL_THICKNESS, LEFT_COLOR, NAME_SCALE, OUTLINE_COLOR, PUCK_COLOR,
    RIGHT_COLOR, SCORE_SCALE, SCORE_STACK_FACTOR,
};
use crate::render::font::TextEngine;
use crate::render::text::{Alignment, TextSize, TextStyle, draw_text, measure_text};
use crate::sim::state::RenderState;

/// How a composed frame should be paced by the sinks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameMode {
    Normal,
    /// Goal celebration for the side that scored.
    Goal(Side),
}

impl FrameMode {
    pub fn is_goal(self) -> bool {
        matches!(self, Self::Goal(_))
    }
}

#[derive(Clone, Debug)]
pub struct ComposedFrame {
    pub canvas: Canvas,
    pub mode: FrameMode,
}

/// Builds one extended frame per snapshot from preloaded assets.
///
/// Holds no per-frame state; every call starts from a fresh copy of the background. The
/// text engine only caches shaping contexts.
#[derive(Debug)]
pub struct FrameComposer {
    assets: MatchAssets,
    text: TextEngine,
    left_name: String,
    right_name: String,
}

impl FrameComposer {
    pub fn new(
        assets: MatchAssets,
        left_name: impl Into<String>,
        right_name: impl Into<String>,
    ) -> Self {
        let text = TextEngine::new(assets.font.clone());
        Self {
            assets,
            text,
            left_name: left_name.into(),
            right_name: right_name.into(),
        }
    }

    /// Size of every frame this composer produces.
    pub fn frame_size(&self) -> (u32, u32) {
        let bg = &self.assets.background;
        (bg.width(), extended_height(bg.height(), EXTENSION_RATIO))
    }

    /// Size of the playing field (the background image).
    pub fn board_size(&self) -> (u32, u32) {
        let bg = &self.assets.background;
        (bg.width(), bg.height())
    }

    pub fn display_name(&self, side: Side) -> &str {
        match side {
            Side::Left => &self.left_name,
            Side::Right => &self.right_name,
        }
    }

    /// Measure a label in the match font.
    pub fn measure(&mut self, text: &str, scale: f64) -> SpacebattleResult<TextSize> {
        measure_text(&mut self.text, text, scale, LABEL_THICKNESS)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(goal = state.is_goal()))]
    pub fn compose(&mut self, state: &RenderState) -> SpacebattleResult<ComposedFrame> {
        let mut canvas = self.assets.background.extended(EXTENSION_RATIO)?;

        fill_disc(&mut canvas, state.puck_pos, state.puck_radius, PUCK_COLOR)?;

        if let Some(satellite) = &self.assets.satellite {
            for &pos in &state.satellites {
                draw_sprite(&mut canvas, satellite, pos)?;
            }
        }

        draw_sprite(&mut canvas, &self.assets.ship1, state.ship1_pos)?;
        draw_sprite(&mut canvas, &self.assets.ship2, state.ship2_pos)?;

        let mode = match state.goal_side {
            Some(side) => {
                self.draw_banner(&mut canvas, side)?;
                FrameMode::Goal(side)
            }
            None => {
                self.draw_scoreboard(&mut canvas, state)?;
                FrameMode::Normal
            }
        };

        Ok(ComposedFrame { canvas, mode })
    }

    fn baseline(&self) -> f64 {
        (f64::from(self.assets.background.height()) * LABEL_BASELINE_RATIO).round()
    }

    fn draw_scoreboard(
        &mut self,
        canvas: &mut Canvas,
        state: &RenderState,
    ) -> SpacebattleResult<()> {
        let width = f64::from(self.assets.background.width());
        let y_name = self.baseline();

        for side in [Side::Left, Side::Right] {
            let (x, align, color) = match side {
                Side::Left => (LABEL_MARGIN_PX, Alignment::Left, LEFT_COLOR),
                Side::Right => (width - LABEL_MARGIN_PX, Alignment::Right, RIGHT_COLOR),
            };
            let name_style = TextStyle {
                color,
                outline: OUTLINE_COLOR,
                scale: NAME_SCALE,
                thickness: LABEL_THICKNESS,
            };
            let name = match side {
                Side::Left => &self.left_name,
                Side::Right => &self.right_name,
            };
            let name_size = draw_text(
                canvas,
                &mut self.text,
                name,
                Point::new(x, y_name),
                &name_style,
                align,
            )?;

            let score_style = TextStyle {
                scale: SCORE_SCALE,
                ..name_style
            };
            let y_score = round_coord(
                f64::from(self.assets.background.height()) * LABEL_BASELINE_RATIO
                    - f64::from(name_size.height) * SCORE_STACK_FACTOR,
            )?;
            draw_text(
                canvas,
                &mut self.text,
                &state.goals.for_side(side).to_string(),
                Point::new(x, y_score as f64),
                &score_style,
                align,
            )?;
        }
        Ok(())
    }

    fn draw_banner(&mut self, canvas: &mut Canvas, side: Side) -> SpacebattleResult<()> {
        let text = format!("{BANNER_PREFIX}{}", self.display_name(side));
        let style = TextStyle {
            color: BANNER_COLOR,
            outline: OUTLINE_COLOR,
            scale: BANNER_SCALE,
            thickness: LABEL_THICKNESS,
        };
        let x = f64::from(self.assets.background.width()) / 2.0;
        let baseline = self.baseline();
        draw_text(
            canvas,
            &mut self.text,
            &text,
            Point::new(x, baseline),
            &style,
            Alignment::Center,
        )?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composer.rs"]
mod tests;
