use crate::foundation::core::Rgb8;

/// The frame is the background plus a scoreboard strip 25% of its height.
pub const EXTENSION_RATIO: f64 = 1.25;

/// Baseline of names and the goal banner, as a fraction of background height.
pub const LABEL_BASELINE_RATIO: f64 = 1.20;

/// Horizontal inset of scoreboard labels from the frame edges.
pub const LABEL_MARGIN_PX: f64 = 20.0;

/// Scores sit this many name-heights above the name baseline.
pub const SCORE_STACK_FACTOR: f64 = 1.5;

pub const NAME_SCALE: f64 = 1.0;
pub const SCORE_SCALE: f64 = 2.0;
pub const BANNER_SCALE: f64 = 1.5;
pub const LABEL_THICKNESS: u32 = 3;

pub const PUCK_COLOR: Rgb8 = Rgb8::new(50, 255, 200);
pub const LEFT_COLOR: Rgb8 = Rgb8::new(0, 0, 255);
pub const RIGHT_COLOR: Rgb8 = Rgb8::new(255, 0, 0);
pub const BANNER_COLOR: Rgb8 = Rgb8::new(255, 165, 0);
pub const OUTLINE_COLOR: Rgb8 = Rgb8::WHITE;

pub const BANNER_PREFIX: &str = "GOALLL for ";
