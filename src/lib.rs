//! Frame composition and dual-sink output for an arcade space-battle match.
//!
//! A simulation hands a [`RenderState`] to [`MatchRenderer::tick`] once per tick. The
//! [`FrameComposer`] draws the background, puck, satellites, ships and scoreboard onto an
//! extended frame, which is then appended to the video encoder and shown in the window.
#![forbid(unsafe_code)]

pub mod assets;
pub mod config;
pub mod display;
pub mod encode;
mod foundation;
pub mod render;
pub mod session;
pub mod sim;
pub mod sink;

pub use assets::MatchAssets;
pub use config::{MatchConfig, OutputConfig};
pub use display::window::{DisplaySurface, ESCAPE_KEY, WindowSink};
pub use encode::ffmpeg::{EncodeConfig, FfmpegStream, VIDEO_FPS, is_ffmpeg_on_path};
pub use encode::sink::{EncoderSink, GOAL_REPEAT};
pub use encode::stream::{MemoryStream, RawFrameStream};
pub use foundation::core::{PixelPoint, Point, Rgb8, Side, round_point};
pub use foundation::error::{SpacebattleError, SpacebattleResult};
pub use render::canvas::{Canvas, Sprite};
pub use render::composer::{ComposedFrame, FrameComposer, FrameMode};
pub use render::composite::{draw_sprite, fill_disc};
pub use render::font::{LabelFont, ShapedText, TextEngine};
pub use render::text::{Alignment, TextSize, TextStyle, draw_text, measure_text};
pub use session::match_renderer::{MatchRenderer, TickOutcome};
pub use sim::patrol::{PatrolConfig, PatrolEntity, make_patrol};
pub use sim::player::{Player, PlayerProfile, kickoff_position};
pub use sim::state::{Goals, RenderState};
pub use sink::{FrameSink, SinkSignal};
