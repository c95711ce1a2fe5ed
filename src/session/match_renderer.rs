use crate::assets::MatchAssets;
use crate::config::{MatchConfig, OutputConfig};
use crate::encode::ffmpeg::{FfmpegStream, match_video_config};
use crate::encode::sink::EncoderSink;
use crate::foundation::error::SpacebattleResult;
use crate::render::composer::{ComposedFrame, FrameComposer};
use crate::sim::state::RenderState;
use crate::sink::FrameSink;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// The window sink asked to stop; the caller should end the match.
    Cancelled,
}

/// One match's renderer: a composer plus whichever sinks are enabled.
///
/// Each tick composes a frame and pushes it to the encoder, then to the window.
/// Sinks are released by [`MatchRenderer::release`] or, failing that, on drop.
pub struct MatchRenderer {
    composer: FrameComposer,
    encoder: Option<Box<dyn FrameSink>>,
    window: Option<Box<dyn FrameSink>>,
    ticks: u64,
}

impl MatchRenderer {
    pub fn new(
        composer: FrameComposer,
        encoder: Option<Box<dyn FrameSink>>,
        window: Option<Box<dyn FrameSink>>,
    ) -> Self {
        Self {
            composer,
            encoder,
            window,
            ticks: 0,
        }
    }

    /// Load assets and open the sinks `output` asks for.
    pub fn open(cfg: &MatchConfig) -> SpacebattleResult<Self> {
        let assets = MatchAssets::load(
            &cfg.background,
            &cfg.left,
            &cfg.right,
            cfg.satellite_sprite.as_deref(),
            &cfg.font,
        )?;
        let composer = FrameComposer::new(
            assets,
            cfg.left.display_name.clone(),
            cfg.right.display_name.clone(),
        );
        let (width, height) = composer.frame_size();

        let encoder = match &cfg.output.video_path {
            Some(path) => {
                let stream = FfmpegStream::new(match_video_config(path, width, height))?;
                Some(Box::new(EncoderSink::new(stream, width, height)) as Box<dyn FrameSink>)
            }
            None => None,
        };
        let window = open_window(&cfg.output, width, height)?;

        tracing::info!(
            width,
            height,
            video = encoder.is_some(),
            window = window.is_some(),
            "match renderer ready"
        );
        Ok(Self::new(composer, encoder, window))
    }

    pub fn composer(&self) -> &FrameComposer {
        &self.composer
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Compose one frame without pushing it anywhere.
    pub fn preview(&mut self, state: &RenderState) -> SpacebattleResult<ComposedFrame> {
        self.composer.compose(state)
    }

    pub fn tick(&mut self, state: &RenderState) -> SpacebattleResult<TickOutcome> {
        let frame = self.composer.compose(state)?;
        self.ticks += 1;

        if let Some(encoder) = self.encoder.as_mut() {
            encoder.push_frame(&frame)?;
        }
        if let Some(window) = self.window.as_mut()
            && window.push_frame(&frame)?.is_cancel()
        {
            tracing::info!(tick = self.ticks, "match cancelled from the window");
            return Ok(TickOutcome::Cancelled);
        }
        Ok(TickOutcome::Continue)
    }

    /// Finalize the encoder and close the window, reporting the first failure.
    ///
    /// Both sinks are released even if the first one fails.
    pub fn release(&mut self) -> SpacebattleResult<()> {
        let encoder = finish_sink(self.encoder.take(), "encoder");
        let window = finish_sink(self.window.take(), "window");
        tracing::debug!(ticks = self.ticks, "match renderer released");
        encoder.and(window)
    }
}

impl Drop for MatchRenderer {
    fn drop(&mut self) {
        if (self.encoder.is_some() || self.window.is_some())
            && let Err(err) = self.release()
        {
            tracing::warn!(%err, "releasing sinks on drop failed");
        }
    }
}

fn finish_sink(sink: Option<Box<dyn FrameSink>>, name: &str) -> SpacebattleResult<()> {
    let Some(mut sink) = sink else {
        return Ok(());
    };
    sink.finish().inspect_err(|err| {
        tracing::warn!(sink = name, %err, "sink failed to finish");
    })
}

#[cfg(feature = "window")]
fn open_window(
    output: &OutputConfig,
    width: u32,
    height: u32,
) -> SpacebattleResult<Option<Box<dyn FrameSink>>> {
    use crate::display::desktop::MinifbSurface;
    use crate::display::window::WindowSink;

    if !output.show_window {
        return Ok(None);
    }
    let surface = MinifbSurface::new(&output.window_title, width, height)?;
    Ok(Some(Box::new(WindowSink::new(surface))))
}

#[cfg(not(feature = "window"))]
fn open_window(
    output: &OutputConfig,
    _width: u32,
    _height: u32,
) -> SpacebattleResult<Option<Box<dyn FrameSink>>> {
    if output.show_window {
        return Err(crate::foundation::error::SpacebattleError::resource(
            "window output requested, but this build lacks the `window` feature",
        ));
    }
    Ok(None)
}

#[cfg(test)]
#[path = "../../tests/unit/session/match_renderer.rs"]
mod tests;
