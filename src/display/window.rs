use std::time::Duration;

use crate::foundation::error::SpacebattleResult;
use crate::render::canvas::Canvas;
use crate::render::composer::ComposedFrame;
use crate::sink::{FrameSink, SinkSignal};

/// Key code that cancels the match. Closing the window reports it too.
pub const ESCAPE_KEY: u32 = 27;

pub const GOAL_KEY_TIMEOUT: Duration = Duration::from_millis(1000);
pub const FRAME_KEY_TIMEOUT: Duration = Duration::from_millis(5);

/// An on-screen surface that shows frames and reports key presses.
pub trait DisplaySurface {
    fn present(&mut self, frame: &Canvas) -> SpacebattleResult<()>;

    /// Block for at most `timeout` and return the first key pressed, if any.
    fn wait_key(&mut self, timeout: Duration) -> SpacebattleResult<Option<u32>>;

    fn close(&mut self);
}

impl<S: DisplaySurface + ?Sized> DisplaySurface for Box<S> {
    fn present(&mut self, frame: &Canvas) -> SpacebattleResult<()> {
        (**self).present(frame)
    }

    fn wait_key(&mut self, timeout: Duration) -> SpacebattleResult<Option<u32>> {
        (**self).wait_key(timeout)
    }

    fn close(&mut self) {
        (**self).close();
    }
}

/// Shows each frame and turns an Escape press into [`SinkSignal::Cancel`].
#[derive(Debug)]
pub struct WindowSink<S: DisplaySurface> {
    surface: S,
    closed: bool,
}

impl<S: DisplaySurface> WindowSink<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            closed: false,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

impl<S: DisplaySurface> FrameSink for WindowSink<S> {
    fn push_frame(&mut self, frame: &ComposedFrame) -> SpacebattleResult<SinkSignal> {
        self.surface.present(&frame.canvas)?;

        let timeout = if frame.mode.is_goal() {
            GOAL_KEY_TIMEOUT
        } else {
            FRAME_KEY_TIMEOUT
        };
        match self.surface.wait_key(timeout)? {
            Some(ESCAPE_KEY) => {
                tracing::info!("escape pressed, cancelling match");
                Ok(SinkSignal::Cancel)
            }
            _ => Ok(SinkSignal::Continue),
        }
    }

    fn finish(&mut self) -> SpacebattleResult<()> {
        if !self.closed {
            self.closed = true;
            self.surface.close();
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/display/window.rs"]
mod tests;
