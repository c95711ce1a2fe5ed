use crate::encode::stream::RawFrameStream;
use crate::foundation::error::{SpacebattleError, SpacebattleResult};
use crate::render::composer::ComposedFrame;
use crate::sink::{FrameSink, SinkSignal};

/// Goal frames are repeated this many times, holding the celebration on screen.
pub const GOAL_REPEAT: usize = 60;

/// Appends composed frames to a video stream of fixed dimensions.
#[derive(Debug)]
pub struct EncoderSink<S: RawFrameStream> {
    stream: S,
    width: u32,
    height: u32,
    frames_written: u64,
    finished: bool,
}

impl<S: RawFrameStream> EncoderSink<S> {
    pub fn new(stream: S, width: u32, height: u32) -> Self {
        Self {
            stream,
            width,
            height,
            frames_written: 0,
            finished: false,
        }
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    pub fn stream(&self) -> &S {
        &self.stream
    }
}

impl<S: RawFrameStream> FrameSink for EncoderSink<S> {
    fn push_frame(&mut self, frame: &ComposedFrame) -> SpacebattleResult<SinkSignal> {
        let canvas = &frame.canvas;
        if canvas.width() != self.width || canvas.height() != self.height {
            return Err(SpacebattleError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                canvas.width(),
                canvas.height(),
                self.width,
                self.height
            )));
        }

        let copies = if frame.mode.is_goal() { GOAL_REPEAT } else { 1 };
        for _ in 0..copies {
            self.stream.write_frame(canvas.as_raw())?;
            self.frames_written += 1;
        }
        Ok(SinkSignal::Continue)
    }

    fn finish(&mut self) -> SpacebattleResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        tracing::debug!(frames = self.frames_written, "closing encoder sink");
        self.stream.finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
