use crate::foundation::error::{SpacebattleError, SpacebattleResult};

/// Append-only sink for packed RGB8 frames of a fixed size.
pub trait RawFrameStream {
    fn write_frame(&mut self, rgb: &[u8]) -> SpacebattleResult<()>;

    /// Flush and close the stream. Idempotent.
    fn finish(&mut self) -> SpacebattleResult<()>;
}

/// Keeps every frame in memory; used by tests and dry runs.
#[derive(Clone, Debug, Default)]
pub struct MemoryStream {
    frames: Vec<Vec<u8>>,
    finished: bool,
}

impl MemoryStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[Vec<u8>] {
        &self.frames
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl RawFrameStream for MemoryStream {
    fn write_frame(&mut self, rgb: &[u8]) -> SpacebattleResult<()> {
        if self.finished {
            return Err(SpacebattleError::encode("stream is already finalized"));
        }
        self.frames.push(rgb.to_vec());
        Ok(())
    }

    fn finish(&mut self) -> SpacebattleResult<()> {
        self.finished = true;
        Ok(())
    }
}

impl<S: RawFrameStream + ?Sized> RawFrameStream for Box<S> {
    fn write_frame(&mut self, rgb: &[u8]) -> SpacebattleResult<()> {
        (**self).write_frame(rgb)
    }

    fn finish(&mut self) -> SpacebattleResult<()> {
        (**self).finish()
    }
}
