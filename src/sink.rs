use crate::foundation::error::SpacebattleResult;
use crate::render::composer::ComposedFrame;

/// What the caller should do after a sink accepted a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SinkSignal {
    Continue,
    /// The user asked to stop the match early.
    Cancel,
}

impl SinkSignal {
    pub fn is_cancel(self) -> bool {
        self == Self::Cancel
    }
}

/// A consumer of composed frames.
pub trait FrameSink {
    fn push_frame(&mut self, frame: &ComposedFrame) -> SpacebattleResult<SinkSignal>;

    /// Release the underlying resource. Calling this more than once is a no-op.
    fn finish(&mut self) -> SpacebattleResult<()>;
}
