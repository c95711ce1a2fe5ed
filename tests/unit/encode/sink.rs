use super::*;
use crate::encode::stream::MemoryStream;
use crate::foundation::core::{Rgb8, Side};
use crate::render::canvas::Canvas;
use crate::render::composer::FrameMode;

fn frame(width: u32, height: u32, mode: FrameMode) -> ComposedFrame {
    ComposedFrame {
        canvas: Canvas::filled(width, height, Rgb8::new(1, 2, 3)).unwrap(),
        mode,
    }
}

#[test]
fn normal_frame_is_written_once() {
    let mut sink = EncoderSink::new(MemoryStream::new(), 4, 5);
    let signal = sink.push_frame(&frame(4, 5, FrameMode::Normal)).unwrap();
    assert_eq!(signal, SinkSignal::Continue);
    assert_eq!(sink.frames_written(), 1);
    assert_eq!(sink.stream().frames()[0].len(), 4 * 5 * 3);
    assert_eq!(&sink.stream().frames()[0][..3], &[1, 2, 3]);
}

#[test]
fn goal_frame_is_held_for_sixty_copies() {
    let mut sink = EncoderSink::new(MemoryStream::new(), 4, 5);
    sink.push_frame(&frame(4, 5, FrameMode::Normal)).unwrap();
    sink.push_frame(&frame(4, 5, FrameMode::Goal(Side::Right)))
        .unwrap();
    assert_eq!(sink.frames_written(), 61);
    assert_eq!(sink.stream().frames().len(), 61);
}

#[test]
fn mismatched_frame_writes_nothing() {
    let mut sink = EncoderSink::new(MemoryStream::new(), 4, 5);
    let err = sink
        .push_frame(&frame(4, 6, FrameMode::Goal(Side::Left)))
        .unwrap_err();
    assert!(matches!(err, SpacebattleError::Validation(_)), "{err}");
    assert!(sink.stream().frames().is_empty());
}

#[test]
fn finish_is_idempotent_and_closes_the_stream() {
    let mut sink = EncoderSink::new(MemoryStream::new(), 4, 5);
    sink.finish().unwrap();
    sink.finish().unwrap();
    assert!(sink.stream().is_finished());
    assert!(sink.push_frame(&frame(4, 5, FrameMode::Normal)).is_err());
}
