use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Point;

use super::*;
use crate::foundation::core::{Rgb8, Side};
use crate::foundation::error::SpacebattleError;
use crate::render::canvas::{Canvas, Sprite};
use crate::render::composer::FrameMode;
use crate::render::font::fixture;
use crate::sim::state::Goals;
use crate::sink::SinkSignal;

#[derive(Debug, Default)]
struct Log {
    events: Vec<String>,
    modes: Vec<FrameMode>,
}

struct RecordingSink {
    name: &'static str,
    log: Rc<RefCell<Log>>,
    cancel_on: Option<usize>,
    fail_finish: bool,
    pushed: usize,
}

impl RecordingSink {
    fn boxed(name: &'static str, log: &Rc<RefCell<Log>>) -> Box<dyn FrameSink> {
        Box::new(Self {
            name,
            log: Rc::clone(log),
            cancel_on: None,
            fail_finish: false,
            pushed: 0,
        })
    }
}

impl FrameSink for RecordingSink {
    fn push_frame(&mut self, frame: &ComposedFrame) -> SpacebattleResult<SinkSignal> {
        self.pushed += 1;
        let mut log = self.log.borrow_mut();
        log.events.push(format!("{}:push", self.name));
        log.modes.push(frame.mode);
        if self.cancel_on == Some(self.pushed) {
            return Ok(SinkSignal::Cancel);
        }
        Ok(SinkSignal::Continue)
    }

    fn finish(&mut self) -> SpacebattleResult<()> {
        self.log
            .borrow_mut()
            .events
            .push(format!("{}:finish", self.name));
        if self.fail_finish {
            return Err(SpacebattleError::encode("disk full"));
        }
        Ok(())
    }
}

fn composer() -> FrameComposer {
    let ship = Sprite::solid(10, 20, [0, 255, 0, 255]).unwrap();
    let assets = MatchAssets::from_parts(
        Canvas::filled(200, 120, Rgb8::new(5, 5, 5)).unwrap(),
        &ship,
        &ship,
        None,
        fixture(),
    );
    FrameComposer::new(assets, "Alice", "Bob")
}

fn state(goal_side: Option<Side>) -> RenderState {
    RenderState {
        puck_pos: Point::new(100.0, 60.0),
        puck_radius: 5,
        ship1_pos: Point::new(40.0, 60.0),
        ship2_pos: Point::new(160.0, 60.0),
        goals: Goals::default(),
        goal_side,
        satellites: Vec::new(),
    }
}

#[test]
fn encoder_is_fed_before_the_window() {
    let log = Rc::new(RefCell::new(Log::default()));
    let mut r = MatchRenderer::new(
        composer(),
        Some(RecordingSink::boxed("encoder", &log)),
        Some(RecordingSink::boxed("window", &log)),
    );

    assert_eq!(r.tick(&state(None)).unwrap(), TickOutcome::Continue);
    assert_eq!(r.tick(&state(Some(Side::Left))).unwrap(), TickOutcome::Continue);
    assert_eq!(r.ticks(), 2);

    let log = log.borrow();
    assert_eq!(
        log.events,
        ["encoder:push", "window:push", "encoder:push", "window:push"]
    );
    assert_eq!(log.modes[2], FrameMode::Goal(Side::Left));
}

#[test]
fn window_cancel_stops_the_match() {
    let log = Rc::new(RefCell::new(Log::default()));
    let window: Box<dyn FrameSink> = Box::new(RecordingSink {
        name: "window",
        log: Rc::clone(&log),
        cancel_on: Some(2),
        fail_finish: false,
        pushed: 0,
    });
    let mut r = MatchRenderer::new(composer(), None, Some(window));

    assert_eq!(r.tick(&state(None)).unwrap(), TickOutcome::Continue);
    assert_eq!(r.tick(&state(None)).unwrap(), TickOutcome::Cancelled);
}

#[test]
fn goal_frames_reach_the_encoder_sixty_times() {
    use crate::encode::sink::EncoderSink;
    use crate::encode::stream::MemoryStream;

    // A shared handle lets the test read the stream after the renderer owns the sink.
    struct Shared(Rc<RefCell<EncoderSink<MemoryStream>>>);
    impl FrameSink for Shared {
        fn push_frame(&mut self, frame: &ComposedFrame) -> SpacebattleResult<SinkSignal> {
            self.0.borrow_mut().push_frame(frame)
        }
        fn finish(&mut self) -> SpacebattleResult<()> {
            self.0.borrow_mut().finish()
        }
    }

    let c = composer();
    let (w, h) = c.frame_size();
    assert_eq!((w, h), (200, 150));
    let sink = Rc::new(RefCell::new(EncoderSink::new(MemoryStream::new(), w, h)));
    let mut r = MatchRenderer::new(c, Some(Box::new(Shared(Rc::clone(&sink)))), None);

    r.tick(&state(None)).unwrap();
    r.tick(&state(Some(Side::Right))).unwrap();
    r.release().unwrap();

    let sink = sink.borrow();
    assert_eq!(sink.stream().frames().len(), 61);
    assert!(sink.stream().is_finished());
}

#[test]
fn release_finishes_every_sink_and_reports_failure() {
    let log = Rc::new(RefCell::new(Log::default()));
    let encoder: Box<dyn FrameSink> = Box::new(RecordingSink {
        name: "encoder",
        log: Rc::clone(&log),
        cancel_on: None,
        fail_finish: true,
        pushed: 0,
    });
    let mut r = MatchRenderer::new(
        composer(),
        Some(encoder),
        Some(RecordingSink::boxed("window", &log)),
    );

    let err = r.release().unwrap_err();
    assert!(matches!(err, SpacebattleError::Encode(_)), "{err}");
    assert_eq!(log.borrow().events, ["encoder:finish", "window:finish"]);

    // Nothing left to release.
    r.release().unwrap();
    assert_eq!(log.borrow().events.len(), 2);
}

#[test]
fn drop_releases_open_sinks() {
    let log = Rc::new(RefCell::new(Log::default()));
    {
        let encoder = RecordingSink::boxed("encoder", &log);
        let mut r = MatchRenderer::new(composer(), Some(encoder), None);
        r.tick(&state(None)).unwrap();
    }
    assert_eq!(log.borrow().events, ["encoder:push", "encoder:finish"]);
}

#[test]
fn compose_failure_pushes_nothing() {
    let log = Rc::new(RefCell::new(Log::default()));
    let encoder = RecordingSink::boxed("encoder", &log);
    let mut r = MatchRenderer::new(composer(), Some(encoder), None);
    let mut s = state(None);
    s.ship1_pos = Point::new(2.0, 60.0);
    assert!(r.tick(&s).is_err());
    assert!(log.borrow().events.is_empty());
    assert!(r.preview(&state(None)).is_ok());
}

#[cfg(not(feature = "window"))]
#[test]
fn window_request_without_feature_is_a_resource_error() {
    let out = OutputConfig {
        show_window: true,
        ..OutputConfig::default()
    };
    let err = open_window(&out, 10, 10).err().unwrap();
    assert!(matches!(err, SpacebattleError::Resource(_)), "{err}");
    assert!(open_window(&OutputConfig::default(), 10, 10).unwrap().is_none());
}
