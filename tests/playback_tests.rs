// Integration tests for the playback engine driven by a virtual clock

use algotrace::playback::{
    ManualScheduler, PlaybackEngine, PlaybackError, PlaybackEvent, PlaybackState, TimerId,
    TimerOp, DEFAULT_SPEED_MS,
};
use algotrace::snapshot::array::elements_from;
use algotrace::trace::{Recorder, Trace};

fn trace_of(len: usize) -> Trace {
    let mut rec = Recorder::new("fixture");
    for i in 0..len {
        rec.record(&elements_from(&[i as i64, 0]), format!("step {}", i))
            .expect("record failed");
    }
    rec.finish().expect("finish failed")
}

fn loaded(len: usize) -> PlaybackEngine<ManualScheduler> {
    let mut engine = PlaybackEngine::new(ManualScheduler::new());
    engine.load(trace_of(len)).expect("load failed");
    engine
}

/// Every `Scheduled` must come after the previous timer was cancelled or fired
fn assert_cancel_before_reschedule(log: &[TimerOp]) {
    let mut outstanding: Option<TimerId> = None;
    for (i, op) in log.iter().enumerate() {
        match *op {
            TimerOp::Scheduled { id, .. } => {
                assert_eq!(outstanding, None, "op {} scheduled over a live timer", i);
                outstanding = Some(id);
            }
            TimerOp::Cancelled(id) | TimerOp::Fired(id) => {
                assert_eq!(outstanding, Some(id), "op {} touched an unknown timer", i);
                outstanding = None;
            }
        }
    }
}

#[test]
fn test_auto_completion_after_n_minus_one_intervals() {
    let mut engine = loaded(10);
    engine.play();
    assert!(engine.is_playing());

    engine.scheduler_mut().advance_ms(9 * DEFAULT_SPEED_MS);
    assert_eq!(engine.poll(), 9);

    assert_eq!(engine.cursor(), 9);
    assert!(!engine.is_playing());
    assert_eq!(engine.state(), PlaybackState::Completed);
    assert!(!engine.has_pending_timer());
    assert!(engine.drain_events().contains(&PlaybackEvent::Completed));
    assert_eq!(engine.scheduler().max_pending(), 1);
}

#[test]
fn test_not_quite_enough_time_stops_one_short() {
    let mut engine = loaded(10);
    engine.play();
    engine.scheduler_mut().advance_ms(9 * DEFAULT_SPEED_MS - 1);
    engine.poll();
    assert_eq!(engine.cursor(), 8);
    assert!(engine.is_playing());
}

#[test]
fn test_play_then_immediate_pause() {
    let mut engine = loaded(10);
    engine.play();
    engine.pause();

    engine.scheduler_mut().advance_ms(10 * DEFAULT_SPEED_MS);
    assert_eq!(engine.poll(), 0);
    assert_eq!(engine.cursor(), 0);
    assert!(!engine.is_playing());
    assert_eq!(engine.scheduler().pending_count(), 0);
}

#[test]
fn test_seek_then_step_back() {
    let mut engine = loaded(10);
    engine.seek(7);
    engine.step_back();
    assert_eq!(engine.cursor(), 6);
    assert_eq!(engine.current_step().map(|s| s.index), Some(6));
}

#[test]
fn test_seek_clamps_past_the_end() {
    let mut engine = loaded(10);
    engine.seek(42);
    assert_eq!(engine.cursor(), 9);
}

#[test]
fn test_negative_speed_is_rejected() {
    let mut engine = loaded(10);
    engine.seek(3);
    engine.set_speed(250).unwrap();

    assert_eq!(engine.set_speed(-5), Err(PlaybackError::InvalidSpeed(-5)));
    assert_eq!(engine.set_speed(0), Err(PlaybackError::InvalidSpeed(0)));
    assert_eq!(engine.speed_ms(), 250);
    assert_eq!(engine.cursor(), 3);
}

#[test]
fn test_boundaries_are_no_ops() {
    let mut engine = loaded(5);
    engine.step_back();
    assert_eq!(engine.cursor(), 0);

    engine.seek_end();
    engine.drain_events();
    engine.step_forward();
    assert_eq!(engine.cursor(), 4);

    engine.play();
    assert!(!engine.is_playing());
    assert!(engine.drain_events().is_empty());
    assert_eq!(engine.scheduler().scheduled_count(), 0);
}

#[test]
fn test_load_twice_resets_cursor_each_time() {
    let trace = trace_of(6);
    let mut engine = PlaybackEngine::new(ManualScheduler::new());

    engine.load(trace.clone()).unwrap();
    engine.seek(4);
    engine.load(trace.clone()).unwrap();
    assert_eq!(engine.cursor(), 0);
    engine.load(trace).unwrap();
    assert_eq!(engine.cursor(), 0);
    assert_eq!(engine.state(), PlaybackState::Paused);
}

#[test]
fn test_load_while_playing_cancels_the_timer() {
    let mut engine = loaded(6);
    engine.play();
    engine.scheduler_mut().advance_ms(DEFAULT_SPEED_MS);
    engine.poll();
    assert_eq!(engine.cursor(), 1);

    engine.load(trace_of(3)).unwrap();
    assert_eq!(engine.state(), PlaybackState::Paused);
    assert_eq!(engine.cursor(), 0);
    assert_eq!(engine.len(), 3);
    assert_eq!(engine.scheduler().pending_count(), 0);

    engine.scheduler_mut().advance_ms(10 * DEFAULT_SPEED_MS);
    assert_eq!(engine.poll(), 0);
    assert_cancel_before_reschedule(engine.scheduler().log());
}

#[test]
fn test_replay_after_completion() {
    let mut engine = loaded(3);
    engine.play();
    engine.scheduler_mut().advance_ms(2 * DEFAULT_SPEED_MS);
    engine.poll();
    assert_eq!(engine.state(), PlaybackState::Completed);

    engine.seek_start();
    assert_eq!(engine.state(), PlaybackState::Paused);
    engine.play();
    engine.scheduler_mut().advance_ms(2 * DEFAULT_SPEED_MS);
    engine.poll();
    assert_eq!(engine.cursor(), 2);
    assert_eq!(engine.state(), PlaybackState::Completed);
}

#[test]
fn test_mixed_transport_keeps_one_timer() {
    let mut engine = loaded(20);
    engine.play();
    engine.scheduler_mut().advance_ms(DEFAULT_SPEED_MS);
    engine.poll();
    engine.step_forward();
    engine.play();
    engine.set_speed(100).unwrap();
    engine.scheduler_mut().advance_ms(DEFAULT_SPEED_MS + 300);
    engine.poll();
    engine.seek(2);
    engine.play();
    engine.pause();
    engine.play();
    engine.load(trace_of(4)).unwrap();
    engine.play();
    engine.scheduler_mut().advance_ms(1000);
    engine.poll();

    assert_eq!(engine.scheduler().max_pending(), 1);
    assert_cancel_before_reschedule(engine.scheduler().log());
    assert_eq!(engine.state(), PlaybackState::Completed);
}

#[test]
fn test_idle_engine_has_no_step() {
    let engine = PlaybackEngine::new(ManualScheduler::new());
    assert_eq!(engine.state(), PlaybackState::Idle);
    assert!(engine.current_step().is_none());
    assert!(engine.is_empty());
}
