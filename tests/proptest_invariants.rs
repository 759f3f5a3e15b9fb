//! Property-based invariant tests for recording and playback.
//!
//! 1. Captured snapshots never observe later mutation
//! 2. Step indices follow record order
//! 3. At most one playback timer is pending, whatever the command sequence
//! 4. Every sort ends sorted and fully tagged

use algotrace::algorithms::{self, AlgorithmInput, AlgorithmKind, Family};
use algotrace::playback::{ManualScheduler, PlaybackEngine, PlaybackState, TimerOp};
use algotrace::snapshot::array::{elements_from, Tag};
use algotrace::snapshot::tree::Bst;
use algotrace::snapshot::{Capture, Snapshot};
use algotrace::trace::{Recorder, Trace};
use clap::ValueEnum;
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Command {
    Load(usize),
    Play,
    Pause,
    Toggle,
    StepForward,
    StepBack,
    Seek(usize),
    SetSpeed(i64),
    Advance(u64),
}

fn command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        (1usize..15).prop_map(Command::Load),
        Just(Command::Play),
        Just(Command::Pause),
        Just(Command::Toggle),
        Just(Command::StepForward),
        Just(Command::StepBack),
        (0usize..20).prop_map(Command::Seek),
        (-50i64..500).prop_map(Command::SetSpeed),
        (0u64..2000).prop_map(Command::Advance),
    ]
}

fn trace_of(len: usize) -> Trace {
    let mut rec = Recorder::new("fixture");
    for i in 0..len {
        rec.record(&elements_from(&[i as i64]), format!("step {}", i))
            .unwrap();
    }
    rec.finish().unwrap()
}

fn apply(engine: &mut PlaybackEngine<ManualScheduler>, command: &Command) {
    match *command {
        Command::Load(len) => {
            engine.load(trace_of(len)).unwrap();
        }
        Command::Play => engine.play(),
        Command::Pause => engine.pause(),
        Command::Toggle => engine.toggle(),
        Command::StepForward => engine.step_forward(),
        Command::StepBack => engine.step_back(),
        Command::Seek(i) => engine.seek(i),
        Command::SetSpeed(ms) => {
            let _ = engine.set_speed(ms);
        }
        Command::Advance(ms) => {
            engine.scheduler_mut().advance_ms(ms);
            engine.poll();
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 1. Snapshot immutability
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn array_capture_is_a_deep_copy(
        values in prop::collection::vec(-100i64..100, 1..20),
        replacement in any::<i64>(),
    ) {
        let mut elements = elements_from(&values);
        let captured = elements.capture();
        let before = captured.clone();

        elements[0].value = replacement;
        elements[0].tag = Tag::Swapping;
        elements.push(elements[0]);

        prop_assert_eq!(captured, before);
    }

    #[test]
    fn recorded_tree_is_frozen(
        values in prop::collection::vec(-100i64..100, 0..20),
        extra in prop::collection::vec(-100i64..100, 1..10),
    ) {
        let mut tree = Bst::from_values(&values);
        let mut rec = Recorder::new("tree");
        rec.record(&tree, "before").unwrap();
        let frozen = tree.capture();

        for v in &extra {
            tree.insert(*v);
        }
        rec.record(&tree, "after").unwrap();

        let trace = rec.finish().unwrap();
        prop_assert_eq!(&trace.step_at(0).unwrap().snapshot, &frozen);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 2. Index invariant
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn indices_match_positions(count in 0usize..60) {
        let trace = trace_of(count);
        prop_assert_eq!(trace.len(), count);
        for i in 0..count {
            prop_assert_eq!(trace.step_at(i).unwrap().index, i);
        }
        prop_assert!(trace.step_at(count).is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Single-timer invariant
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn at_most_one_timer_pending(
        commands in prop::collection::vec(command_strategy(), 1..60),
    ) {
        let mut engine = PlaybackEngine::new(ManualScheduler::new());
        for command in &commands {
            apply(&mut engine, command);

            prop_assert!(engine.scheduler().pending_count() <= 1);
            prop_assert_eq!(
                engine.has_pending_timer(),
                engine.state() == PlaybackState::Playing,
                "timer armed exactly while playing (after {:?})",
                command
            );
            if engine.state() != PlaybackState::Idle {
                prop_assert!(engine.cursor() < engine.len());
                prop_assert!(engine.current_step().is_some());
            }
        }
        prop_assert!(engine.scheduler().max_pending() <= 1);

        let mut live = None;
        for op in engine.scheduler().log() {
            match *op {
                TimerOp::Scheduled { id, .. } => {
                    prop_assert!(live.is_none(), "rescheduled without cancelling");
                    live = Some(id);
                }
                TimerOp::Cancelled(id) | TimerOp::Fired(id) => {
                    prop_assert_eq!(live, Some(id));
                    live = None;
                }
            }
        }
    }

    #[test]
    fn full_playback_reaches_the_end(len in 1usize..30, speed in 1i64..1000) {
        let mut engine = PlaybackEngine::new(ManualScheduler::new());
        engine.load(trace_of(len)).unwrap();
        engine.set_speed(speed).unwrap();
        engine.play();

        engine.scheduler_mut().advance_ms((len as u64 - 1) * speed as u64);
        engine.poll();
        prop_assert_eq!(engine.cursor(), len - 1);
        prop_assert!(!engine.is_playing());
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Sorts
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn every_sort_sorts(values in prop::collection::vec(-200i64..200, 0..16)) {
        let mut expected = values.clone();
        expected.sort();

        for kind in AlgorithmKind::value_variants()
            .iter()
            .filter(|k| k.family() == Family::Sorting)
        {
            let trace = algorithms::run(*kind, &AlgorithmInput::with_values(values.clone())).unwrap();
            let Some(Snapshot::Array(last)) = trace.last().map(|s| &s.snapshot) else {
                return Err(TestCaseError::fail(format!("{} ended without an array", kind.name())));
            };
            prop_assert_eq!(&last.values(), &expected, "{}", kind.name());
            prop_assert!(last.all_tagged(Tag::Sorted));
        }
    }
}
