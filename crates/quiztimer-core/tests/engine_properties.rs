//! Property tests for the countdown engine.
//!
//! The engine is deterministic and caller-driven, so whole attempt
//! lifetimes can be explored without wall-clock waits.

use proptest::prelude::*;

use quiztimer_core::timer::{CountdownEngine, TimerState, DEFAULT_PAUSE_CREDITS};
use quiztimer_core::Event;

/// A command an attempt driver might issue between seconds.
#[derive(Debug, Clone, Copy)]
enum Op {
    Tick,
    Pause,
    Resume,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => Just(Op::Tick),
        1 => Just(Op::Pause),
        1 => Just(Op::Resume),
    ]
}

fn count_ticks(events: &[Event]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, Event::Tick { .. }))
        .count()
}

fn count_completions(events: &[Event]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, Event::AttemptCompleted { .. }))
        .count()
}

proptest! {
    /// After exactly D unpaused ticks the countdown is complete, exactly
    /// once, and stays complete.
    #[test]
    fn completes_after_exactly_duration_ticks(duration in 1u64..=300) {
        let mut engine = CountdownEngine::new(duration).unwrap();
        engine.start();

        let mut completions = 0;
        for second in 1..=duration {
            let events = engine.tick();
            prop_assert_eq!(count_ticks(&events), 1);
            completions += count_completions(&events);
            prop_assert_eq!(engine.remaining_secs(), duration - second);
        }

        prop_assert_eq!(completions, 1);
        prop_assert_eq!(engine.state(), TimerState::Completed);
        prop_assert_eq!(engine.remaining_secs(), 0);

        // Stray ticks change nothing.
        prop_assert!(engine.tick().is_empty());
        prop_assert_eq!(engine.remaining_secs(), 0);
    }

    /// Invariants hold across arbitrary command interleavings: remaining
    /// stays within bounds, the budget only shrinks, at most two pauses
    /// are ever granted, and completion fires at most once.
    #[test]
    fn invariants_hold_for_any_interleaving(
        duration in 1u64..=100,
        ops in prop::collection::vec(op_strategy(), 0..250),
    ) {
        let mut engine = CountdownEngine::new(duration).unwrap();
        engine.start();

        let mut grants = 0u32;
        let mut completions = 0usize;
        let mut last_budget = engine.pauses_remaining();

        for op in ops {
            match op {
                Op::Tick => {
                    completions += count_completions(&engine.tick());
                }
                Op::Pause => {
                    if engine.pause().is_some() {
                        grants += 1;
                    }
                }
                Op::Resume => {
                    engine.resume();
                }
            }

            prop_assert!(engine.remaining_secs() <= duration);
            prop_assert!(engine.pauses_remaining() <= last_budget);
            last_budget = engine.pauses_remaining();
        }

        prop_assert!(grants <= u32::from(DEFAULT_PAUSE_CREDITS));
        prop_assert!(completions <= 1);
        prop_assert_eq!(
            grants + u32::from(engine.pauses_remaining()),
            u32::from(DEFAULT_PAUSE_CREDITS)
        );
        if completions == 1 {
            prop_assert_eq!(engine.state(), TimerState::Completed);
            prop_assert_eq!(engine.remaining_secs(), 0);
        }
    }

    /// Paused stretches never change the remaining value, no matter how
    /// long they last.
    #[test]
    fn paused_ticks_never_decrement(
        duration in 2u64..=100,
        paused_ticks in 1u64..=50,
    ) {
        let mut engine = CountdownEngine::new(duration).unwrap();
        engine.start();
        engine.tick();
        let held = engine.remaining_secs();

        engine.pause();
        for _ in 0..paused_ticks {
            prop_assert!(engine.tick().is_empty());
        }
        prop_assert_eq!(engine.remaining_secs(), held);

        engine.resume();
        engine.tick();
        prop_assert_eq!(engine.remaining_secs(), held - 1);
    }
}
