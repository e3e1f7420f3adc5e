//! Quiz attempt timer.
//!
//! Binds a [`CountdownEngine`] to a schedule and an observer. This is the
//! surface a quiz front end talks to: construct with the attempt duration,
//! start, and react to `on_tick` / `on_complete`.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::Result;
use crate::events::Event;
use crate::timer::engine::{CountdownEngine, TimerState};
use crate::timer::scheduler::{ScheduleHandle, Scheduler};

/// The countdown fires once per wall-clock second.
const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Receives countdown notifications.
///
/// Callbacks run on the scheduler's thread, serialized by the single
/// schedule; two notifications never run concurrently.
pub trait TimerObserver: Send + Sync {
    /// One counted second elapsed. Carries the new remaining value;
    /// the final call carries 0 and precedes `on_complete`.
    fn on_tick(&self, remaining_secs: u64);

    /// The countdown reached zero. Called exactly once.
    fn on_complete(&self);
}

/// Countdown timer for a single quiz attempt.
///
/// Owns the schedule handle exclusively: the schedule exists only between
/// `start()` and `stop()` (or completion), and dies with the timer.
pub struct AttemptTimer {
    engine: Arc<Mutex<CountdownEngine>>,
    observer: Arc<dyn TimerObserver>,
    handle: Option<ScheduleHandle>,
}

impl AttemptTimer {
    /// Create a timer with the default pause budget.
    ///
    /// # Errors
    ///
    /// Fails fast on a zero duration.
    pub fn new(duration_secs: u64, observer: Arc<dyn TimerObserver>) -> Result<Self> {
        let engine = CountdownEngine::new(duration_secs)?;
        Ok(Self {
            engine: Arc::new(Mutex::new(engine)),
            observer,
            handle: None,
        })
    }

    /// Create a timer with a custom pause budget.
    ///
    /// # Errors
    ///
    /// Fails fast on a zero duration.
    pub fn with_pause_credits(
        duration_secs: u64,
        pause_credits: u8,
        observer: Arc<dyn TimerObserver>,
    ) -> Result<Self> {
        let engine = CountdownEngine::with_pause_credits(duration_secs, pause_credits)?;
        Ok(Self {
            engine: Arc::new(Mutex::new(engine)),
            observer,
            handle: None,
        })
    }

    /// Begin the once-per-second schedule. Returns `false` without creating
    /// a second schedule when the timer was already started.
    pub fn start(&mut self, scheduler: &dyn Scheduler) -> bool {
        if self.engine.lock().unwrap().start().is_none() {
            return false;
        }
        let engine = Arc::clone(&self.engine);
        let observer = Arc::clone(&self.observer);
        let handle = scheduler.schedule_repeating(
            TICK_PERIOD,
            Box::new(move || {
                // Collect under the lock, notify outside it.
                let events = engine.lock().unwrap().tick();
                let mut live = true;
                for event in &events {
                    match event {
                        Event::Tick { remaining_secs, .. } => observer.on_tick(*remaining_secs),
                        Event::AttemptCompleted { .. } => {
                            observer.on_complete();
                            live = false;
                        }
                        _ => {}
                    }
                }
                live
            }),
        );
        self.handle = Some(handle);
        true
    }

    /// Spend one pause credit. Returns `false` when the budget is
    /// exhausted or no countdown is underway; paused seconds are discarded
    /// from the countdown.
    pub fn pause(&mut self) -> bool {
        self.engine.lock().unwrap().pause().is_some()
    }

    /// Leave the paused state. A no-op when not paused; never refunds
    /// pause credits.
    pub fn resume(&mut self) {
        self.engine.lock().unwrap().resume();
    }

    /// Cancel the schedule so no further ticks fire. Safe to call
    /// repeatedly; completion is never reported for a stopped attempt.
    pub fn stop(&mut self) {
        self.engine.lock().unwrap().stop();
        if let Some(handle) = self.handle.take() {
            handle.cancel();
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.engine.lock().unwrap().state()
    }

    pub fn remaining_secs(&self) -> u64 {
        self.engine.lock().unwrap().remaining_secs()
    }

    pub fn pauses_remaining(&self) -> u8 {
        self.engine.lock().unwrap().pauses_remaining()
    }

    pub fn snapshot(&self) -> Event {
        self.engine.lock().unwrap().snapshot()
    }
}

impl Drop for AttemptTimer {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::scheduler::ManualScheduler;

    #[derive(Default)]
    struct Recorder {
        ticks: Mutex<Vec<u64>>,
        completions: Mutex<u32>,
    }

    impl Recorder {
        fn ticks(&self) -> Vec<u64> {
            self.ticks.lock().unwrap().clone()
        }

        fn completions(&self) -> u32 {
            *self.completions.lock().unwrap()
        }
    }

    impl TimerObserver for Recorder {
        fn on_tick(&self, remaining_secs: u64) {
            self.ticks.lock().unwrap().push(remaining_secs);
        }

        fn on_complete(&self) {
            *self.completions.lock().unwrap() += 1;
        }
    }

    fn attempt(duration: u64) -> (AttemptTimer, Arc<Recorder>, ManualScheduler) {
        let recorder = Arc::new(Recorder::default());
        let observer: Arc<dyn TimerObserver> = recorder.clone();
        let timer = AttemptTimer::new(duration, observer).unwrap();
        (timer, recorder, ManualScheduler::new())
    }

    #[test]
    fn full_countdown_notifies_every_second() {
        let (mut timer, recorder, scheduler) = attempt(5);
        assert!(timer.start(&scheduler));
        scheduler.fire_many(5);

        assert_eq!(recorder.ticks(), vec![4, 3, 2, 1, 0]);
        assert_eq!(recorder.completions(), 1);
        assert_eq!(timer.state(), TimerState::Completed);
    }

    #[test]
    fn completion_cancels_the_schedule() {
        let (mut timer, recorder, scheduler) = attempt(2);
        timer.start(&scheduler);
        scheduler.fire_many(4);

        assert_eq!(recorder.ticks(), vec![1, 0]);
        assert_eq!(recorder.completions(), 1);
        assert!(!scheduler.is_scheduled());
    }

    #[test]
    fn double_start_does_not_create_a_second_schedule() {
        let (mut timer, recorder, scheduler) = attempt(10);
        assert!(timer.start(&scheduler));
        assert!(!timer.start(&scheduler));
        scheduler.fire();
        assert_eq!(recorder.ticks(), vec![9]);
    }

    #[test]
    fn paused_seconds_are_silent_and_discarded() {
        let (mut timer, recorder, scheduler) = attempt(5);
        timer.start(&scheduler);
        scheduler.fire_many(2);
        assert_eq!(timer.remaining_secs(), 3);

        assert!(timer.pause());
        assert_eq!(timer.pauses_remaining(), 1);
        scheduler.fire_many(3);
        assert_eq!(timer.remaining_secs(), 3);
        assert_eq!(recorder.ticks(), vec![4, 3]);

        timer.resume();
        scheduler.fire_many(3);
        assert_eq!(recorder.ticks(), vec![4, 3, 2, 1, 0]);
        assert_eq!(recorder.completions(), 1);
    }

    #[test]
    fn pause_budget_is_two_grants() {
        let (mut timer, _recorder, scheduler) = attempt(30);
        timer.start(&scheduler);
        assert!(timer.pause());
        assert!(timer.pause());
        assert!(!timer.pause());
        assert_eq!(timer.pauses_remaining(), 0);
    }

    #[test]
    fn stop_silences_the_timer_without_completion() {
        let (mut timer, recorder, scheduler) = attempt(10);
        timer.start(&scheduler);
        scheduler.fire_many(2);
        timer.stop();

        assert!(!scheduler.is_scheduled());
        scheduler.fire_many(3);
        assert_eq!(recorder.ticks(), vec![9, 8]);
        assert_eq!(recorder.completions(), 0);
        assert_eq!(timer.state(), TimerState::Stopped);
        // Idempotent.
        timer.stop();
    }

    #[test]
    fn dropping_the_timer_releases_the_schedule() {
        let recorder = Arc::new(Recorder::default());
        let scheduler = ManualScheduler::new();
        {
            let observer: Arc<dyn TimerObserver> = recorder.clone();
            let mut timer = AttemptTimer::new(10, observer).unwrap();
            timer.start(&scheduler);
            assert!(scheduler.is_scheduled());
        }
        assert!(!scheduler.is_scheduled());
    }

    #[test]
    fn zero_duration_fails_fast() {
        let recorder = Arc::new(Recorder::default());
        assert!(AttemptTimer::new(0, recorder).is_err());
    }

    #[test]
    fn snapshot_exposes_the_attempt() {
        let (mut timer, _recorder, scheduler) = attempt(8);
        timer.start(&scheduler);
        scheduler.fire_many(2);
        match timer.snapshot() {
            Event::StateSnapshot {
                state,
                remaining_secs,
                ..
            } => {
                assert_eq!(state, TimerState::Running);
                assert_eq!(remaining_secs, 6);
            }
            _ => panic!("Expected StateSnapshot"),
        }
    }
}
