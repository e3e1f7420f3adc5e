//! Periodic schedule abstraction.
//!
//! The countdown is driven by a recurring once-per-second callback. The
//! scheduling primitive is injected so the engine can run on a real tokio
//! interval in production and on a hand-fired fake in tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

/// The repeating callback. Returning `false` cancels the schedule from
/// inside a firing.
pub type TickFn = Box<dyn FnMut() -> bool + Send>;

/// Source of recurring schedules.
pub trait Scheduler {
    /// Fire `tick` once per `period` until the handle is cancelled or the
    /// callback returns `false`.
    fn schedule_repeating(&self, period: Duration, tick: TickFn) -> ScheduleHandle;
}

/// Cancellation handle for an active schedule.
///
/// Exactly one handle exists per schedule. Dropping it cancels the
/// schedule, so a timer can never keep firing after its owner is gone.
pub struct ScheduleHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl ScheduleHandle {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Cancel the schedule. Safe to call on an already-finished schedule.
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for ScheduleHandle {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for ScheduleHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduleHandle").finish_non_exhaustive()
    }
}

/// Wall-clock scheduler backed by a tokio interval task.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    runtime: tokio::runtime::Handle,
}

impl TokioScheduler {
    /// Bind to the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime context.
    pub fn new() -> Self {
        Self {
            runtime: tokio::runtime::Handle::current(),
        }
    }

    pub fn with_handle(runtime: tokio::runtime::Handle) -> Self {
        Self { runtime }
    }
}

impl Default for TokioScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_repeating(&self, period: Duration, mut tick: TickFn) -> ScheduleHandle {
        let task = self.runtime.spawn(async move {
            // First firing lands one full period after scheduling. A
            // stalled host skips missed firings instead of burst-replaying
            // them: a tick always means one elapsed second.
            let start = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(start, period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if !tick() {
                    break;
                }
            }
        });
        ScheduleHandle::new(move || task.abort())
    }
}

struct ManualSlot {
    callback: Option<TickFn>,
    cancelled: bool,
}

/// Deterministic scheduler for tests and simulations.
///
/// Holds at most one schedule; [`ManualScheduler::fire`] runs it once,
/// synchronously, on the caller's thread.
#[derive(Clone)]
pub struct ManualScheduler {
    slot: Arc<Mutex<ManualSlot>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(ManualSlot {
                callback: None,
                cancelled: false,
            })),
        }
    }

    /// Whether a live schedule is registered.
    pub fn is_scheduled(&self) -> bool {
        self.slot.lock().unwrap().callback.is_some()
    }

    /// Fire the scheduled callback once. Returns `false` when no schedule
    /// is live (never scheduled, cancelled, or self-terminated).
    pub fn fire(&self) -> bool {
        let callback = self.slot.lock().unwrap().callback.take();
        let Some(mut callback) = callback else {
            return false;
        };
        let keep = callback();
        let mut slot = self.slot.lock().unwrap();
        if keep && !slot.cancelled {
            slot.callback = Some(callback);
        }
        true
    }

    /// Fire `n` times.
    pub fn fire_many(&self, n: u64) {
        for _ in 0..n {
            self.fire();
        }
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&self, _period: Duration, tick: TickFn) -> ScheduleHandle {
        {
            let mut slot = self.slot.lock().unwrap();
            slot.callback = Some(tick);
            slot.cancelled = false;
        }
        let slot = Arc::clone(&self.slot);
        ScheduleHandle::new(move || {
            let mut slot = slot.lock().unwrap();
            slot.callback = None;
            slot.cancelled = true;
        })
    }
}
