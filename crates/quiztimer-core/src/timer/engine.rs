//! Countdown engine implementation.
//!
//! The engine is a caller-driven state machine. It does not use internal
//! threads or read the clock - the driver calls `tick()` once per elapsed
//! wall-clock second.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Paused <-> Running) -> Completed | Stopped
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = CountdownEngine::new(300)?;
//! engine.start();
//! // Once per second:
//! engine.tick(); // Returns Tick, plus AttemptCompleted on the final second
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::events::Event;

/// Pause credits granted to an attempt unless overridden.
pub const DEFAULT_PAUSE_CREDITS: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    /// The countdown reached zero. Terminal.
    Completed,
    /// Stopped externally before reaching zero. Terminal, no completion.
    Stopped,
}

/// Core countdown state machine.
///
/// One `tick()` call represents one elapsed second. A tick taken while
/// paused is discarded from the countdown.
#[derive(Debug, Clone)]
pub struct CountdownEngine {
    /// Total seconds allotted. Immutable after construction.
    duration_secs: u64,
    remaining_secs: u64,
    state: TimerState,
    /// Decremented only when a pause is granted.
    pauses_remaining: u8,
}

impl CountdownEngine {
    /// Create an engine with the default pause budget.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ZeroDuration`] for a zero duration.
    pub fn new(duration_secs: u64) -> Result<Self, ValidationError> {
        Self::with_pause_credits(duration_secs, DEFAULT_PAUSE_CREDITS)
    }

    /// Create an engine with a custom pause budget.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ZeroDuration`] for a zero duration.
    pub fn with_pause_credits(
        duration_secs: u64,
        pause_credits: u8,
    ) -> Result<Self, ValidationError> {
        if duration_secs == 0 {
            return Err(ValidationError::ZeroDuration);
        }
        Ok(Self {
            duration_secs,
            remaining_secs: duration_secs,
            state: TimerState::Idle,
            pauses_remaining: pause_credits,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn pauses_remaining(&self) -> u8 {
        self.pauses_remaining
    }

    /// 0.0 .. 1.0 progress through the countdown.
    pub fn progress(&self) -> f64 {
        1.0 - (self.remaining_secs as f64 / self.duration_secs as f64)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            duration_secs: self.duration_secs,
            remaining_secs: self.remaining_secs,
            pauses_remaining: self.pauses_remaining,
            progress: self.progress(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin the countdown. Only valid from `Idle`; a repeated start is a
    /// no-op so a second schedule is never created.
    pub fn start(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Idle => {
                self.state = TimerState::Running;
                Some(Event::AttemptStarted {
                    duration_secs: self.duration_secs,
                    pause_credits: self.pauses_remaining,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Spend one pause credit. `None` means the pause was denied: the
    /// budget is exhausted or the countdown is not underway.
    ///
    /// Pausing while already paused still consumes a credit - the budget
    /// counts `pause()` grants, not state transitions.
    pub fn pause(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Running | TimerState::Paused if self.pauses_remaining > 0 => {
                self.state = TimerState::Paused;
                self.pauses_remaining -= 1;
                Some(Event::AttemptPaused {
                    remaining_secs: self.remaining_secs,
                    pauses_remaining: self.pauses_remaining,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Leave the paused state. Does not touch the pause budget; a no-op
    /// when not paused.
    pub fn resume(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Paused => {
                self.state = TimerState::Running;
                Some(Event::AttemptResumed {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Stop the countdown without completing it. Idempotent in effect:
    /// `None` from any state that has no countdown to cancel.
    pub fn stop(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Running | TimerState::Paused => {
                self.state = TimerState::Stopped;
                Some(Event::AttemptStopped {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Count one elapsed second.
    ///
    /// Returns the events the second produced, in delivery order: a `Tick`
    /// carrying the new remaining value, followed by `AttemptCompleted`
    /// when the countdown reaches zero. A paused or terminal engine
    /// produces nothing - the second is discarded.
    pub fn tick(&mut self) -> Vec<Event> {
        match self.state {
            TimerState::Running => {
                self.remaining_secs = self.remaining_secs.saturating_sub(1);
                let mut events = vec![Event::Tick {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                }];
                if self.remaining_secs == 0 {
                    self.state = TimerState::Completed;
                    events.push(Event::AttemptCompleted {
                        duration_secs: self.duration_secs,
                        at: Utc::now(),
                    });
                }
                events
            }
            _ => Vec::new(),
        }
    }
}
