use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerState;

/// Every state change in the countdown produces an Event.
/// The CLI prints them; a UI layer would subscribe to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    AttemptStarted {
        duration_secs: u64,
        pause_credits: u8,
        at: DateTime<Utc>,
    },
    /// One counted second elapsed. Carries the post-decrement value.
    Tick {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    AttemptPaused {
        remaining_secs: u64,
        pauses_remaining: u8,
        at: DateTime<Utc>,
    },
    AttemptResumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Externally stopped before the countdown ran out. Never follows
    /// completion.
    AttemptStopped {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// The countdown reached zero. Emitted exactly once, after the final
    /// `Tick`.
    AttemptCompleted {
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        duration_secs: u64,
        remaining_secs: u64,
        pauses_remaining: u8,
        progress: f64,
        at: DateTime<Utc>,
    },
}
