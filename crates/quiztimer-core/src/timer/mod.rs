mod attempt;
mod engine;
mod scheduler;

pub use attempt::{AttemptTimer, TimerObserver};
pub use engine::{CountdownEngine, TimerState, DEFAULT_PAUSE_CREDITS};
pub use scheduler::{ManualScheduler, ScheduleHandle, Scheduler, TickFn, TokioScheduler};
