//! # Quiztimer Core Library
//!
//! This library provides the core logic for the Quiztimer quiz countdown.
//! It implements a CLI-first philosophy where the full timer surface is
//! available via a standalone CLI binary, with any UI layer being a thin
//! consumer of the same core library.
//!
//! ## Architecture
//!
//! - **Countdown Engine**: a caller-driven state machine where one `tick()`
//!   call represents one elapsed wall-clock second
//! - **Scheduler**: an injected periodic-schedule abstraction; production
//!   runs on a tokio interval task, tests fire ticks deterministically
//! - **Attempt Timer**: binds an engine, a scheduler, and an observer into
//!   the start/pause/resume/stop surface used by a quiz attempt
//! - **Storage**: TOML-based configuration for CLI defaults
//!
//! ## Key Components
//!
//! - [`CountdownEngine`]: core timer state machine
//! - [`AttemptTimer`]: schedule-owning attempt surface
//! - [`Scheduler`]: periodic-schedule trait with tokio and manual impls
//! - [`Config`]: application configuration management

pub mod error;
pub mod events;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use storage::Config;
pub use timer::{
    AttemptTimer, CountdownEngine, ManualScheduler, ScheduleHandle, Scheduler, TimerObserver,
    TimerState, TokioScheduler, DEFAULT_PAUSE_CREDITS,
};
