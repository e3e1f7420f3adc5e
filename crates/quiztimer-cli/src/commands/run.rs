//! Foreground attempt runner.
//!
//! Drives a single countdown on a tokio scheduler. Control lines are read
//! from stdin (`p` pause, `r` resume, `q` quit); EOF leaves the countdown
//! running to completion.

use std::io::Write as _;
use std::sync::Arc;

use clap::Args;
use quiztimer_core::{AttemptTimer, Config, TimerObserver, TokioScheduler};
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;

#[derive(Args)]
pub struct RunArgs {
    /// Countdown duration in seconds (default: quiz.default_duration_secs)
    #[arg(long)]
    pub duration: Option<u64>,

    /// Pause credits for this attempt (default: quiz.pause_credits)
    #[arg(long)]
    pub pauses: Option<u8>,

    /// Emit machine-readable JSON events instead of human output
    #[arg(long)]
    pub json: bool,
}

struct ConsoleObserver {
    json: bool,
    bell: bool,
    done: mpsc::UnboundedSender<()>,
}

impl TimerObserver for ConsoleObserver {
    fn on_tick(&self, remaining_secs: u64) {
        if self.json {
            println!(
                "{}",
                serde_json::json!({ "type": "tick", "remaining_secs": remaining_secs })
            );
        } else {
            print!("\r{remaining_secs:>6}s remaining ");
            let _ = std::io::stdout().flush();
        }
    }

    fn on_complete(&self) {
        if self.json {
            println!("{}", serde_json::json!({ "type": "completed" }));
        } else {
            println!("\rtime's up             ");
            if self.bell {
                print!("\x07");
                let _ = std::io::stdout().flush();
            }
        }
        let _ = self.done.send(());
    }
}

enum Flow {
    Continue,
    Quit,
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let duration = args.duration.unwrap_or(config.quiz.default_duration_secs);
    let pauses = args.pauses.unwrap_or(config.quiz.pause_credits);
    let bell = config.notifications.enabled && config.notifications.bell;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(drive_attempt(duration, pauses, bell, args.json))
}

async fn drive_attempt(
    duration: u64,
    pauses: u8,
    bell: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (done_tx, mut done_rx) = mpsc::unbounded_channel();
    let observer = Arc::new(ConsoleObserver {
        json,
        bell,
        done: done_tx,
    });
    let mut attempt = AttemptTimer::with_pause_credits(duration, pauses, observer)?;

    let scheduler = TokioScheduler::new();
    attempt.start(&scheduler);
    tracing::info!(
        duration_secs = duration,
        pause_credits = pauses,
        "attempt started"
    );
    if !json {
        println!("countdown started: {duration}s (p pause, r resume, q quit)");
    }

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            _ = done_rx.recv() => {
                tracing::info!("attempt completed");
                return Ok(());
            }
            line = lines.next_line(), if stdin_open => {
                match line? {
                    None => stdin_open = false,
                    Some(cmd) => {
                        if let Flow::Quit = dispatch(&mut attempt, cmd.trim(), json) {
                            tracing::info!(
                                remaining_secs = attempt.remaining_secs(),
                                "attempt stopped"
                            );
                            return Ok(());
                        }
                    }
                }
            }
        }
    }
}

fn dispatch(attempt: &mut AttemptTimer, cmd: &str, json: bool) -> Flow {
    match cmd {
        "p" | "pause" => {
            if attempt.pause() {
                report(
                    attempt,
                    json,
                    &format!("paused, {} pause(s) left", attempt.pauses_remaining()),
                );
            } else {
                report(attempt, json, "pause denied: no pause credits left");
            }
            Flow::Continue
        }
        "r" | "resume" => {
            attempt.resume();
            report(attempt, json, "resumed");
            Flow::Continue
        }
        "q" | "quit" | "stop" => {
            attempt.stop();
            report(attempt, json, "stopped");
            Flow::Quit
        }
        "" => Flow::Continue,
        other => {
            eprintln!("unknown command: {other}");
            Flow::Continue
        }
    }
}

fn report(attempt: &AttemptTimer, json: bool, message: &str) {
    if json {
        if let Ok(snapshot) = serde_json::to_string(&attempt.snapshot()) {
            println!("{snapshot}");
        }
    } else {
        println!("\r{message}             ");
    }
}
