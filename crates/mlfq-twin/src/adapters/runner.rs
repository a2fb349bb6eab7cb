//! Background Runner
//!
//! The run loop is synchronous and may sleep between turns, so it gets a
//! dedicated OS thread instead of an async task:
//!
//! ```text
//!  caller (async or not)             mlfq-engine thread
//!  ─────────────────────             ──────────────────
//!  spawn_engine(engine) ───────────> engine.schedule()
//!  rx.recv().await      <── mpsc ─── ChannelObserver
//!  handle.cancel()      ── token ──> checked every unit
//!  handle.join()        <─────────── RunSummary, engine dropped
//! ```
//!
//! The engine is dropped on its thread when the run ends. With a
//! `ChannelObserver` this closes the notification channel, so a receiver loop
//! ends on its own once the final notifications are drained.

use std::any::Any;
use std::io;
use std::thread::{self, JoinHandle};

use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::domain::process::ProcessSpec;
use crate::domain::scheduler::{
    CancellationToken, ChannelObserver, EngineConfig, EngineNotification, FixedDelay,
    InteractiveEngine, Pacer, RunConfig, RunSummary, SchedulerError, SchedulerObserver,
    SchedulingEngine,
};

const ENGINE_THREAD_NAME: &str = "mlfq-engine";

/// Handle to an engine running on its own thread
#[derive(Debug)]
pub struct EngineHandle {
    thread: JoinHandle<Result<RunSummary, SchedulerError>>,
    token: CancellationToken,
}

impl EngineHandle {
    /// Request cooperative cancellation
    ///
    /// The engine stops at the next unit boundary; `join` then returns a
    /// summary with `RunOutcome::Cancelled`.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// The cancellation token shared with the engine
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Whether the run loop has returned
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Block until the run ends
    ///
    /// # Errors
    ///
    /// The engine's own error, or `InvariantViolation` if the engine thread
    /// panicked.
    pub fn join(self) -> Result<RunSummary, SchedulerError> {
        match self.thread.join() {
            Ok(result) => result,
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!(%message, "engine thread panicked");
                Err(SchedulerError::InvariantViolation(message))
            }
        }
    }

    /// Wait for the run to end without blocking the async runtime
    ///
    /// # Errors
    ///
    /// As [`join`](Self::join).
    pub async fn wait(self) -> Result<RunSummary, SchedulerError> {
        tokio::task::spawn_blocking(move || self.join())
            .await
            .map_err(|e| SchedulerError::InvariantViolation(e.to_string()))?
    }
}

/// Run `engine.schedule()` on a dedicated, named thread
///
/// # Errors
///
/// Only if the OS refuses to create the thread.
pub fn spawn_engine<O, P>(mut engine: SchedulingEngine<O, P>) -> io::Result<EngineHandle>
where
    O: SchedulerObserver + 'static,
    P: Pacer + 'static,
{
    let token = engine.cancellation_token();
    let thread = thread::Builder::new()
        .name(ENGINE_THREAD_NAME.to_string())
        .spawn(move || engine.schedule())?;
    debug!(thread = ENGINE_THREAD_NAME, "engine spawned");
    Ok(EngineHandle { thread, token })
}

/// Build an `InteractiveEngine` wired to a fresh notification channel
///
/// # Errors
///
/// Configuration or submission errors.
pub fn channel_engine(
    config: EngineConfig,
    processes: &[ProcessSpec],
    run: RunConfig,
) -> Result<(InteractiveEngine, mpsc::UnboundedReceiver<EngineNotification>), SchedulerError> {
    let (observer, rx) = ChannelObserver::channel();
    let pacer = FixedDelay(run.pacing().unwrap_or_default());
    let mut engine = SchedulingEngine::with_parts(config, observer, pacer)?;
    for spec in processes {
        engine.add_spec(spec.clone())?;
    }
    Ok((engine, rx))
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "engine thread panicked".to_string()
    }
}
