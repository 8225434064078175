// src/engine/supervisor.rs

use std::fmt;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::engine::queue::TaskReceiver;
use crate::exec::{Launcher, Runner};
use crate::types::{RunOutcome, Task, TaskRequest};

/// Externally visible supervisor state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    /// No runner exists; one is about to be launched.
    Idle,
    /// A runner has been launched and not yet joined.
    Active,
    /// The loop has ended; no further tasks are processed.
    Stopped,
}

/// What the supervisor did over its lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupervisorSummary {
    /// Runner invocations started (including ones whose launch failed).
    pub launches: usize,
    /// Outcome of every joined runner, in order.
    pub outcomes: Vec<RunOutcome>,
    /// Requests that did not name a task.
    pub bogus_tasks: usize,
}

/// Handle for the currently running invocation.
///
/// - `cancel` asks the runner to stop its process.
/// - `handle` is the Tokio task running it; it is always joined before the
///   next invocation is launched.
struct ActiveRun {
    cancel: CancellationToken,
    handle: JoinHandle<RunOutcome>,
}

/// Owns the command's lifecycle and serializes reload/stop requests.
///
/// Invariant: at most one runner is alive at a time. A new one is only
/// launched after the previous one has been cancelled and joined.
pub struct Supervisor<L: Launcher> {
    runner: Runner<L>,
    tasks: TaskReceiver,
    state_tx: watch::Sender<SupervisorState>,
    summary: SupervisorSummary,
}

impl<L: Launcher> fmt::Debug for Supervisor<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Supervisor")
            .field("command", self.runner.command())
            .field("state", &*self.state_tx.borrow())
            .field("summary", &self.summary)
            .finish_non_exhaustive()
    }
}

impl<L: Launcher> Supervisor<L> {
    pub fn new(runner: Runner<L>, tasks: TaskReceiver) -> Self {
        let (state_tx, _) = watch::channel(SupervisorState::Idle);
        Self {
            runner,
            tasks,
            state_tx,
            summary: SupervisorSummary::default(),
        }
    }

    /// Subscribe to state changes.
    pub fn state(&self) -> watch::Receiver<SupervisorState> {
        self.state_tx.subscribe()
    }

    /// Main loop.
    ///
    /// Launches the command immediately, then for every request:
    /// - `Reload`: stop the current invocation and start a new one;
    /// - `Stop`: stop the current invocation and return;
    /// - anything else: log it and keep waiting.
    ///
    /// A closed queue is treated like `Stop`.
    pub async fn run(mut self) -> SupervisorSummary {
        info!(command = %self.runner.command(), "supervisor started");

        'launch: loop {
            let active = self.launch();

            loop {
                let request = self.tasks.dequeue().await;
                debug!(?request, "supervisor received task");

                match request {
                    Some(TaskRequest::Task(Task::Reload)) => {
                        info!("reload requested; restarting command");
                        self.finish(active).await;
                        continue 'launch;
                    }
                    Some(TaskRequest::Task(Task::Stop)) => {
                        info!("stop requested");
                        self.finish(active).await;
                        break 'launch;
                    }
                    None => {
                        info!("task queue closed; stopping");
                        self.finish(active).await;
                        break 'launch;
                    }
                    Some(TaskRequest::Unrecognized(value)) => {
                        warn!(task = %value, "bogus task: {value:?}");
                        self.summary.bogus_tasks += 1;
                    }
                }
            }
        }

        self.state_tx.send_replace(SupervisorState::Stopped);
        info!(launches = self.summary.launches, "supervisor finished");
        self.summary
    }

    fn launch(&mut self) -> ActiveRun {
        let cancel = CancellationToken::new();
        let runner = self.runner.clone();
        let token = cancel.clone();

        let handle = tokio::spawn(async move { runner.run(token).await });

        self.summary.launches += 1;
        self.state_tx.send_replace(SupervisorState::Active);

        ActiveRun { cancel, handle }
    }

    /// Cancel the active invocation and wait for it to fully return.
    async fn finish(&mut self, active: ActiveRun) {
        active.cancel.cancel();

        match active.handle.await {
            Ok(outcome) => {
                debug!(?outcome, "runner joined");
                self.summary.outcomes.push(outcome);
            }
            Err(err) => {
                error!(error = %err, "runner task failed");
                self.summary.outcomes.push(RunOutcome::Aborted);
            }
        }

        self.state_tx.send_replace(SupervisorState::Idle);
    }
}
