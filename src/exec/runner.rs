// src/exec/runner.rs

//! A single runner invocation: launch the command, watch it, and stop it
//! when asked.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::exec::launcher::{ChildProcess, Launcher};
use crate::exec::status::StatusSink;
use crate::types::{CommandSpec, RunOutcome, Verdict};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(5);
pub const DEFAULT_KILL_TIMEOUT: Duration = Duration::from_secs(2);

/// Timing knobs for the runner's polling and termination protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// How often the process and the cancellation token are checked.
    pub poll_interval: Duration,
    /// How long an interrupted process may take to exit before it is killed.
    pub grace_period: Duration,
    /// How long to wait for a killed process to be reaped.
    pub kill_timeout: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            grace_period: DEFAULT_GRACE_PERIOD,
            kill_timeout: DEFAULT_KILL_TIMEOUT,
        }
    }
}

/// Everything needed to run the supervised command once.
///
/// Cloning is cheap; the supervisor hands a clone to every spawned
/// invocation.
pub struct Runner<L: Launcher> {
    command: CommandSpec,
    launcher: Arc<L>,
    status: Arc<dyn StatusSink>,
    timing: Timing,
}

impl<L: Launcher> Clone for Runner<L> {
    fn clone(&self) -> Self {
        Self {
            command: self.command.clone(),
            launcher: Arc::clone(&self.launcher),
            status: Arc::clone(&self.status),
            timing: self.timing,
        }
    }
}

impl<L: Launcher> Runner<L> {
    pub fn new(
        command: CommandSpec,
        launcher: Arc<L>,
        status: Arc<dyn StatusSink>,
        timing: Timing,
    ) -> Self {
        Self {
            command,
            launcher,
            status,
            timing,
        }
    }

    pub fn command(&self) -> &CommandSpec {
        &self.command
    }

    /// Run the command until it exits or `cancel` fires.
    ///
    /// Never fails: launch and monitoring errors are logged and reported as
    /// [`RunOutcome::LaunchFailed`] / [`RunOutcome::Aborted`]. A verdict is
    /// reported to the status sink only when the process exits on its own.
    pub async fn run(&self, cancel: CancellationToken) -> RunOutcome {
        info!(command = %self.command, "starting command");

        let mut child = match self.launcher.launch(&self.command) {
            Ok(child) => child,
            Err(err) => {
                error!(
                    command = %self.command,
                    error = %format!("{err:#}"),
                    "failed to launch command"
                );
                return RunOutcome::LaunchFailed;
            }
        };

        debug!(command = %self.command, pid = ?child.id(), "command launched");

        match self.monitor(child.as_mut(), &cancel).await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(
                    command = %self.command,
                    error = %format!("{err:#}"),
                    "error while monitoring command"
                );
                RunOutcome::Aborted
            }
        }
    }

    async fn monitor(
        &self,
        child: &mut dyn ChildProcess,
        cancel: &CancellationToken,
    ) -> Result<RunOutcome> {
        loop {
            // Natural exit is checked first so a process that already died is
            // never sent an interrupt.
            if let Some(code) = child
                .try_exit_code()
                .with_context(|| format!("polling command '{}'", self.command))?
            {
                let verdict = Verdict::from_exit_code(code);
                info!(
                    command = %self.command,
                    exit_code = code,
                    success = verdict == Verdict::Succeeded,
                    "command exited"
                );
                self.status.report(&self.command, verdict);
                return Ok(RunOutcome::Exited { code });
            }

            if cancel.is_cancelled() {
                return self.terminate(child).await;
            }

            tokio::select! {
                _ = sleep(self.timing.poll_interval) => {}
                _ = cancel.cancelled() => {}
            }
        }
    }

    /// Interrupt, wait out the grace period, then kill.
    async fn terminate(&self, child: &mut dyn ChildProcess) -> Result<RunOutcome> {
        info!(command = %self.command, "stopping command");

        if let Err(err) = child.interrupt() {
            warn!(
                command = %self.command,
                error = %format!("{err:#}"),
                "failed to interrupt command; waiting for grace period anyway"
            );
        }

        let exited = child
            .wait_for(self.timing.grace_period)
            .await
            .with_context(|| format!("waiting for command '{}' to stop", self.command))?;

        if let Some(code) = exited {
            debug!(command = %self.command, exit_code = code, "command stopped after interrupt");
            return Ok(RunOutcome::Interrupted);
        }

        warn!(
            command = %self.command,
            grace_ms = self.timing.grace_period.as_millis() as u64,
            "command ignored interrupt; killing"
        );

        child
            .kill()
            .with_context(|| format!("killing command '{}'", self.command))?;

        match child.wait_for(self.timing.kill_timeout).await {
            Ok(Some(_)) => debug!(command = %self.command, "killed command reaped"),
            Ok(None) => warn!(
                command = %self.command,
                "command still not reaped after kill; giving up on it"
            ),
            Err(err) => warn!(
                command = %self.command,
                error = %format!("{err:#}"),
                "failed waiting for killed command"
            ),
        }

        Ok(RunOutcome::Killed)
    }
}
