// src/exec/launcher.rs

//! Pluggable process launcher abstraction.
//!
//! The runner talks to a `Launcher` instead of `tokio::process::Command`
//! directly. Production code uses [`ProcessLauncher`]; tests provide
//! scripted fakes that never touch the OS but record every interrupt and
//! kill they receive.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::process::{Child, Command};
use tokio::time::timeout;

use crate::types::CommandSpec;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Starts OS processes for a [`CommandSpec`].
pub trait Launcher: Send + Sync + 'static {
    fn launch(&self, command: &CommandSpec) -> Result<Box<dyn ChildProcess>>;
}

/// A running child process, exclusively owned by one runner invocation.
///
/// Exit codes are plain integers; a process that ended without one (e.g.
/// terminated by a signal) reports `-1`.
pub trait ChildProcess: Send {
    /// OS process id, if the process has not been reaped yet.
    fn id(&self) -> Option<u32>;

    /// Non-blocking check whether the process has exited.
    fn try_exit_code(&mut self) -> Result<Option<i32>>;

    /// Ask the process to stop (SIGINT on Unix).
    fn interrupt(&mut self) -> Result<()>;

    /// Wait at most `limit` for the process to exit; `None` on timeout.
    fn wait_for(&mut self, limit: Duration) -> BoxFuture<'_, Result<Option<i32>>>;

    /// Forcibly terminate the process without waiting for it.
    fn kill(&mut self) -> Result<()>;
}

/// Real launcher backed by `tokio::process`.
///
/// stdout/stderr are inherited so the command's output goes straight to the
/// terminal. stdin is inherited unless `detach_stdin` is set, which is needed
/// when noticer itself reads control commands from stdin.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLauncher {
    detach_stdin: bool,
}

impl ProcessLauncher {
    pub fn new(detach_stdin: bool) -> Self {
        Self { detach_stdin }
    }
}

impl Launcher for ProcessLauncher {
    fn launch(&self, command: &CommandSpec) -> Result<Box<dyn ChildProcess>> {
        let mut cmd = Command::new(command.program());
        cmd.args(command.args())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        if self.detach_stdin {
            cmd.stdin(Stdio::null());
        }

        let child = cmd
            .spawn()
            .with_context(|| format!("spawning process for command '{command}'"))?;

        Ok(Box::new(OsChild { child }))
    }
}

struct OsChild {
    child: Child,
}

impl ChildProcess for OsChild {
    fn id(&self) -> Option<u32> {
        self.child.id()
    }

    fn try_exit_code(&mut self) -> Result<Option<i32>> {
        let status = self.child.try_wait().context("polling child process")?;
        Ok(status.map(|s| s.code().unwrap_or(-1)))
    }

    #[cfg(unix)]
    fn interrupt(&mut self) -> Result<()> {
        use nix::errno::Errno;
        use nix::sys::signal::{self, Signal};
        use nix::unistd::Pid;

        // Already reaped: nothing left to signal.
        let Some(pid) = self.child.id() else {
            return Ok(());
        };

        match signal::kill(Pid::from_raw(pid as i32), Signal::SIGINT) {
            Ok(()) | Err(Errno::ESRCH) => Ok(()),
            Err(e) => Err(std::io::Error::other(e)).context("sending SIGINT"),
        }
    }

    #[cfg(not(unix))]
    fn interrupt(&mut self) -> Result<()> {
        // No SIGINT equivalent for arbitrary child processes.
        self.child.start_kill().context("terminating child process")
    }

    fn wait_for(&mut self, limit: Duration) -> BoxFuture<'_, Result<Option<i32>>> {
        Box::pin(async move {
            match timeout(limit, self.child.wait()).await {
                Ok(status) => {
                    let status = status.context("waiting for child process")?;
                    Ok(Some(status.code().unwrap_or(-1)))
                }
                Err(_elapsed) => Ok(None),
            }
        })
    }

    fn kill(&mut self) -> Result<()> {
        self.child.start_kill().context("killing child process")
    }
}
