// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`launcher`] provides the `Launcher` / `ChildProcess` traits and the
//!   real `tokio::process` implementation, which tests replace with fakes.
//! - [`runner`] runs one invocation of the supervised command, including the
//!   interrupt → grace period → kill protocol.
//! - [`status`] prints the success/failure banner for commands that exit on
//!   their own.

pub mod launcher;
pub mod runner;
pub mod status;

pub use launcher::{BoxFuture, ChildProcess, Launcher, ProcessLauncher};
pub use runner::{Runner, Timing};
pub use status::{ConsoleStatus, StatusSink};
