// src/exec/status.rs

//! Terminal status reporting for commands that exit on their own.
//!
//! This is the only user-facing verdict noticer prints. It is kept separate
//! from `tracing` so that the banner shows up regardless of the log level.

use std::io::IsTerminal;

use crate::types::{CommandSpec, Verdict};

pub const GREEN: &str = "\x1b[32m";
pub const RED: &str = "\x1b[31m";
pub const RESET: &str = "\x1b[0m";

/// Receives the verdict of every runner invocation that produced one.
pub trait StatusSink: Send + Sync {
    fn report(&self, command: &CommandSpec, verdict: Verdict);
}

/// Prints `COMMAND SUCCEEDED` / `COMMAND FAILED` banners on stderr.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleStatus {
    color: bool,
}

impl ConsoleStatus {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Colour only when stderr is a terminal and `NO_COLOR` is not set.
    pub fn detect() -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self::new(!no_color && std::io::stderr().is_terminal())
    }
}

impl StatusSink for ConsoleStatus {
    fn report(&self, _command: &CommandSpec, verdict: Verdict) {
        eprintln!("{}", status_line(verdict, self.color));
    }
}

/// Render the banner for a verdict.
pub fn status_line(verdict: Verdict, color: bool) -> String {
    let (text, colour) = match verdict {
        Verdict::Succeeded => ("COMMAND SUCCEEDED", GREEN),
        Verdict::Failed(_) => ("COMMAND FAILED", RED),
    };

    if color {
        format!("{colour}{text}{RESET}")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_banners() {
        assert_eq!(status_line(Verdict::Succeeded, false), "COMMAND SUCCEEDED");
        assert_eq!(status_line(Verdict::Failed(1), false), "COMMAND FAILED");
    }

    #[test]
    fn coloured_banners() {
        assert_eq!(
            status_line(Verdict::Succeeded, true),
            format!("{GREEN}COMMAND SUCCEEDED{RESET}")
        );
        assert_eq!(
            status_line(Verdict::Failed(127), true),
            format!("{RED}COMMAND FAILED{RESET}")
        );
    }
}
