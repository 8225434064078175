// src/control.rs

//! Optional interactive control from stdin.
//!
//! Each non-empty line is one request: `reload`/`r` restarts the command,
//! `stop`/`q` shuts noticer down. Anything else is forwarded as-is so the
//! supervisor can report it as a bogus task.
//!
//! Stdin is read on a plain OS thread so a pending read never holds up
//! runtime shutdown.

use std::io::{self, BufRead};
use std::thread::{self, JoinHandle};

use tracing::{debug, info, warn};

use crate::engine::TaskSender;
use crate::types::{Priority, Task, TaskRequest};

/// Priority used for a request typed on stdin.
pub fn priority_for(request: &TaskRequest) -> Priority {
    match request {
        TaskRequest::Task(Task::Stop) => Priority::STOP,
        _ => Priority::MANUAL,
    }
}

/// Forward every line read from `input` to the task queue.
///
/// Returns the number of requests forwarded once `input` reaches EOF or the
/// queue closes.
pub fn forward_lines<R: BufRead>(input: R, tasks: TaskSender) -> usize {
    let mut forwarded = 0;

    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!(error = %err, "failed to read control input");
                break;
            }
        };

        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        let request = TaskRequest::parse(text);
        let priority = priority_for(&request);
        info!(?request, %priority, "control request");

        if let Err(err) = tasks.enqueue(priority, request) {
            debug!(error = %err, "supervisor gone; ending control input");
            break;
        }
        forwarded += 1;
    }

    debug!(forwarded, "control input closed");
    forwarded
}

/// Spawn a detached thread reading control requests from the process stdin.
///
/// The thread is never joined; it ends at EOF, when the queue closes, or with
/// the process.
pub fn spawn_stdin_control(tasks: TaskSender) -> io::Result<JoinHandle<usize>> {
    thread::Builder::new()
        .name("noticer-stdin".into())
        .spawn(move || forward_lines(io::stdin().lock(), tasks))
}
