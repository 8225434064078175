// src/engine/mod.rs

//! Supervision engine for noticer.
//!
//! This module ties together:
//! - the task queue that reload/stop requests flow through
//!   (watcher, stdin control, OS signals → [`queue`]);
//! - the supervisor loop that owns the command's lifecycle
//!   ([`supervisor`]).

pub mod queue;
pub mod supervisor;

pub use queue::{task_queue, QueueClosed, TaskReceiver, TaskSender};
pub use supervisor::{Supervisor, SupervisorState, SupervisorSummary};
