// src/watch/bridge.rs

//! Glue between filesystem events and the supervisor's task queue.

use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};

use crate::engine::TaskSender;
use crate::types::{Priority, Task};
use crate::watch::filter::ExtensionFilter;
use crate::watch::path_utils::display_relative;

/// The kinds of filesystem change noticer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathEventKind {
    Created,
    Modified,
}

/// Turns relevant path events into `Reload` requests.
///
/// Runs on whatever thread the watcher delivers events on; the only work done
/// per event is a suffix check and a non-blocking enqueue.
#[derive(Debug, Clone)]
pub struct EventBridge {
    root: PathBuf,
    filter: ExtensionFilter,
    tasks: TaskSender,
}

impl EventBridge {
    pub fn new(root: impl Into<PathBuf>, filter: ExtensionFilter, tasks: TaskSender) -> Self {
        Self {
            root: root.into(),
            filter,
            tasks,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Handle one path event. Returns `true` if a reload was enqueued.
    pub fn on_path_event(&self, path: &Path, kind: PathEventKind) -> bool {
        if !self.filter.matches(path) {
            trace!(?path, ?kind, "ignoring path outside extension filter");
            return false;
        }

        debug!(
            path = %display_relative(&self.root, path),
            ?kind,
            "change detected; requesting reload"
        );

        match self.tasks.enqueue(Priority::FILE_CHANGE, Task::Reload) {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "supervisor is gone; dropping change event");
                false
            }
        }
    }
}
