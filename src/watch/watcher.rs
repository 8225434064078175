// src/watch/watcher.rs

use std::path::PathBuf;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{info, trace, warn};

use crate::errors::{NoticerError, Result};
use crate::watch::bridge::{EventBridge, PathEventKind};

/// Handle for the filesystem watcher.
///
/// This exists mainly so the underlying `RecommendedWatcher` is kept alive for
/// as long as needed. Dropping this handle will stop file watching.
pub struct WatcherHandle {
    root: PathBuf,
    _inner: RecommendedWatcher,
}

impl WatcherHandle {
    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

/// Map a `notify` event kind onto the kinds noticer cares about.
pub fn classify(kind: &EventKind) -> Option<PathEventKind> {
    match kind {
        EventKind::Create(_) => Some(PathEventKind::Created),
        EventKind::Modify(_) => Some(PathEventKind::Modified),
        _ => None,
    }
}

/// Watch `root` recursively, feeding create/modify events to `bridge`.
///
/// The root must be an existing directory; anything else is a startup error.
/// Events are handled directly on `notify`'s callback thread.
pub fn spawn_watcher(root: impl Into<PathBuf>, bridge: EventBridge) -> Result<WatcherHandle> {
    let root = root.into();
    if !root.is_dir() {
        return Err(NoticerError::ConfigError(format!(
            "watch directory {} does not exist or is not a directory",
            root.display()
        )));
    }
    // Canonicalize once so we have a stable base path.
    let root = root.canonicalize()?;

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                let Some(kind) = classify(&event.kind) else {
                    trace!(?event, "ignoring notify event");
                    return;
                };
                for path in &event.paths {
                    bridge.on_path_event(path, kind);
                }
            }
            Err(err) => {
                warn!(error = %err, "file watch error");
            }
        },
        Config::default(),
    )?;

    watcher.watch(&root, RecursiveMode::Recursive)?;

    info!("file watcher started on {:?}", root);

    Ok(WatcherHandle {
        root,
        _inner: watcher,
    })
}
