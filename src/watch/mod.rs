// src/watch/mod.rs

//! File watching and change detection.
//!
//! This module is responsible for:
//! - Wiring up a cross-platform recursive filesystem watcher (`notify`).
//! - Deciding which changed paths are relevant (extension allowlist).
//! - Turning each relevant change into a `Reload` request on the task queue.
//!
//! It does **not** know about processes; it only produces requests.

pub mod bridge;
pub mod filter;
pub mod path_utils;
pub mod watcher;

pub use bridge::{EventBridge, PathEventKind};
pub use filter::ExtensionFilter;
pub use watcher::{spawn_watcher, WatcherHandle};
