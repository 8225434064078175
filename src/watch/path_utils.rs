// src/watch/path_utils.rs

//! Utility functions for path handling in the watcher.

use std::path::Path;

/// Render `path` relative to `root` with forward slashes, for log output.
///
/// Event paths usually start with the watch root. When they don't (e.g. the
/// root was given through a symlink, or macOS reports `/private/var/...`)
/// both sides are canonicalized and compared again. If the path still cannot
/// be related to `root`, it is rendered as-is.
pub fn display_relative(root: &Path, path: &Path) -> String {
    if let Ok(rel) = path.strip_prefix(root) {
        return rel.to_string_lossy().replace('\\', "/");
    }

    if let (Ok(root_canon), Ok(path_canon)) = (root.canonicalize(), path.canonicalize()) {
        if let Ok(rel) = path_canon.strip_prefix(&root_canon) {
            return rel.to_string_lossy().replace('\\', "/");
        }
    }

    path.to_string_lossy().replace('\\', "/")
}
