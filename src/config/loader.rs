// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::CliArgs;
use crate::config::model::ConfigFile;
use crate::config::validate::Settings;
use crate::errors::Result;

/// Load a configuration file from a given path.
///
/// This only performs TOML deserialization; merging with CLI flags and
/// validation happen in [`Settings::resolve`].
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: ConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load the config file named by `--config` (if any) and resolve settings.
///
/// This is the recommended entry point for the rest of the application.
pub fn load_settings(cli: &CliArgs) -> Result<Settings> {
    match &cli.config {
        Some(path) => {
            let file = load_from_path(path)?;
            let base = config_dir(path);
            Settings::resolve(cli, Some(&file), Some(&base))
        }
        None => Settings::resolve(cli, None, None),
    }
}

/// Directory against which relative paths in a config file are resolved.
///
/// - If the config path has a non-empty parent (e.g. "configs/noticer.toml"),
///   we use that directory.
/// - If it's just a bare filename like "noticer.toml" (parent = ""),
///   we fall back to the current working directory "."
fn config_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
