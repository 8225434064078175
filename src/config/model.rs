// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

/// Optional configuration file, e.g. `noticer.toml`:
///
/// ```toml
/// directory = "src"
/// extensions = [".py", ".html"]
/// command = ["pytest", "-x"]
/// stdin_control = false
///
/// [timing]
/// poll_interval = "500ms"
/// grace_period = "5s"
/// kill_timeout = "2s"
/// ```
///
/// Every key is optional; command-line flags take precedence over the file,
/// and built-in defaults fill whatever neither provides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Directory to watch. Relative paths are resolved against the directory
    /// containing the config file.
    #[serde(default)]
    pub directory: Option<PathBuf>,

    /// Path suffixes that count as relevant changes.
    #[serde(default)]
    pub extensions: Option<Vec<String>>,

    /// Program and arguments to supervise.
    #[serde(default)]
    pub command: Option<Vec<String>>,

    /// Read `reload` / `stop` requests from stdin.
    #[serde(default)]
    pub stdin_control: Option<bool>,

    #[serde(default)]
    pub timing: TimingSection,
}

/// `[timing]` section. Durations use the `"250ms"`, `"5s"`, `"1m"` syntax.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimingSection {
    #[serde(default)]
    pub poll_interval: Option<String>,

    #[serde(default)]
    pub grace_period: Option<String>,

    #[serde(default)]
    pub kill_timeout: Option<String>,
}
