// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `noticer`.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "noticer",
    version,
    about = "Restart a command whenever files in a directory change.",
    long_about = None
)]
pub struct CliArgs {
    /// Directory to monitor, recursively.
    ///
    /// Default: the current working directory.
    #[arg(short = 'd', long, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Path suffixes to monitor (e.g. `-e .py .html`).
    ///
    /// Without any suffix every created or modified file triggers a restart.
    /// Put `--` before the command when it directly follows this list.
    #[arg(short = 'e', long = "extension", value_name = "EXT", num_args = 0..)]
    pub extensions: Option<Vec<String>>,

    /// Optional TOML config file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// How often the running command is checked (e.g. `500ms`).
    #[arg(long, value_name = "DURATION")]
    pub poll_interval: Option<String>,

    /// How long an interrupted command may take to exit before it is killed.
    #[arg(long, value_name = "DURATION")]
    pub grace_period: Option<String>,

    /// How long to wait for a killed command to be reaped.
    #[arg(long, value_name = "DURATION")]
    pub kill_timeout: Option<String>,

    /// Read `reload` / `stop` requests from stdin (the command gets no stdin).
    #[arg(long)]
    pub stdin_control: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `NOTICER_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print the resolved settings, but don't watch or run anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Command to run, followed by its arguments.
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_from(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(args).unwrap()
    }

    #[test]
    fn command_and_its_flags_are_kept_verbatim() {
        let args = parse_from(&["noticer", "-d", "src", "pytest", "-x", "--lf"]);
        assert_eq!(args.directory, Some(PathBuf::from("src")));
        assert_eq!(args.extensions, None);
        assert_eq!(args.command, ["pytest", "-x", "--lf"]);
    }

    #[test]
    fn extensions_stop_at_double_dash() {
        let args = parse_from(&["noticer", "-e", ".py", ".html", "--", "make", "test"]);
        assert_eq!(
            args.extensions,
            Some(vec![".py".to_string(), ".html".to_string()])
        );
        assert_eq!(args.command, ["make", "test"]);
    }

    #[test]
    fn bare_extension_flag_means_empty_list() {
        let args = parse_from(&["noticer", "-d", ".", "-e", "--", "true"]);
        assert_eq!(args.extensions, Some(Vec::new()));
    }

    #[test]
    fn ambient_flags() {
        let args = parse_from(&[
            "noticer",
            "--log-level",
            "debug",
            "--grace-period",
            "1s",
            "--stdin-control",
            "--dry-run",
            "echo",
        ]);
        assert_eq!(args.log_level, Some(LogLevel::Debug));
        assert_eq!(args.grace_period.as_deref(), Some("1s"));
        assert!(args.stdin_control);
        assert!(args.dry_run);
        assert_eq!(args.command, ["echo"]);
    }
}
