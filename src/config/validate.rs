// src/config/validate.rs

//! Merge CLI flags with the optional config file and validate the result.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::CliArgs;
use crate::config::duration::parse_duration;
use crate::config::model::ConfigFile;
use crate::errors::{NoticerError, Result};
use crate::exec::Timing;
use crate::types::CommandSpec;
use crate::watch::ExtensionFilter;

/// Fully resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub directory: PathBuf,
    pub filter: ExtensionFilter,
    pub command: CommandSpec,
    pub timing: Timing,
    pub stdin_control: bool,
}

impl Settings {
    /// Resolve settings: CLI value, else config file value, else default.
    ///
    /// `config_dir` is the directory containing the config file; a relative
    /// `directory` from the file is resolved against it.
    pub fn resolve(
        cli: &CliArgs,
        file: Option<&ConfigFile>,
        config_dir: Option<&Path>,
    ) -> Result<Self> {
        let empty = ConfigFile::default();
        let file = file.unwrap_or(&empty);

        let directory = match (&cli.directory, &file.directory) {
            (Some(dir), _) => dir.clone(),
            (None, Some(dir)) => match config_dir {
                Some(base) if dir.is_relative() => base.join(dir),
                _ => dir.clone(),
            },
            (None, None) => PathBuf::from("."),
        };
        validate_directory(&directory)?;

        let extensions = cli
            .extensions
            .clone()
            .or_else(|| file.extensions.clone())
            .unwrap_or_default();
        let filter = ExtensionFilter::new(extensions);

        let argv = if !cli.command.is_empty() {
            cli.command.clone()
        } else {
            file.command.clone().unwrap_or_default()
        };
        if argv.is_empty() {
            return Err(NoticerError::ConfigError(
                "no command given; pass one on the command line or set `command` in the config file"
                    .to_string(),
            ));
        }
        let command = CommandSpec::new(argv).map_err(NoticerError::ConfigError)?;

        let defaults = Timing::default();
        let timing = Timing {
            poll_interval: resolve_duration(
                "poll_interval",
                cli.poll_interval.as_deref(),
                file.timing.poll_interval.as_deref(),
                defaults.poll_interval,
            )?,
            grace_period: resolve_duration(
                "grace_period",
                cli.grace_period.as_deref(),
                file.timing.grace_period.as_deref(),
                defaults.grace_period,
            )?,
            kill_timeout: resolve_duration(
                "kill_timeout",
                cli.kill_timeout.as_deref(),
                file.timing.kill_timeout.as_deref(),
                defaults.kill_timeout,
            )?,
        };

        let stdin_control = cli.stdin_control || file.stdin_control.unwrap_or(false);

        Ok(Self {
            directory,
            filter,
            command,
            timing,
            stdin_control,
        })
    }
}

fn resolve_duration(
    name: &str,
    cli: Option<&str>,
    file: Option<&str>,
    default: Duration,
) -> Result<Duration> {
    let Some(raw) = cli.or(file) else {
        return Ok(default);
    };

    let value = parse_duration(raw)
        .map_err(|e| NoticerError::ConfigError(format!("{name}: {e}")))?;

    if value.is_zero() {
        return Err(NoticerError::ConfigError(format!(
            "{name} must be greater than zero (got {raw:?})"
        )));
    }

    Ok(value)
}

fn validate_directory(dir: &Path) -> Result<()> {
    if !dir.exists() {
        return Err(NoticerError::ConfigError(format!(
            "watch directory {} does not exist",
            dir.display()
        )));
    }
    if !dir.is_dir() {
        return Err(NoticerError::ConfigError(format!(
            "watch path {} is not a directory",
            dir.display()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::TimingSection;

    fn cli_with_command(cmd: &[&str]) -> CliArgs {
        CliArgs {
            command: cmd.iter().map(|s| s.to_string()).collect(),
            ..CliArgs::default()
        }
    }

    #[test]
    fn defaults_apply_when_nothing_is_configured() {
        let settings = Settings::resolve(&cli_with_command(&["true"]), None, None).unwrap();

        assert_eq!(settings.directory, PathBuf::from("."));
        assert!(settings.filter.matches_everything());
        assert_eq!(settings.timing, Timing::default());
        assert!(!settings.stdin_control);
        assert_eq!(settings.command.argv(), ["true".to_string()]);
    }

    #[test]
    fn cli_overrides_file_and_file_overrides_defaults() {
        let file = ConfigFile {
            extensions: Some(vec![".rs".to_string()]),
            command: Some(vec!["cargo".to_string(), "test".to_string()]),
            timing: TimingSection {
                poll_interval: Some("100ms".to_string()),
                grace_period: Some("1s".to_string()),
                kill_timeout: None,
            },
            ..ConfigFile::default()
        };
        let cli = CliArgs {
            grace_period: Some("3s".to_string()),
            ..CliArgs::default()
        };

        let settings = Settings::resolve(&cli, Some(&file), None).unwrap();

        assert_eq!(settings.command.to_string(), "cargo test");
        assert_eq!(settings.filter.suffixes(), [".rs".to_string()]);
        assert_eq!(settings.timing.poll_interval, Duration::from_millis(100));
        assert_eq!(settings.timing.grace_period, Duration::from_secs(3));
        assert_eq!(settings.timing.kill_timeout, Timing::default().kill_timeout);
    }

    #[test]
    fn relative_file_directory_is_resolved_against_config_dir() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("src")).unwrap();
        let file = ConfigFile {
            directory: Some(PathBuf::from("src")),
            ..ConfigFile::default()
        };

        let settings =
            Settings::resolve(&cli_with_command(&["true"]), Some(&file), Some(tmp.path()))
                .unwrap();

        assert_eq!(settings.directory, tmp.path().join("src"));
    }

    #[test]
    fn missing_command_is_rejected() {
        let err = Settings::resolve(&CliArgs::default(), None, None).unwrap_err();
        assert!(matches!(err, NoticerError::ConfigError(msg) if msg.contains("no command")));
    }

    #[test]
    fn zero_and_malformed_durations_are_rejected() {
        let cli = CliArgs {
            poll_interval: Some("0ms".to_string()),
            ..cli_with_command(&["true"])
        };
        let err = Settings::resolve(&cli, None, None).unwrap_err();
        assert!(matches!(err, NoticerError::ConfigError(msg) if msg.contains("poll_interval")));

        let cli = CliArgs {
            kill_timeout: Some("soon".to_string()),
            ..cli_with_command(&["true"])
        };
        assert!(Settings::resolve(&cli, None, None).is_err());
    }

    #[test]
    fn missing_directory_is_rejected() {
        let cli = CliArgs {
            directory: Some(PathBuf::from("/no/such/noticer/dir")),
            ..cli_with_command(&["true"])
        };
        let err = Settings::resolve(&cli, None, None).unwrap_err();
        assert!(matches!(err, NoticerError::ConfigError(msg) if msg.contains("does not exist")));
    }
}
