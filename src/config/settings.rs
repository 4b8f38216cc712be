// src/config/settings.rs

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::ConfigFile;
use crate::errors::{Result, SymwatchError};
use crate::types::ResolveMode;
use crate::watch::{DEFAULT_MAX_FAILURES, DEFAULT_POLL_INTERVAL, WatchOptions};

/// Fully merged runtime settings. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub symlink: PathBuf,
    pub command: String,
    pub watch: WatchOptions,
    pub mode: ResolveMode,
    pub timeout: Option<Duration>,
}

impl Settings {
    /// Load the settings file named by `--config` (if any) and merge it with
    /// the flags.
    pub fn from_args(args: &CliArgs) -> Result<Self> {
        let file = match &args.config {
            Some(path) => load_and_validate(path)?,
            None => ConfigFile::default(),
        };
        Self::merge(args, &file)
    }

    /// Merge CLI flags over file values over built-in defaults.
    pub fn merge(args: &CliArgs, file: &ConfigFile) -> Result<Self> {
        let symlink = first_non_empty(args.symlink.as_deref(), file.watch.symlink.as_deref())
            .ok_or(SymwatchError::MissingSymlink)?;
        let command = first_non_empty(args.command.as_deref(), file.watch.command.as_deref())
            .ok_or(SymwatchError::MissingCommand)?;

        let interval = match (&args.sleep, file.watch.sleep_ms) {
            (Some(raw), _) => parse_sleep_millis(raw).unwrap_or_else(|| {
                warn!(
                    value = %raw,
                    default_ms = DEFAULT_POLL_INTERVAL.as_millis() as u64,
                    "invalid --sleep value; using default"
                );
                DEFAULT_POLL_INTERVAL
            }),
            (None, Some(0)) => {
                warn!(
                    default_ms = DEFAULT_POLL_INTERVAL.as_millis() as u64,
                    "[watch].sleep_ms is 0; using default"
                );
                DEFAULT_POLL_INTERVAL
            }
            (None, Some(ms)) => Duration::from_millis(ms),
            (None, None) => DEFAULT_POLL_INTERVAL,
        };

        let max_failures = args
            .max_failures
            .or(file.watch.max_failures)
            .unwrap_or(DEFAULT_MAX_FAILURES);
        if max_failures == 0 {
            return Err(SymwatchError::ConfigError(
                "--max-failures must be >= 1 (got 0)".to_string(),
            ));
        }

        if args.timeout == Some(0) {
            return Err(SymwatchError::ConfigError(
                "--timeout must be >= 1 (got 0)".to_string(),
            ));
        }
        let timeout = args
            .timeout
            .or(file.command.timeout_secs)
            .map(Duration::from_secs);

        let mode = if args.raw {
            ResolveMode::Raw
        } else {
            file.watch.resolve.unwrap_or_default()
        };

        Ok(Self {
            symlink: PathBuf::from(symlink),
            command: command.to_string(),
            watch: WatchOptions {
                interval,
                max_failures,
            },
            mode,
            timeout,
        })
    }
}

/// Parse a `--sleep` value in milliseconds. Returns `None` for anything that
/// is not a positive integer.
pub fn parse_sleep_millis(raw: &str) -> Option<Duration> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(|ms| u64::try_from(ms).ok())
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
}

fn first_non_empty<'a>(cli: Option<&'a str>, file: Option<&'a str>) -> Option<&'a str> {
    cli.filter(|s| !s.is_empty())
        .or_else(|| file.filter(|s| !s.is_empty()))
}
