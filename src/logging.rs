// src/logging.rs

//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! Filter priority:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `SYMWATCH_LOG` environment variable (any `EnvFilter` directive,
//!    e.g. "debug" or "symwatch=trace")
//! 3. default to `info`
//!
//! Logs go to STDERR.

use anyhow::anyhow;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;
use crate::errors::Result;

/// Environment variable consulted when no `--log-level` is given.
pub const LOG_ENV: &str = "SYMWATCH_LOG";

/// Initialise the global logging subscriber. Call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    fmt()
        .with_env_filter(build_filter(cli_level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to initialise logging: {e}"))?;

    Ok(())
}

fn build_filter(cli_level: Option<LogLevel>) -> EnvFilter {
    match cli_level {
        Some(lvl) => EnvFilter::new(lvl.as_directive()),
        None => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info")),
    }
}
