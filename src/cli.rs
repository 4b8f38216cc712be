// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! The symlink and command are optional at the clap level so that a missing
//! one maps onto its own exit status (see [`crate::errors`]) instead of
//! clap's generic usage error. They can also come from the settings file.

use clap::{CommandFactory, Parser, ValueEnum};

use crate::errors::EXIT_OTHER;

/// Command-line arguments for `symwatch`.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "symwatch",
    version,
    about = "Run a shell command whenever a symlink's target changes.",
    long_about = None,
    after_help = "Example:\n  symwatch /var/www/current 'service apache2 graceful' --sleep 1000"
)]
pub struct CliArgs {
    /// Path of the symlink to watch.
    #[arg(value_name = "SYMLINK")]
    pub symlink: Option<String>,

    /// Shell command to run each time the target changes.
    #[arg(value_name = "COMMAND")]
    pub command: Option<String>,

    /// Time in milliseconds to sleep between checks of the symlink target
    /// (default 500). Non-positive or unparsable values fall back to the
    /// default.
    #[arg(long, value_name = "MILLIS", allow_hyphen_values = true)]
    pub sleep: Option<String>,

    /// Consecutive failed reads after which the symlink counts as gone
    /// (default 5).
    #[arg(long, value_name = "N")]
    pub max_failures: Option<u32>,

    /// Kill the command if it runs longer than this many seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Compare the raw stored link target instead of the absolute path it
    /// refers to.
    #[arg(long)]
    pub raw: bool,

    /// Optional settings file (TOML). Command-line flags take precedence.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SYMWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
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

impl LogLevel {
    /// Filter directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Parse the process arguments.
///
/// `--help` and `--version` exit the way clap does. Any other parse error is
/// printed and exits with [`EXIT_OTHER`], so clap's own status 2 never
/// collides with the missing-command status.
pub fn parse() -> CliArgs {
    match CliArgs::try_parse() {
        Ok(args) => args,
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            let _ = err.print();
            std::process::exit(EXIT_OTHER);
        }
    }
}

/// Rendered help text, printed alongside missing-argument errors.
pub fn usage() -> String {
    CliArgs::command().render_help().to_string()
}
