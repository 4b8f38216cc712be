// src/exec/mod.rs

//! Command execution layer.
//!
//! - [`backend`] provides the [`CommandRunner`] trait and the production
//!   [`ShellRunner`], which hands the command text to `sh -c` (or `cmd /C`)
//!   and captures stdout and stderr as one stream.
//! - [`output`] turns a [`CommandResult`] into log lines.
//!
//! A failed command is never escalated: the result is logged and the watch
//! loop carries on.

use std::fmt;
use std::time::Duration;

pub mod backend;
pub mod output;

pub use backend::{CommandRunner, ShellRunner};
pub use output::{log_command_result, output_lines};

/// How a single command invocation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    /// Exited with a non-zero code.
    Exited(i32),
    /// Terminated by a signal (no exit code available).
    Signalled,
    /// The shell could not be started.
    SpawnFailed(String),
    /// Killed after exceeding the configured timeout.
    TimedOut(Duration),
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandStatus::Success => f.write_str("success"),
            CommandStatus::Exited(code) => write!(f, "exit status {code}"),
            CommandStatus::Signalled => f.write_str("terminated by signal"),
            CommandStatus::SpawnFailed(msg) => write!(f, "failed to start: {msg}"),
            CommandStatus::TimedOut(after) => write!(f, "timed out after {after:?}"),
        }
    }
}

/// Combined output and outcome of one command run. Only used for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub output: Vec<u8>,
    pub status: CommandStatus,
}

impl CommandResult {
    pub fn success(output: impl Into<Vec<u8>>) -> Self {
        Self {
            output: output.into(),
            status: CommandStatus::Success,
        }
    }

    pub fn failed(output: impl Into<Vec<u8>>, status: CommandStatus) -> Self {
        Self {
            output: output.into(),
            status,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == CommandStatus::Success
    }

    /// Output decoded as UTF-8, with invalid sequences replaced.
    pub fn output_text(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}
