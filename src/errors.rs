// src/errors.rs

//! Crate-wide error types and the process exit codes derived from them.

use std::path::PathBuf;

use thiserror::Error;

/// Why a single attempt to read the watched symlink failed.
///
/// Both variants are transient while polling (they count towards the failure
/// threshold) and fatal only on the startup resolution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The path does not exist, is inaccessible, or is not a symlink.
    #[error("[{}] is not a symlink", path.display())]
    NotASymlink { path: PathBuf },

    /// The link exists but its target could not be read or normalised.
    #[error("failed to read target of [{}]: {message}", path.display())]
    ReadError { path: PathBuf, message: String },
}

impl ResolveError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            ResolveError::NotASymlink { path } | ResolveError::ReadError { path, .. } => path,
        }
    }
}

#[derive(Error, Debug)]
pub enum SymwatchError {
    #[error("No symlink path specified.")]
    MissingSymlink,

    #[error("No command specified.")]
    MissingCommand,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The mandatory first resolution failed; the poll loop never starts.
    #[error("invalid symlink: {0}")]
    InvalidSymlink(#[source] ResolveError),

    /// Resolution failed `attempts` times in a row while polling.
    #[error(
        "symlink [{}] unavailable after {attempts} consecutive failed reads (last error: {last_error})",
        path.display()
    )]
    LinkUnavailable {
        path: PathBuf,
        attempts: u32,
        last_error: ResolveError,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub const EXIT_MISSING_SYMLINK: i32 = 1;
pub const EXIT_MISSING_COMMAND: i32 = 2;
pub const EXIT_INVALID_SYMLINK: i32 = 3;
pub const EXIT_LINK_UNAVAILABLE: i32 = 4;
pub const EXIT_OTHER: i32 = 5;

impl SymwatchError {
    /// Process exit status the binary uses for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            SymwatchError::MissingSymlink => EXIT_MISSING_SYMLINK,
            SymwatchError::MissingCommand => EXIT_MISSING_COMMAND,
            SymwatchError::InvalidSymlink(_) => EXIT_INVALID_SYMLINK,
            SymwatchError::LinkUnavailable { .. } => EXIT_LINK_UNAVAILABLE,
            SymwatchError::ConfigError(_)
            | SymwatchError::IoError(_)
            | SymwatchError::TomlError(_)
            | SymwatchError::Other(_) => EXIT_OTHER,
        }
    }

    /// Whether the usage text should accompany this error on stderr.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            SymwatchError::MissingSymlink | SymwatchError::MissingCommand
        )
    }
}

pub type Result<T> = std::result::Result<T, SymwatchError>;
