// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, SymwatchError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = SymwatchError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.watch, raw.command))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_watch_section(cfg)?;
    validate_command_section(cfg)?;
    Ok(())
}

fn validate_watch_section(cfg: &RawConfigFile) -> Result<()> {
    if let Some(symlink) = &cfg.watch.symlink {
        if symlink.trim().is_empty() {
            return Err(SymwatchError::ConfigError(
                "[watch].symlink must not be empty".to_string(),
            ));
        }
    }

    if let Some(command) = &cfg.watch.command {
        if command.trim().is_empty() {
            return Err(SymwatchError::ConfigError(
                "[watch].command must not be empty".to_string(),
            ));
        }
    }

    if cfg.watch.max_failures == Some(0) {
        return Err(SymwatchError::ConfigError(
            "[watch].max_failures must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(())
}

fn validate_command_section(cfg: &RawConfigFile) -> Result<()> {
    if cfg.command.timeout_secs == Some(0) {
        return Err(SymwatchError::ConfigError(
            "[command].timeout_secs must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}
