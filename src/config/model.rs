// src/config/model.rs

use serde::Deserialize;

use crate::types::ResolveMode;

/// Settings file as read from TOML.
///
/// ```toml
/// [watch]
/// symlink = "/var/www/current"
/// command = "service apache2 graceful"
/// sleep_ms = 1000
/// max_failures = 5
/// resolve = "absolute"
///
/// [command]
/// timeout_secs = 30
/// ```
///
/// Every key is optional; anything left out falls back to the CLI or the
/// built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub watch: WatchSection,

    #[serde(default)]
    pub command: CommandSection,
}

/// `[watch]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchSection {
    pub symlink: Option<String>,
    pub command: Option<String>,
    /// Poll interval in milliseconds.
    pub sleep_ms: Option<u64>,
    pub max_failures: Option<u32>,
    pub resolve: Option<ResolveMode>,
}

/// `[command]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandSection {
    pub timeout_secs: Option<u64>,
}

/// A settings file that passed validation. Only obtainable through
/// `TryFrom<RawConfigFile>`.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub watch: WatchSection,
    pub command: CommandSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(watch: WatchSection, command: CommandSection) -> Self {
        Self { watch, command }
    }
}
