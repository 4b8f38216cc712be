use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// How a symlink's stored target is turned into the value that is compared
/// between polls.
///
/// - `Absolute`: relative targets are joined onto the symlink's own directory
///   and normalised, so the tracked value is always an absolute path
///   (default behaviour).
/// - `Raw`: the target is compared exactly as stored in the link. Kept for
///   compatibility with setups that relied on the old behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResolveMode {
    #[default]
    Absolute,
    Raw,
}

impl FromStr for ResolveMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "absolute" => Ok(ResolveMode::Absolute),
            "raw" => Ok(ResolveMode::Raw),
            other => Err(format!(
                "invalid resolve mode: {other} (expected \"absolute\" or \"raw\")"
            )),
        }
    }
}

impl fmt::Display for ResolveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveMode::Absolute => f.write_str("absolute"),
            ResolveMode::Raw => f.write_str("raw"),
        }
    }
}
