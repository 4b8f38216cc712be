// src/config/mod.rs

//! Settings: optional TOML file plus command-line flags.
//!
//! - [`model`] is the file format.
//! - [`loader`] reads and validates a file.
//! - [`validate`] holds the semantic checks.
//! - [`settings`] merges file values with CLI flags into the [`Settings`]
//!   the rest of the program runs on.

pub mod loader;
pub mod model;
pub mod settings;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{CommandSection, ConfigFile, RawConfigFile, WatchSection};
pub use settings::{Settings, parse_sleep_millis};
