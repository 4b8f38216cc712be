// src/link/mod.rs

//! Symlink target resolution.
//!
//! - [`resolver`] reads a link through a [`crate::fs::FileSystem`] and turns
//!   the stored target into a [`ResolvedLink`] according to a
//!   [`crate::types::ResolveMode`].
//! - [`path_utils`] holds the lexical path normalisation used for relative
//!   targets.
//!
//! Resolution is side-effect free and holds no shared mutable state, so
//! several resolvers can run side by side on different paths.

use std::fmt;
use std::path::{Path, PathBuf};

pub mod path_utils;
pub mod resolver;

pub use resolver::{LinkResolver, TargetResolver};

/// The value a symlink currently points at, as tracked by the watcher.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedLink(PathBuf);

impl ResolvedLink {
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self(target.into())
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl fmt::Display for ResolvedLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl AsRef<Path> for ResolvedLink {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}
