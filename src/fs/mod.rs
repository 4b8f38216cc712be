// src/fs/mod.rs

use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub mod mock;

/// The slice of the filesystem the symlink resolver needs.
///
/// Kept narrow so tests can drive resolution (including read races) through
/// [`mock::MockFileSystem`] without touching the disk.
pub trait FileSystem: Send + Sync + Debug {
    /// Link-aware stat: whether `path` itself is a symlink. The link is not
    /// followed. Errors when the path does not exist or cannot be inspected.
    fn is_symlink(&self, path: &Path) -> Result<bool>;

    /// The target stored in the symlink at `path`, exactly as written.
    fn read_link(&self, path: &Path) -> Result<PathBuf>;

    /// Directory that relative paths are interpreted against.
    fn current_dir(&self) -> Result<PathBuf>;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn is_symlink(&self, path: &Path) -> Result<bool> {
        let meta = fs::symlink_metadata(path).with_context(|| format!("stat {:?}", path))?;
        Ok(meta.file_type().is_symlink())
    }

    fn read_link(&self, path: &Path) -> Result<PathBuf> {
        fs::read_link(path).with_context(|| format!("reading link {:?}", path))
    }

    fn current_dir(&self) -> Result<PathBuf> {
        std::env::current_dir().context("resolving current working directory")
    }
}
