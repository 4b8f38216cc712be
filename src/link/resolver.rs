// src/link/resolver.rs

use std::path::{Path, PathBuf};

use tracing::trace;

use crate::errors::ResolveError;
use crate::fs::{FileSystem, RealFileSystem};
use crate::link::ResolvedLink;
use crate::link::path_utils::{absolutize, normalize};
use crate::types::ResolveMode;

/// Anything that can report the current target of a symlink.
///
/// The watcher is generic over this so tests can script arbitrary sequences
/// of targets and failures.
pub trait LinkResolver: Send + Sync {
    fn resolve(&self, path: &Path) -> Result<ResolvedLink, ResolveError>;
}

/// Resolver backed by a [`FileSystem`].
#[derive(Debug, Clone)]
pub struct TargetResolver<F: FileSystem = RealFileSystem> {
    fs: F,
    mode: ResolveMode,
}

impl TargetResolver<RealFileSystem> {
    /// Resolver over the real filesystem.
    pub fn real(mode: ResolveMode) -> Self {
        Self::new(RealFileSystem, mode)
    }
}

impl<F: FileSystem> TargetResolver<F> {
    pub fn new(fs: F, mode: ResolveMode) -> Self {
        Self { fs, mode }
    }

    pub fn mode(&self) -> ResolveMode {
        self.mode
    }

    /// Join a relative target onto the symlink's own (absolute) directory.
    fn to_absolute(&self, link: &Path, target: PathBuf) -> Result<PathBuf, ResolveError> {
        if target.is_absolute() {
            return Ok(target);
        }

        let cwd = self.fs.current_dir().map_err(|e| ResolveError::ReadError {
            path: link.to_path_buf(),
            message: format!("failed to resolve absolute path of the link: {e:#}"),
        })?;

        let abs_link = absolutize(&cwd, link);
        let link_dir = abs_link.parent().ok_or_else(|| ResolveError::ReadError {
            path: link.to_path_buf(),
            message: format!(
                "failed to resolve target [{}] relative to [{}]",
                target.display(),
                abs_link.display()
            ),
        })?;

        Ok(normalize(&link_dir.join(&target)))
    }
}

impl<F: FileSystem> LinkResolver for TargetResolver<F> {
    fn resolve(&self, path: &Path) -> Result<ResolvedLink, ResolveError> {
        match self.fs.is_symlink(path) {
            Ok(true) => {}
            Ok(false) => {
                return Err(ResolveError::NotASymlink {
                    path: path.to_path_buf(),
                });
            }
            Err(err) => {
                trace!(path = %path.display(), error = %err, "link-aware stat failed");
                return Err(ResolveError::NotASymlink {
                    path: path.to_path_buf(),
                });
            }
        }

        let raw = self.fs.read_link(path).map_err(|e| ResolveError::ReadError {
            path: path.to_path_buf(),
            message: format!("{e:#}"),
        })?;

        let target = match self.mode {
            ResolveMode::Raw => raw,
            ResolveMode::Absolute => self.to_absolute(path, raw)?,
        };

        Ok(ResolvedLink::new(target))
    }
}
