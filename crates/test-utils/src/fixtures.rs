#![cfg(unix)]

use std::fs;
use std::os::unix::fs::symlink;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory holding one symlink named `current`.
///
/// The link is not created until [`SymlinkFixture::point_to`] is called.
pub struct SymlinkFixture {
    dir: TempDir,
    link: PathBuf,
}

impl SymlinkFixture {
    pub fn new() -> Self {
        let dir = tempfile::Builder::new()
            .prefix("symwatch-")
            .tempdir()
            .expect("failed to create tempdir");
        let link = dir.path().join("current");
        Self { dir, link }
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn link(&self) -> &Path {
        &self.link
    }

    /// Create a directory inside the fixture and return its path.
    pub fn make_dir(&self, name: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::create_dir_all(&path).expect("failed to create dir");
        path
    }

    /// Point the link at `target`, replacing it atomically via rename.
    pub fn point_to(&self, target: impl AsRef<Path>) {
        let staging = self.dir.path().join(".current.tmp");
        let _ = fs::remove_file(&staging);
        symlink(target.as_ref(), &staging).expect("failed to create symlink");
        fs::rename(&staging, &self.link).expect("failed to swap symlink");
    }

    pub fn remove_link(&self) {
        fs::remove_file(&self.link).expect("failed to remove symlink");
    }
}

impl Default for SymlinkFixture {
    fn default() -> Self {
        Self::new()
    }
}
