// src/fs/mock.rs

use super::FileSystem;
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockEntry {
    File,
    Dir,
    Symlink(PathBuf),
}

#[derive(Debug, Default)]
struct MockState {
    entries: HashMap<PathBuf, MockEntry>,
    cwd: PathBuf,
    failing_reads: usize,
    read_link_calls: usize,
}

/// In-memory filesystem holding files, directories and symlinks.
///
/// Clones share state, so a test can keep one handle to repoint links while
/// the resolver under test holds another. Relative paths are looked up
/// against the configured current directory (`/` by default).
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    state: Arc<Mutex<MockState>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        let fs = Self::default();
        fs.lock().cwd = PathBuf::from("/");
        fs
    }

    pub fn with_current_dir(self, cwd: impl Into<PathBuf>) -> Self {
        self.lock().cwd = cwd.into();
        self
    }

    pub fn add_file(&self, path: impl AsRef<Path>) {
        self.insert(path.as_ref(), MockEntry::File);
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        self.insert(path.as_ref(), MockEntry::Dir);
    }

    /// Create or atomically repoint a symlink.
    pub fn set_symlink(&self, path: impl AsRef<Path>, target: impl Into<PathBuf>) {
        self.insert(path.as_ref(), MockEntry::Symlink(target.into()));
    }

    pub fn remove(&self, path: impl AsRef<Path>) {
        let mut state = self.lock();
        let key = key_for(&state.cwd, path.as_ref());
        state.entries.remove(&key);
    }

    /// Make the next `n` `read_link` calls fail even though the link exists,
    /// as if it vanished between the stat and the read.
    pub fn fail_next_reads(&self, n: usize) {
        self.lock().failing_reads = n;
    }

    /// Number of `read_link` calls seen so far.
    pub fn read_link_calls(&self) -> usize {
        self.lock().read_link_calls
    }

    fn insert(&self, path: &Path, entry: MockEntry) {
        let mut state = self.lock();
        let key = key_for(&state.cwd, path);
        state.entries.insert(key, entry);
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn key_for(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

impl FileSystem for MockFileSystem {
    fn is_symlink(&self, path: &Path) -> Result<bool> {
        let state = self.lock();
        match state.entries.get(&key_for(&state.cwd, path)) {
            Some(MockEntry::Symlink(_)) => Ok(true),
            Some(_) => Ok(false),
            None => Err(anyhow!("No such file or directory: {:?}", path)),
        }
    }

    fn read_link(&self, path: &Path) -> Result<PathBuf> {
        let mut state = self.lock();
        state.read_link_calls += 1;
        if state.failing_reads > 0 {
            state.failing_reads -= 1;
            return Err(anyhow!("link vanished while reading: {:?}", path));
        }
        match state.entries.get(&key_for(&state.cwd, path)) {
            Some(MockEntry::Symlink(target)) => Ok(target.clone()),
            Some(_) => Err(anyhow!("Invalid argument (not a link): {:?}", path)),
            None => Err(anyhow!("No such file or directory: {:?}", path)),
        }
    }

    fn current_dir(&self) -> Result<PathBuf> {
        Ok(self.lock().cwd.clone())
    }
}
