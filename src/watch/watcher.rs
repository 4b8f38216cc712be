// src/watch/watcher.rs

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{error, info, trace, warn};

use crate::errors::{Result, SymwatchError};
use crate::link::{LinkResolver, ResolvedLink};
use crate::watch::core::{DEFAULT_MAX_FAILURES, Tick, WatchCore};

/// Poll interval used when none (or an unusable one) is configured.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Timing and tolerance knobs for a [`LinkWatcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchOptions {
    /// Wait between two resolution attempts. Zero busy-polls.
    pub interval: Duration,
    /// Consecutive failed reads that make the link count as unavailable.
    pub max_failures: u32,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_failures: DEFAULT_MAX_FAILURES,
        }
    }
}

/// A detected target change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub from: ResolvedLink,
    pub to: ResolvedLink,
}

/// Polls one symlink until its target changes.
///
/// The watched path never changes after [`LinkWatcher::start`]. Each call to
/// [`LinkWatcher::wait_for_change`] continues from the target returned by the
/// previous call, so every change is reported once.
pub struct LinkWatcher<R: LinkResolver> {
    path: PathBuf,
    resolver: R,
    options: WatchOptions,
    core: WatchCore,
}

impl<R: LinkResolver> std::fmt::Debug for LinkWatcher<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkWatcher")
            .field("path", &self.path)
            .field("options", &self.options)
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl<R: LinkResolver> LinkWatcher<R> {
    /// Resolve the baseline target and build the watcher.
    ///
    /// A failure here is fatal for the caller and never enters the failure
    /// counting used while polling.
    pub fn start(path: impl Into<PathBuf>, resolver: R, options: WatchOptions) -> Result<Self> {
        let path = path.into();

        let baseline = match resolver.resolve(&path) {
            Ok(target) => target,
            Err(err) => {
                error!(path = %path.display(), error = %err, "cannot read initial symlink target");
                return Err(SymwatchError::InvalidSymlink(err));
            }
        };

        info!(
            path = %path.display(),
            target = %baseline,
            "watching [{}]; initial target is [{}]",
            path.display(),
            baseline
        );

        Ok(Self {
            core: WatchCore::new(baseline, options.max_failures),
            path,
            resolver,
            options,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The target as of the last successful read that differed from its
    /// predecessor (or the baseline).
    pub fn current(&self) -> &ResolvedLink {
        self.core.current()
    }

    pub fn options(&self) -> WatchOptions {
        self.options
    }

    /// Poll until the target differs from the tracked one.
    ///
    /// Returns `SymwatchError::LinkUnavailable` once `max_failures`
    /// consecutive reads have failed.
    pub async fn wait_for_change(&mut self) -> Result<Change> {
        loop {
            let result = self.resolver.resolve(&self.path);

            match self.core.observe(result) {
                Tick::Unchanged => {
                    trace!(path = %self.path.display(), "symlink target unchanged");
                }
                Tick::Changed { from, to } => {
                    info!(
                        path = %self.path.display(),
                        from = %from,
                        to = %to,
                        "target of [{}] changed from [{}] to [{}]",
                        self.path.display(),
                        from,
                        to
                    );
                    return Ok(Change { from, to });
                }
                Tick::Failed { attempt, error } => {
                    warn!(
                        path = %self.path.display(),
                        attempt,
                        max_failures = self.core.max_failures(),
                        error = %error,
                        "failed to read symlink target; will retry"
                    );
                }
                Tick::Fatal { attempts, error } => {
                    error!(
                        path = %self.path.display(),
                        attempts,
                        error = %error,
                        "symlink unavailable after repeated failures; giving up"
                    );
                    return Err(SymwatchError::LinkUnavailable {
                        path: self.path.clone(),
                        attempts,
                        last_error: error,
                    });
                }
            }

            pause(self.options.interval).await;
        }
    }
}

/// Sleep for one poll interval. A zero interval still yields to the
/// scheduler so other tasks on the same runtime make progress.
async fn pause(interval: Duration) {
    if interval.is_zero() {
        tokio::task::yield_now().await;
    } else {
        tokio::time::sleep(interval).await;
    }
}
