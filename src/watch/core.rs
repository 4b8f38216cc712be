// src/watch/core.rs

//! Pure change-detection state machine.
//!
//! `WatchCore` has no clock, no filesystem and no Tokio types. The caller
//! resolves the link, hands the result to [`WatchCore::observe`] and acts on
//! the returned [`Tick`]. This keeps the failure-counting rules testable
//! without sleeping or creating real symlinks.

use crate::errors::ResolveError;
use crate::link::ResolvedLink;

/// Consecutive failed reads after which the link counts as gone for good.
pub const DEFAULT_MAX_FAILURES: u32 = 5;

/// Outcome of feeding one resolution result into the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    /// Same target as before; failure count reset.
    Unchanged,
    /// New target; it is now the tracked value and the failure count is reset.
    Changed { from: ResolvedLink, to: ResolvedLink },
    /// Read failed but the threshold has not been reached yet.
    Failed { attempt: u32, error: ResolveError },
    /// Read failed for the `attempts`-th time in a row, reaching the threshold.
    Fatal { attempts: u32, error: ResolveError },
}

#[derive(Debug, Clone)]
pub struct WatchCore {
    current: ResolvedLink,
    failures: u32,
    max_failures: u32,
}

impl WatchCore {
    /// Seed the core with the baseline target. A threshold of zero is treated
    /// as one, so the first failure is fatal.
    pub fn new(baseline: ResolvedLink, max_failures: u32) -> Self {
        Self {
            current: baseline,
            failures: 0,
            max_failures: max_failures.max(1),
        }
    }

    pub fn current(&self) -> &ResolvedLink {
        &self.current
    }

    /// Consecutive failures seen since the last successful read.
    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn max_failures(&self) -> u32 {
        self.max_failures
    }

    pub fn observe(&mut self, result: Result<ResolvedLink, ResolveError>) -> Tick {
        match result {
            Err(error) => {
                self.failures = self.failures.saturating_add(1);
                if self.failures >= self.max_failures {
                    Tick::Fatal {
                        attempts: self.failures,
                        error,
                    }
                } else {
                    Tick::Failed {
                        attempt: self.failures,
                        error,
                    }
                }
            }
            Ok(target) if target == self.current => {
                self.failures = 0;
                Tick::Unchanged
            }
            Ok(target) => {
                self.failures = 0;
                let from = std::mem::replace(&mut self.current, target.clone());
                Tick::Changed { from, to: target }
            }
        }
    }
}
