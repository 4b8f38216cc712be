// src/watch/mod.rs

//! Polling change detection for a single symlink.
//!
//! - [`core`] is the synchronous state machine: it is fed one resolution
//!   result per tick and decides whether the link changed, failed
//!   transiently, or crossed the consecutive-failure threshold.
//! - [`watcher`] is the async shell around it that owns the resolver, calls
//!   it once per tick and sleeps the poll interval in between.
//!
//! There is no filesystem event notification here; detection is purely by
//! polling.

pub mod core;
pub mod watcher;

pub use self::core::{DEFAULT_MAX_FAILURES, Tick, WatchCore};
pub use watcher::{Change, DEFAULT_POLL_INTERVAL, LinkWatcher, WatchOptions};
