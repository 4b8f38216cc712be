// src/engine/mod.rs

//! The driving loop: wait for a change, run the command, repeat.
//!
//! Change detection lives in [`crate::watch`] and process execution in
//! [`crate::exec`]; [`runtime::Runtime`] only sequences the two and decides
//! when to stop.

pub mod runtime;

pub use runtime::Runtime;

/// Why [`Runtime`] stopped without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The shutdown future resolved (Ctrl-C in production).
    Shutdown,
    /// The configured number of commands has been run.
    LimitReached,
}
