// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod link;
pub mod logging;
pub mod types;
pub mod watch;

use tracing::{info, warn};

use crate::cli::CliArgs;
use crate::config::Settings;
use crate::engine::{RunOutcome, Runtime};
use crate::errors::Result;
use crate::exec::ShellRunner;
use crate::link::TargetResolver;
use crate::watch::LinkWatcher;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - settings (CLI flags + optional settings file)
/// - the baseline resolution of the symlink
/// - the shell command runner
/// - the watch loop, stopped by Ctrl-C
pub async fn run(args: CliArgs) -> Result<RunOutcome> {
    let settings = Settings::from_args(&args)?;

    info!(
        mode = %settings.mode,
        interval_ms = settings.watch.interval.as_millis() as u64,
        max_failures = settings.watch.max_failures,
        "process start"
    );

    let resolver = TargetResolver::real(settings.mode);
    let watcher = LinkWatcher::start(settings.symlink.clone(), resolver, settings.watch)?;
    let runner = ShellRunner::new().with_timeout(settings.timeout);

    let mut runtime = Runtime::new(watcher, runner, settings.command);
    let outcome = runtime.run_until(shutdown_signal()).await?;

    info!(commands_run = runtime.commands_run(), "watch loop stopped");
    Ok(outcome)
}

/// Resolves on Ctrl-C. If the handler cannot be installed, never resolves.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}
