// src/engine/runtime.rs

use std::fmt;
use std::future::Future;

use tracing::{debug, info};

use crate::errors::Result;
use crate::exec::{CommandRunner, log_command_result};
use crate::link::LinkResolver;
use crate::watch::{Change, LinkWatcher};

use super::RunOutcome;

/// Sequences the watcher and the command runner.
///
/// The command blocks polling for its whole duration, so changes that happen
/// while it runs collapse into whatever the target is once it finishes.
pub struct Runtime<R: LinkResolver, C: CommandRunner> {
    watcher: LinkWatcher<R>,
    runner: C,
    command: String,
    commands_run: usize,
}

impl<R: LinkResolver, C: CommandRunner> fmt::Debug for Runtime<R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("watcher", &self.watcher)
            .field("command", &self.command)
            .field("commands_run", &self.commands_run)
            .finish_non_exhaustive()
    }
}

impl<R: LinkResolver, C: CommandRunner> Runtime<R, C> {
    pub fn new(watcher: LinkWatcher<R>, runner: C, command: impl Into<String>) -> Self {
        Self {
            watcher,
            runner,
            command: command.into(),
            commands_run: 0,
        }
    }

    pub fn watcher(&self) -> &LinkWatcher<R> {
        &self.watcher
    }

    pub fn commands_run(&self) -> usize {
        self.commands_run
    }

    /// Watch forever. Only returns on a fatal watcher error.
    pub async fn run(&mut self) -> Result<RunOutcome> {
        self.drive(std::future::pending(), None).await
    }

    /// Watch until `shutdown` resolves.
    ///
    /// Shutdown is only observed while polling; a command that is already
    /// running is always allowed to finish.
    pub async fn run_until<S>(&mut self, shutdown: S) -> Result<RunOutcome>
    where
        S: Future<Output = ()>,
    {
        self.drive(shutdown, None).await
    }

    /// Watch until `limit` commands have been run.
    pub async fn run_with_limit(&mut self, limit: usize) -> Result<RunOutcome> {
        self.drive(std::future::pending(), Some(limit)).await
    }

    async fn drive<S>(&mut self, shutdown: S, limit: Option<usize>) -> Result<RunOutcome>
    where
        S: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            if limit.is_some_and(|max| self.commands_run >= max) {
                debug!(commands_run = self.commands_run, "command limit reached");
                return Ok(RunOutcome::LimitReached);
            }

            let change = tokio::select! {
                _ = &mut shutdown => {
                    info!("shutdown requested; stopping watch loop");
                    return Ok(RunOutcome::Shutdown);
                }
                change = self.watcher.wait_for_change() => change?,
            };

            self.handle_change(change).await;
        }
    }

    async fn handle_change(&mut self, change: Change) {
        debug!(from = %change.from, to = %change.to, "handling target change");
        info!(cmd = %self.command, "running command: {}", self.command);

        let result = self.runner.run(&self.command).await;
        self.commands_run += 1;

        log_command_result(&self.command, &result);
    }
}
