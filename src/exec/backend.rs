// src/exec/backend.rs

//! Pluggable command runner abstraction.
//!
//! The runtime talks to a `CommandRunner` instead of spawning processes
//! itself, so tests can swap in a fake that records commands and returns
//! canned results. The interpreter dependency (`sh` vs `cmd`) is confined to
//! [`shell_command`].

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::debug;

use super::{CommandResult, CommandStatus};

/// Runs one command string to completion and reports what happened.
///
/// Implementations never fail: spawn errors and non-zero exits are folded
/// into the returned [`CommandResult`].
pub trait CommandRunner: Send {
    fn run<'a>(
        &'a mut self,
        command: &'a str,
    ) -> Pin<Box<dyn Future<Output = CommandResult> + Send + 'a>>;
}

/// Production runner: executes through the platform shell.
#[derive(Debug, Clone, Default)]
pub struct ShellRunner {
    timeout: Option<Duration>,
}

impl ShellRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill the command if it runs longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl CommandRunner for ShellRunner {
    fn run<'a>(
        &'a mut self,
        command: &'a str,
    ) -> Pin<Box<dyn Future<Output = CommandResult> + Send + 'a>> {
        let timeout = self.timeout;
        Box::pin(async move { run_shell(command, timeout).await })
    }
}

/// Build a shell invocation whose stderr is merged into stdout, so both
/// streams arrive interleaved on one pipe.
pub fn shell_command(command: &str) -> Command {
    if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(format!("{command} 2>&1"));
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(format!("exec 2>&1\n{command}"));
        c
    }
}

async fn run_shell(command: &str, timeout: Option<Duration>) -> CommandResult {
    let mut cmd = shell_command(command);
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    // New process group so a timeout can take down everything the shell started.
    #[cfg(unix)]
    cmd.process_group(0);

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(err) => {
            return CommandResult::failed(Vec::new(), CommandStatus::SpawnFailed(err.to_string()));
        }
    };
    let pid = child.id();
    debug!(pid, "command process started");

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let mut output = Vec::new();
    let mut late_stderr = Vec::new();

    let finished = {
        let run = async {
            let (_, _, status) = tokio::join!(
                drain(stdout, &mut output),
                drain(stderr, &mut late_stderr),
                child.wait(),
            );
            status
        };

        match timeout {
            Some(limit) => tokio::time::timeout(limit, run).await.map_err(|_| limit),
            None => Ok(run.await),
        }
    };

    let status = match finished {
        Ok(Ok(status)) if status.success() => CommandStatus::Success,
        Ok(Ok(status)) => match status.code() {
            Some(code) => CommandStatus::Exited(code),
            None => CommandStatus::Signalled,
        },
        Ok(Err(err)) => CommandStatus::SpawnFailed(err.to_string()),
        Err(limit) => {
            kill_process_group(pid);
            if let Err(err) = child.kill().await {
                debug!(pid, error = %err, "failed to reap timed out command");
            }
            CommandStatus::TimedOut(limit)
        }
    };

    // Anything the shell wrote before the redirect took effect.
    output.extend_from_slice(&late_stderr);

    CommandResult { output, status }
}

/// Copy a pipe into `buf` chunk by chunk, so whatever arrived is kept even
/// if the surrounding future is dropped on timeout.
async fn drain<R: AsyncRead + Unpin>(reader: Option<R>, buf: &mut Vec<u8>) {
    let Some(mut reader) = reader else {
        return;
    };
    let mut chunk = [0u8; 4096];
    loop {
        match reader.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
}

#[cfg(unix)]
fn kill_process_group(pid: Option<u32>) {
    use nix::sys::signal::{Signal, killpg};
    use nix::unistd::Pid;

    let Some(pid) = pid.and_then(|p| i32::try_from(p).ok()) else {
        return;
    };
    if let Err(err) = killpg(Pid::from_raw(pid), Signal::SIGKILL) {
        debug!(pid, error = %err, "failed to kill command process group");
    }
}

#[cfg(not(unix))]
fn kill_process_group(_pid: Option<u32>) {}
