// src/exec/output.rs

use tracing::{info, warn};

use super::CommandResult;

/// Split captured output into the lines that get logged.
///
/// Surrounding whitespace is trimmed first. Empty output yields no lines at
/// all rather than a single blank one.
pub fn output_lines(output: &str) -> Vec<&str> {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Log the outcome and every output line of a finished command.
pub fn log_command_result(command: &str, result: &CommandResult) {
    if !result.is_success() {
        warn!(
            cmd = %command,
            status = %result.status,
            "error running command `{}`: {}",
            command,
            result.status
        );
    }

    let text = result.output_text();
    for line in output_lines(&text) {
        info!("[CMD] {}", line);
    }
    info!("end of command output");
}
