//! Subprocess execution with a hard wall-clock timeout.
//!
//! Probing tools are pointed at arbitrary user media, some of it on
//! flaky network shares, so every invocation gets a budget and is
//! killed on expiry. Arguments are always passed as a vector; nothing
//! here goes through a shell.

use std::io::{BufRead, BufReader};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{Error, Result};

/// How often the wait loop polls the child for completion.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Captured output of a finished subprocess.
#[derive(Debug)]
pub struct CommandOutput {
    /// Whether the process exited with status 0.
    pub success: bool,
    /// Captured standard output, lossily decoded.
    pub stdout: String,
    /// Captured standard error, lossily decoded.
    pub stderr: String,
}

/// Run `cmd` to completion, enforcing `timeout` as a hard wall-clock
/// bound. The child is killed when the budget expires.
///
/// A non-zero exit status is not an error here; callers inspect
/// [`CommandOutput::success`] and decide. `tool` only labels errors.
pub fn run_with_timeout(cmd: &mut Command, tool: &str, timeout: Duration) -> Result<CommandOutput> {
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::tool_not_found(tool)
            } else {
                Error::tool_failed(tool, e.to_string())
            }
        })?;

    // Drain both pipes on their own threads so a chatty child cannot
    // deadlock against a full pipe buffer while we poll for exit.
    let stdout = BufReader::new(child.stdout.take().expect("stdout piped"));
    let stderr = BufReader::new(child.stderr.take().expect("stderr piped"));

    let stdout_handle = thread::spawn(move || collect_lines(stdout));
    let stderr_handle = thread::spawn(move || collect_lines(stderr));

    let start = Instant::now();
    let mut status = None;

    while start.elapsed() < timeout {
        match child.try_wait() {
            Ok(Some(s)) => {
                status = Some(s);
                break;
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(e) => {
                let _ = child.kill();
                return Err(Error::tool_failed(tool, e.to_string()));
            }
        }
    }

    let status = match status {
        Some(s) => s,
        None => {
            let _ = child.kill();
            let _ = child.wait();
            return Err(Error::ToolTimeout {
                tool: tool.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            });
        }
    };

    let stdout = stdout_handle.join().unwrap_or_default();
    let stderr = stderr_handle.join().unwrap_or_default();

    Ok(CommandOutput {
        success: status.success(),
        stdout,
        stderr,
    })
}

fn collect_lines(reader: impl BufRead) -> String {
    let mut out = String::new();
    for line in reader.lines() {
        match line {
            Ok(line) => {
                out.push_str(&line);
                out.push('\n');
            }
            Err(_) => break,
        }
    }
    out
}

/// The first few lines of a diagnostic stream, for log messages.
pub(crate) fn head_of(text: &str, lines: usize) -> String {
    text.lines().take(lines).collect::<Vec<_>>().join(" | ")
}
