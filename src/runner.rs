//! Process execution
//!
//! Spawns a prepared [`CommandSpec`], collects stdout and stderr separately,
//! and classifies the outcome. A command that exits non-zero is a normal
//! result here, not an error: callers decide how to present it.

use std::io::ErrorKind;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::command::CommandSpec;

/// Outcome of running one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionResult {
    /// Exit code 0
    Success { stdout: String, stderr: String },

    /// Non-zero exit (or killed by a signal, reported as -1)
    CommandFailed {
        exit_code: i32,
        stderr: String,
        stdout: String,
    },

    /// The executable could not be found
    ExecutableNotFound(String),

    /// Spawning failed for another reason (permissions, bad working directory, ...)
    SpawnFailed { program: String, message: String },

    /// The deadline passed; the child was killed
    TimedOut(u64),

    /// The request was cancelled; the child was killed
    Cancelled,
}

impl ExecutionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionResult::Success { .. })
    }
}

/// Something that can run a [`CommandSpec`]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `spec` to completion, or until `cancel` fires.
    async fn run(&self, spec: &CommandSpec, cancel: &CancellationToken) -> ExecutionResult;
}

/// Runs commands as child processes of this server
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    timeout: Option<Duration>,
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill commands that run longer than `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    async fn deadline(&self) {
        match self.timeout {
            Some(timeout) => tokio::time::sleep(timeout).await,
            None => std::future::pending::<()>().await,
        }
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, spec: &CommandSpec, cancel: &CancellationToken) -> ExecutionResult {
        debug!("Executing: {}", spec);

        let mut cmd = Command::new(spec.program());
        cmd.args(spec.args())
            // stdin carries the MCP stream; the child must never read it
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(dir) = spec.working_dir() {
            cmd.current_dir(dir);
        }

        let child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // spawn reports a vanished working directory as NotFound too
                if let Some(dir) = missing_working_dir(spec).await {
                    warn!("Working directory missing: {}", dir.display());
                    return ExecutionResult::SpawnFailed {
                        program: spec.program().to_string(),
                        message: format!("working directory does not exist: {}", dir.display()),
                    };
                }
                warn!("Executable not found: {}", spec.program());
                return ExecutionResult::ExecutableNotFound(spec.program().to_string());
            }
            Err(e) => {
                warn!("Failed to spawn {}: {}", spec.program(), e);
                return ExecutionResult::SpawnFailed {
                    program: spec.program().to_string(),
                    message: e.to_string(),
                };
            }
        };

        // Dropping the wait future drops the child, and kill_on_drop kills it.
        let output = tokio::select! {
            output = child.wait_with_output() => output,
            _ = cancel.cancelled() => {
                debug!("Command cancelled: {}", spec.program());
                return ExecutionResult::Cancelled;
            }
            _ = self.deadline() => {
                let ms = self.timeout.map_or(0, |t| t.as_millis() as u64);
                warn!("Command timed out after {}ms: {}", ms, spec.program());
                return ExecutionResult::TimedOut(ms);
            }
        };

        let output = match output {
            Ok(output) => output,
            Err(e) => {
                return ExecutionResult::SpawnFailed {
                    program: spec.program().to_string(),
                    message: e.to_string(),
                }
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        debug!(
            "Command completed: status={}, stdout_len={}, stderr_len={}",
            output.status,
            stdout.len(),
            stderr.len()
        );

        if output.status.success() {
            ExecutionResult::Success { stdout, stderr }
        } else {
            ExecutionResult::CommandFailed {
                exit_code: output.status.code().unwrap_or(-1),
                stderr,
                stdout,
            }
        }
    }
}

async fn missing_working_dir(spec: &CommandSpec) -> Option<&Path> {
    let dir = spec.working_dir()?;
    match tokio::fs::metadata(dir).await {
        Ok(meta) if meta.is_dir() => None,
        _ => Some(dir),
    }
}
