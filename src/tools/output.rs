//! Tool result formatting
//!
//! Every tool call ends in a [`ToolOutput`]: a text payload plus an error
//! flag. Failed zopen commands are reported here as text so the calling agent
//! can read the diagnostics; the MCP call itself still succeeds.

use rmcp::model::{CallToolResult, Content};

use crate::runner::ExecutionResult;

/// Prefix of every failure message
pub const FAILURE_MARKER: &str = "❌";

/// Text returned when a command succeeds without printing anything
pub const SUCCESS_NO_OUTPUT: &str = "✅ Command successful with no output.";

/// Which streams make it into the result text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputPolicy {
    /// stdout on success, stderr on failure (zopen commands)
    StdoutOnly,
    /// stdout then stderr on success, stderr then stdout on failure (zopen-generate)
    Combined,
    /// stdout then stderr, success or failure (local builds)
    Build,
}

/// stdout, followed by stderr on its own line when there is any
fn joined(stdout: String, stderr: &str) -> String {
    if stderr.is_empty() {
        stdout
    } else {
        format!("{}\n{}", stdout, stderr)
    }
}

/// Text payload plus error flag, as sent back to the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub text: String,
    pub is_error: bool,
}

impl ToolOutput {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }

    /// Error result with the failure marker prepended
    pub fn failure(msg: impl AsRef<str>) -> Self {
        Self::error(format!("{} Error: {}", FAILURE_MARKER, msg.as_ref()))
    }

    /// Format a process outcome
    pub fn from_execution(result: ExecutionResult, policy: OutputPolicy) -> Self {
        match result {
            ExecutionResult::Success { stdout, stderr } => {
                let text = match policy {
                    OutputPolicy::StdoutOnly => stdout,
                    OutputPolicy::Combined | OutputPolicy::Build => joined(stdout, &stderr),
                };
                if text.is_empty() {
                    Self::success(SUCCESS_NO_OUTPUT)
                } else {
                    Self::success(text)
                }
            }
            ExecutionResult::CommandFailed {
                exit_code,
                stderr,
                stdout,
            } => {
                let detail = match policy {
                    OutputPolicy::StdoutOnly => stderr,
                    OutputPolicy::Combined => format!("{}\n{}", stderr, stdout),
                    OutputPolicy::Build => joined(stdout, &stderr),
                };
                Self::error(format!(
                    "{} Error (Exit Code: {}):\n{}",
                    FAILURE_MARKER, exit_code, detail
                ))
            }
            ExecutionResult::ExecutableNotFound(name) => Self::failure(format!(
                "Command '{}' not found. Is it in your PATH?",
                name
            )),
            ExecutionResult::SpawnFailed { program, message } => {
                Self::failure(format!("failed to run '{}': {}", program, message))
            }
            ExecutionResult::TimedOut(ms) => {
                Self::failure(format!("Command timed out after {}ms", ms))
            }
            ExecutionResult::Cancelled => Self::failure("Command cancelled"),
        }
    }

    /// Convert into the MCP result envelope
    pub fn into_call_result(self) -> CallToolResult {
        let content = vec![Content::text(self.text)];
        if self.is_error {
            CallToolResult::error(content)
        } else {
            CallToolResult::success(content)
        }
    }
}

/// Check required parameters before anything is executed.
///
/// `fields` pairs each required parameter name with whether it was supplied.
/// Returns the error result to send back when any is missing; the message
/// names every required parameter of the tool.
pub fn missing_required(fields: &[(&str, bool)]) -> Option<ToolOutput> {
    if fields.iter().all(|(_, present)| *present) {
        return None;
    }

    let names: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();
    let msg = match names.as_slice() {
        [single] => format!("{} parameter is required", single),
        _ => format!(
            "Required parameters missing. {} are required.",
            english_list(&names)
        ),
    };
    Some(ToolOutput::failure(msg))
}

/// "a", "a and b", "a, b, and c"
fn english_list(items: &[&str]) -> String {
    match items {
        [] => String::new(),
        [one] => one.to_string(),
        [a, b] => format!("{} and {}", a, b),
        [init @ .., last] => format!("{}, and {}", init.join(", "), last),
    }
}
