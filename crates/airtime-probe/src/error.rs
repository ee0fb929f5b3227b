//! Error types for airtime-probe.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving an external prober.
///
/// None of these cross the probing boundary: the probe functions log
/// the failure and report the duration as unavailable instead.
#[derive(Debug, Error)]
pub enum Error {
    /// The external tool is not installed or not on PATH.
    #[error("tool not found: {tool}")]
    ToolNotFound { tool: String },

    /// The external tool exceeded its wall-clock budget and was killed.
    #[error("tool timed out: {tool} after {timeout_ms} ms")]
    ToolTimeout { tool: String, timeout_ms: u64 },

    /// The external tool could not be spawned or waited on.
    #[error("tool execution failed: {tool}: {message}")]
    ToolFailed { tool: String, message: String },

    /// The tool ran but produced output we cannot make sense of.
    #[error("failed to parse {tool} output: {message}")]
    MalformedOutput { tool: String, message: String },
}

impl Error {
    /// Create a tool not found error.
    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Self::ToolNotFound { tool: tool.into() }
    }

    /// Create a tool execution failed error.
    pub fn tool_failed(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolFailed {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a malformed output error.
    pub fn malformed_output(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedOutput {
            tool: tool.into(),
            message: message.into(),
        }
    }
}
