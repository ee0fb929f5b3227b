//! External tool detection.

use std::path::PathBuf;
use std::process::Command;

use crate::error::{Error, Result};

/// Information about an external tool.
#[derive(Debug, Clone)]
pub struct ToolInfo {
    /// Name of the tool.
    pub name: String,
    /// Whether the tool is available.
    pub available: bool,
    /// First line of its version output, if available.
    pub version: Option<String>,
    /// Path to the tool executable.
    pub path: Option<PathBuf>,
}

/// Check whether a tool is runnable and capture its version line.
pub fn check_tool(name: &str, version_arg: &str) -> ToolInfo {
    let result = Command::new(name).arg(version_arg).output();

    match result {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .map(|s| s.to_string());

            ToolInfo {
                name: name.to_string(),
                available: true,
                version,
                path: which::which(name).ok(),
            }
        }
        _ => ToolInfo {
            name: name.to_string(),
            available: false,
            version: None,
            path: None,
        },
    }
}

/// Check the probing tools airtime can use.
pub fn check_tools() -> Vec<ToolInfo> {
    vec![
        check_tool("ffprobe", "-version"),
        check_tool("ffmpeg", "-version"),
    ]
}

/// Require that a tool is available, returning its path.
pub fn require_tool(name: &str) -> Result<PathBuf> {
    which::which(name).map_err(|_| Error::tool_not_found(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tool_reports_unavailable() {
        let info = check_tool("airtime-no-such-tool-12345", "--version");
        assert!(!info.available);
        assert!(info.version.is_none());
        assert!(info.path.is_none());
    }

    #[test]
    fn require_missing_tool_errors() {
        let err = require_tool("airtime-no-such-tool-12345").unwrap_err();
        assert!(matches!(err, Error::ToolNotFound { .. }));
    }
}
