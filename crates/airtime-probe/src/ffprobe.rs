//! Duration probing via ffprobe's JSON output.

use std::path::Path;
use std::process::Command;
use std::time::Duration;

use serde::Deserialize;

use crate::command::{head_of, run_with_timeout};
use crate::error::{Error, Result};

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: Option<FfprobeFormat>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    // ffprobe emits the duration as a string; tolerate a bare number too.
    duration: Option<serde_json::Value>,
}

/// Probe the duration of `path` in seconds using ffprobe.
///
/// Every failure mode short of a usable number, including a missing
/// tool, a killed-on-timeout run, a non-zero exit, and unparseable
/// JSON, is logged and reported as `None`.
pub fn probe_duration(path: &Path, exe: &Path, timeout: Duration) -> Option<f64> {
    match try_probe(path, exe, timeout) {
        Ok(seconds) => Some(seconds),
        Err(e) => {
            tracing::debug!(error = %e, path = %path.display(), "ffprobe unavailable");
            None
        }
    }
}

fn try_probe(path: &Path, exe: &Path, timeout: Duration) -> Result<f64> {
    let mut cmd = Command::new(exe);
    cmd.args(["-v", "quiet", "-print_format", "json", "-show_format"])
        .arg(path);

    let out = run_with_timeout(&mut cmd, "ffprobe", timeout)?;
    if !out.success {
        return Err(Error::tool_failed("ffprobe", head_of(&out.stderr, 3)));
    }

    parse_duration_json(&out.stdout)
}

/// Extract `format.duration` from ffprobe JSON output.
pub(crate) fn parse_duration_json(json: &str) -> Result<f64> {
    let parsed: FfprobeOutput = serde_json::from_str(json)
        .map_err(|e| Error::malformed_output("ffprobe", e.to_string()))?;

    let value = parsed
        .format
        .and_then(|f| f.duration)
        .ok_or_else(|| Error::malformed_output("ffprobe", "no format.duration field"))?;

    let seconds = match &value {
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        other => other.as_f64(),
    };

    seconds
        .filter(|s| s.is_finite() && *s >= 0.0)
        .ok_or_else(|| Error::malformed_output("ffprobe", format!("bad duration value: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_string_duration() {
        let json = r#"{"format":{"duration":"125.40"}}"#;
        assert_eq!(parse_duration_json(json).unwrap(), 125.4);
    }

    #[test]
    fn parses_numeric_duration() {
        let json = r#"{"format":{"duration":3598.4}}"#;
        assert_eq!(parse_duration_json(json).unwrap(), 3598.4);
    }

    #[test]
    fn full_ffprobe_payload() {
        let json = r#"{
            "streams": [{"index": 0, "codec_type": "video"}],
            "format": {
                "filename": "a.mkv",
                "format_name": "matroska,webm",
                "duration": "120.000000",
                "size": "1048576"
            }
        }"#;
        assert_eq!(parse_duration_json(json).unwrap(), 120.0);
    }

    #[test]
    fn missing_duration_is_malformed() {
        let err = parse_duration_json(r#"{"format":{}}"#).unwrap_err();
        assert!(matches!(err, Error::MalformedOutput { .. }));
    }

    #[test]
    fn negative_duration_is_malformed() {
        let err = parse_duration_json(r#"{"format":{"duration":"-3"}}"#).unwrap_err();
        assert!(matches!(err, Error::MalformedOutput { .. }));
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(parse_duration_json("not json at all").is_err());
    }

    #[test]
    fn missing_tool_probes_to_none() {
        let got = probe_duration(
            Path::new("whatever.mkv"),
            Path::new("airtime-no-such-ffprobe"),
            Duration::from_secs(1),
        );
        assert_eq!(got, None);
    }
}
