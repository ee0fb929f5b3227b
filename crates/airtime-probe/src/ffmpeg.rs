//! Duration probing via ffmpeg's stderr banner.
//!
//! `ffmpeg -i <file>` with no output file exits non-zero but still
//! prints the input analysis to stderr, including a line like
//!
//! ```text
//!   Duration: 00:59:58.40, start: 0.000000, bitrate: 2157 kb/s
//! ```
//!
//! which is all we need. This is the fallback for installs that ship
//! ffmpeg without ffprobe.

use std::path::Path;
use std::process::Command;
use std::time::Duration;

use crate::command::run_with_timeout;
use crate::error::Result;

/// Marker preceding the timestamp in the ffmpeg banner.
const DURATION_MARKER: &str = "Duration: ";

/// Probe the duration of `path` in seconds by scraping ffmpeg's input
/// analysis. Failures are logged and reported as `None`, exactly like
/// the ffprobe client.
pub fn probe_duration(path: &Path, exe: &Path, timeout: Duration) -> Option<f64> {
    match try_probe(path, exe, timeout) {
        Ok(seconds) => seconds,
        Err(e) => {
            tracing::debug!(error = %e, path = %path.display(), "ffmpeg unavailable");
            None
        }
    }
}

fn try_probe(path: &Path, exe: &Path, timeout: Duration) -> Result<Option<f64>> {
    let mut cmd = Command::new(exe);
    cmd.arg("-hide_banner").arg("-i").arg(path);

    // The exit status is deliberately ignored: with no output file
    // ffmpeg always fails, and the banner we want is on stderr anyway.
    let out = run_with_timeout(&mut cmd, "ffmpeg", timeout)?;
    Ok(parse_duration_banner(&out.stderr))
}

/// Scan analysis output for the duration line and convert its
/// `HH:MM:SS.fraction` timestamp to seconds.
///
/// A literal `N/A` timestamp means ffmpeg itself could not determine
/// the duration; that is `None`, not an error.
pub(crate) fn parse_duration_banner(stderr: &str) -> Option<f64> {
    for line in stderr.lines() {
        let Some(idx) = line.find(DURATION_MARKER) else {
            continue;
        };
        let rest = &line[idx + DURATION_MARKER.len()..];
        let stamp = rest.split(',').next().unwrap_or(rest).trim();
        if stamp == "N/A" {
            return None;
        }
        return parse_timestamp(stamp);
    }
    None
}

/// `HH:MM:SS.fraction` to seconds. Each component parses as a float.
fn parse_timestamp(stamp: &str) -> Option<f64> {
    let mut parts = stamp.split(':');
    let hours: f64 = parts.next()?.trim().parse().ok()?;
    let minutes: f64 = parts.next()?.trim().parse().ok()?;
    let seconds: f64 = parts.next()?.trim().parse().ok()?;
    Some(hours * 3600.0 + minutes * 60.0 + seconds)
}
