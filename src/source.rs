//! Duration sources: the interchangeable strategies behind the resolver.
//!
//! Each source is stateless, independently invocable, and safe to call
//! from multiple threads; a source owns nothing beyond its own
//! configuration. `measure` never panics and never blocks past the
//! source's own bounds (the external sources enforce a subprocess
//! timeout; the byte-level sources only do ordinary file reads).

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::resolver::Strategy;

/// One way of measuring a media file's duration.
pub trait DurationSource: Send + Sync {
    /// Human-readable name identifying this source.
    fn name(&self) -> &'static str;

    /// The strategy tag recorded in a resolution produced by this source.
    fn strategy(&self) -> Strategy;

    /// Measure the duration of the file at `path`, in seconds.
    ///
    /// `None` means this source could not determine it; that is an
    /// ordinary outcome, not an error.
    fn measure(&self, path: &Path) -> Option<f64>;
}

/// External ffprobe invocation with JSON output.
pub struct FfprobeSource {
    exe: PathBuf,
    timeout: Duration,
}

impl FfprobeSource {
    pub fn new(exe: PathBuf, timeout: Duration) -> Self {
        Self { exe, timeout }
    }
}

impl DurationSource for FfprobeSource {
    fn name(&self) -> &'static str {
        "ffprobe"
    }

    fn strategy(&self) -> Strategy {
        Strategy::ExternalJson
    }

    fn measure(&self, path: &Path) -> Option<f64> {
        airtime_probe::ffprobe::probe_duration(path, &self.exe, self.timeout)
    }
}

/// External ffmpeg invocation, duration scraped from its stderr banner.
pub struct FfmpegSource {
    exe: PathBuf,
    timeout: Duration,
}

impl FfmpegSource {
    pub fn new(exe: PathBuf, timeout: Duration) -> Self {
        Self { exe, timeout }
    }
}

impl DurationSource for FfmpegSource {
    fn name(&self) -> &'static str {
        "ffmpeg"
    }

    fn strategy(&self) -> Strategy {
        Strategy::ExternalText
    }

    fn measure(&self, path: &Path) -> Option<f64> {
        airtime_probe::ffmpeg::probe_duration(path, &self.exe, self.timeout)
    }
}

/// In-process Matroska/EBML walker.
pub struct MkvSource;

impl DurationSource for MkvSource {
    fn name(&self) -> &'static str {
        "mkv"
    }

    fn strategy(&self) -> Strategy {
        Strategy::Ebml
    }

    fn measure(&self, path: &Path) -> Option<f64> {
        match airtime_container::mkv::duration_of(path) {
            Ok(duration) => duration,
            Err(e) => {
                tracing::debug!(error = %e, "mkv source cannot open file");
                None
            }
        }
    }
}

/// In-process ISO-BMFF box walker.
pub struct Mp4Source;

impl DurationSource for Mp4Source {
    fn name(&self) -> &'static str {
        "mp4"
    }

    fn strategy(&self) -> Strategy {
        Strategy::IsoBmff
    }

    fn measure(&self, path: &Path) -> Option<f64> {
        match airtime_container::mp4::duration_of(path) {
            Ok(duration) => duration,
            Err(e) => {
                tracing::debug!(error = %e, "mp4 source cannot open file");
                None
            }
        }
    }
}
