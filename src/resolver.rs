//! The resolver: an ordered chain of duration sources.
//!
//! Strategies run in the configured order and the chain short-circuits
//! on the first strictly positive duration. Anything less, including
//! files no strategy can read, yields the explicit unresolved outcome
//! rather than an error: callers of a scheduler cannot do anything with
//! a failed probe except treat the duration as unknown.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::ResolverConfig;
use crate::source::{DurationSource, FfmpegSource, FfprobeSource, MkvSource, Mp4Source};
use crate::vpath;

/// How a duration was (or was not) determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Byte-level Matroska/EBML walk.
    Ebml,
    /// Byte-level ISO-BMFF box walk.
    IsoBmff,
    /// External structured prober (ffprobe JSON).
    ExternalJson,
    /// External textual prober (ffmpeg stderr banner).
    ExternalText,
    /// No strategy produced a positive duration.
    Unresolved,
}

/// A tagged duration result.
///
/// `seconds` is 0.0 when `strategy` is [`Strategy::Unresolved`], which
/// keeps the "unknown" outcome distinguishable from a file that some
/// strategy genuinely measured: a bare 0.0 is ambiguous, the tag is
/// not. Callers that only want the float use [`Resolution::seconds`].
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Resolution {
    seconds: f64,
    strategy: Strategy,
}

impl Resolution {
    /// The unresolved outcome.
    pub fn unresolved() -> Self {
        Self {
            seconds: 0.0,
            strategy: Strategy::Unresolved,
        }
    }

    /// Duration in seconds; 0.0 when unresolved.
    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    /// The strategy that produced this resolution.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Whether any strategy produced a positive duration.
    pub fn is_resolved(&self) -> bool {
        self.strategy != Strategy::Unresolved
    }
}

/// Resolves media durations through an ordered strategy chain.
///
/// A resolver is immutable after construction and holds no per-call
/// state, so one instance can serve concurrent callers.
pub struct DurationResolver {
    windows_like: bool,
    sources: Vec<Box<dyn DurationSource>>,
}

impl DurationResolver {
    /// Build a resolver from configuration.
    pub fn new(config: &ResolverConfig) -> Self {
        let timeout = std::time::Duration::from_millis(config.probe_timeout_ms);

        let mut sources: Vec<Box<dyn DurationSource>> = Vec::new();
        for strategy in &config.strategies {
            match strategy {
                Strategy::ExternalJson => sources.push(Box::new(FfprobeSource::new(
                    config.ffprobe_path.clone(),
                    timeout,
                ))),
                Strategy::ExternalText => sources.push(Box::new(FfmpegSource::new(
                    config.ffmpeg_path.clone(),
                    timeout,
                ))),
                Strategy::Ebml => sources.push(Box::new(MkvSource)),
                Strategy::IsoBmff => sources.push(Box::new(Mp4Source)),
                Strategy::Unresolved => {
                    // Rejected by config validation; tolerate hand-built
                    // configs anyway.
                    tracing::warn!("ignoring \"unresolved\" in strategy chain");
                }
            }
        }

        Self {
            windows_like: config.windows_like,
            sources,
        }
    }

    /// Resolve the duration of the media file at `path`.
    ///
    /// The path may carry a virtual share scheme; it is translated
    /// before any source touches it. Existence is the caller's
    /// responsibility, but a missing file still resolves cleanly to
    /// the unresolved outcome. This method never panics and never
    /// returns an error.
    pub fn resolve(&self, path: &str) -> Resolution {
        let translated = vpath::translate(path, self.windows_like);
        let target = Path::new(translated.as_ref());

        if !target.exists() {
            tracing::debug!(path = %target.display(), "file missing, duration unresolved");
            return Resolution::unresolved();
        }

        for source in &self.sources {
            match source.measure(target) {
                Some(seconds) if seconds > 0.0 => {
                    tracing::debug!(
                        source = source.name(),
                        seconds,
                        path = %target.display(),
                        "duration resolved"
                    );
                    return Resolution {
                        seconds,
                        strategy: source.strategy(),
                    };
                }
                _ => {
                    tracing::debug!(
                        source = source.name(),
                        path = %target.display(),
                        "source could not determine duration, trying next"
                    );
                }
            }
        }

        Resolution::unresolved()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_reads_as_zero_seconds() {
        let r = Resolution::unresolved();
        assert_eq!(r.seconds(), 0.0);
        assert_eq!(r.strategy(), Strategy::Unresolved);
        assert!(!r.is_resolved());
    }

    #[test]
    fn strategy_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&Strategy::ExternalJson).unwrap(),
            "\"external_json\""
        );
        assert_eq!(
            serde_json::to_string(&Strategy::IsoBmff).unwrap(),
            "\"iso_bmff\""
        );
    }

    #[test]
    fn missing_file_is_unresolved() {
        let resolver = DurationResolver::new(&ResolverConfig::default());
        let r = resolver.resolve("/no/such/dir/no-such-file.mkv");
        assert!(!r.is_resolved());
        assert_eq!(r.seconds(), 0.0);
    }
}
