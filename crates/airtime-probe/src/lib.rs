//! Airtime-Probe: media duration extraction via external tools.
//!
//! Two clients with one contract: point a command-line prober at a
//! file, bound it with a hard wall-clock timeout, and come back with
//! `Some(seconds)` or `None`. Nothing in this crate panics over bad
//! media or a broken tool install.
//!
//! - `ffprobe` - primary client, structured JSON output
//! - `ffmpeg` - fallback client, scraped from the stderr banner
//! - `command` - shared subprocess runner with kill-on-timeout
//! - `tools` - tool presence/version reporting

pub mod command;
pub mod error;
pub mod ffmpeg;
pub mod ffprobe;
pub mod tools;

pub use command::{run_with_timeout, CommandOutput};
pub use error::{Error, Result};
pub use tools::{check_tools, ToolInfo};

/// Default wall-clock budget for one external probe, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
