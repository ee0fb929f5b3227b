//! Airtime: best-effort media duration resolution for schedulers.
//!
//! A scheduling application needs to know how long each item plays for,
//! independent of any host media database and without ever crashing on
//! a damaged file. This crate orchestrates several measurement
//! strategies into one call:
//!
//! 1. ffprobe (structured JSON output)
//! 2. ffmpeg (duration scraped from its analysis banner)
//! 3. in-process Matroska/EBML walk
//! 4. in-process ISO-BMFF box walk
//!
//! The chain order is configurable; offline deployments typically put
//! the byte-level walkers first or drop the external tools entirely.
//!
//! ```no_run
//! use airtime::{DurationResolver, ResolverConfig};
//!
//! let resolver = DurationResolver::new(&ResolverConfig::default());
//! let resolution = resolver.resolve("nfs://10.0.0.39/share/a.mkv");
//! if resolution.is_resolved() {
//!     println!("plays for {} s", resolution.seconds());
//! }
//! ```

pub mod config;
pub mod resolver;
pub mod source;
pub mod vpath;

pub use config::{ConfigError, ResolverConfig};
pub use resolver::{DurationResolver, Resolution, Strategy};
pub use source::DurationSource;
