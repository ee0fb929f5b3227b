//! Error types for airtime-container.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for airtime-container operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for airtime-container operations.
///
/// Malformed container data is not an error: the walkers degrade to an
/// undetermined duration (`None`) instead. Only a genuine failure to
/// open the stream, or a file no walker recognizes, surfaces here.
#[derive(Debug, Error)]
pub enum Error {
    /// The file could not be opened for reading.
    #[error("cannot open {}: {source}", path.display())]
    Open {
        /// The path that failed to open.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The file matches none of the supported container formats.
    #[error("unrecognized container: {}", path.display())]
    UnrecognizedContainer {
        /// The path that was sniffed.
        path: PathBuf,
    },
}

impl Error {
    /// Create an open error.
    pub fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }
}
