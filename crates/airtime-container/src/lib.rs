//! Airtime-Container: byte-level duration extraction from MKV and MP4 files.
//!
//! This crate reads just enough of a container to answer one question:
//! how long does the file play for? It exists for deployments where an
//! external prober (ffprobe/ffmpeg) is unavailable, or where the
//! subprocess round trip per file is too expensive.
//!
//! # Modules
//!
//! - `mkv` - Matroska/EBML walker (SegmentInfo timecode scale + duration)
//! - `mp4` - ISO-BMFF box walker (mvhd timescale + duration)
//!
//! Both walkers share the same failure envelope: opening the file is the
//! only operation that errors, and every malformation downstream of the
//! open degrades to an undetermined duration (`None`). They operate on
//! any `Read + Seek` stream, so tests run against in-memory cursors and
//! production runs against buffered files.

pub mod error;
pub mod mkv;
pub mod mp4;

pub use error::{Error, Result};
pub use mkv::MkvReader;
pub use mp4::Mp4Reader;

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Container formats the byte-level walkers understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Matroska,
    IsoBmff,
}

/// Detect the container format from magic bytes.
///
/// The stream is rewound to its starting position afterwards. `None`
/// means the leading bytes match neither format, which includes streams
/// shorter than 8 bytes.
pub fn sniff<R: Read + Seek>(reader: &mut R) -> Option<Container> {
    let start = reader.stream_position().ok()?;
    let mut magic = [0u8; 8];
    let got = reader.read(&mut magic).unwrap_or(0);
    reader.seek(SeekFrom::Start(start)).ok()?;

    if got < 8 {
        return None;
    }
    // EBML header (Matroska/WebM).
    if magic[0..4] == [0x1A, 0x45, 0xDF, 0xA3] {
        return Some(Container::Matroska);
    }
    // ftyp box and friends (MP4/MOV).
    if matches!(&magic[4..8], b"ftyp" | b"moov" | b"mdat" | b"free") {
        return Some(Container::IsoBmff);
    }
    None
}

/// Best-effort duration of a media file, in seconds, dispatching on the
/// sniffed container format.
///
/// `Err` carries open failures and unrecognized containers; `Ok(None)`
/// means the format was recognized but the duration stayed undetermined.
pub fn file_duration(path: &Path) -> Result<Option<f64>> {
    let file = File::open(path).map_err(|e| Error::open(path, e))?;
    let mut reader = BufReader::new(file);

    match sniff(&mut reader) {
        Some(Container::Matroska) => Ok(MkvReader::new(reader).duration()),
        Some(Container::IsoBmff) => Ok(Mp4Reader::new(reader).duration()),
        None => Err(Error::UnrecognizedContainer {
            path: path.to_path_buf(),
        }),
    }
}
