//! ISO-BMFF (MP4/MOV) duration extraction.
//!
//! Walks the top-level box sequence to `moov`, then its children to
//! `mvhd`, and computes duration from the movie header's timescale and
//! duration fields. Sibling payloads are skipped with relative seeks.
//!
//! As with the MKV walker, malformed input degrades to an undetermined
//! duration instead of an error.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::{Error, Result};

/// Best-effort duration of an ISO-BMFF file, in whole seconds.
///
/// Returns `Err` only when the file cannot be opened. `Ok(None)` means
/// the duration could not be determined, including for files that are
/// not ISO-BMFF at all. A genuinely zero-length movie is reported as
/// undetermined too; callers decide what to make of that.
pub fn duration_of(path: &Path) -> Result<Option<f64>> {
    let file = File::open(path).map_err(|e| Error::open(path, e))?;
    let mut reader = Mp4Reader::new(BufReader::new(file));
    Ok(reader.duration())
}

/// A parsed box header. A non-positive payload is the "no more boxes"
/// sentinel produced by short reads and nonsense size fields.
struct BoxHeader {
    kind: [u8; 4],
    payload: i64,
}

/// Minimal box walker over any seekable byte stream.
pub struct Mp4Reader<R> {
    reader: R,
}

impl<R: Read + Seek> Mp4Reader<R> {
    /// Create a new walker positioned at the first box.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Best-effort duration in seconds. `None` means undetermined.
    pub fn duration(&mut self) -> Option<f64> {
        let first = self.read_box();
        if &first.kind != b"ftyp" {
            tracing::debug!("no ftyp box, not an ISO-BMFF container");
            return None;
        }
        if first.payload > 0 {
            self.skip(first.payload)?;
        }

        self.scan_for(b"moov")?;
        self.scan_for(b"mvhd")?;

        let (timescale, duration) = self.read_movie_header()?;
        if timescale > 0 && duration > 0 {
            Some((duration / u64::from(timescale)) as f64)
        } else {
            None
        }
    }

    /// Read one box header.
    ///
    /// A 32-bit size of 1 switches to the 64-bit extended size, and a
    /// `uuid` type pulls in 16 further bytes of extended type, both of
    /// which count against the payload. Any short read produces the
    /// sentinel header.
    fn read_box(&mut self) -> BoxHeader {
        let sentinel = BoxHeader {
            kind: [0; 4],
            payload: 0,
        };

        let mut header = [0u8; 8];
        if self.reader.read_exact(&mut header).is_err() {
            return sentinel;
        }

        let size32 = u32::from_be_bytes([header[0], header[1], header[2], header[3]]);
        let kind = [header[4], header[5], header[6], header[7]];
        let mut consumed = 8u64;

        let total = if size32 == 1 {
            let mut ext = [0u8; 8];
            if self.reader.read_exact(&mut ext).is_err() {
                return sentinel;
            }
            consumed += 8;
            u64::from_be_bytes(ext)
        } else {
            u64::from(size32)
        };

        if &kind == b"uuid" {
            let mut ext_type = [0u8; 16];
            if self.reader.read_exact(&mut ext_type).is_err() {
                return sentinel;
            }
            consumed += 16;
        }

        BoxHeader {
            kind,
            payload: total as i64 - consumed as i64,
        }
    }

    /// Scan sibling boxes forward until `target` is found, skipping
    /// unmatched payloads. Returns the target's payload size, or `None`
    /// once a sentinel box ends the sequence.
    fn scan_for(&mut self, target: &[u8; 4]) -> Option<i64> {
        loop {
            let b = self.read_box();
            if &b.kind == target {
                return Some(b.payload);
            }
            if b.payload <= 0 {
                return None;
            }
            self.skip(b.payload)?;
        }
    }

    /// Read the movie header and return `(timescale, duration)`.
    ///
    /// Version 1 carries 64-bit creation/modification/duration fields;
    /// version 0 (and anything unknown) carries 32-bit fields. Only
    /// timescale and duration are used.
    fn read_movie_header(&mut self) -> Option<(u32, u64)> {
        let mut version_flags = [0u8; 4];
        self.reader.read_exact(&mut version_flags).ok()?;

        if version_flags[0] == 1 {
            let mut body = [0u8; 36];
            self.reader.read_exact(&mut body).ok()?;
            let timescale = u32::from_be_bytes([body[16], body[17], body[18], body[19]]);
            let duration = u64::from_be_bytes([
                body[20], body[21], body[22], body[23], body[24], body[25], body[26], body[27],
            ]);
            Some((timescale, duration))
        } else {
            let mut body = [0u8; 20];
            self.reader.read_exact(&mut body).ok()?;
            let timescale = u32::from_be_bytes([body[8], body[9], body[10], body[11]]);
            let duration = u32::from_be_bytes([body[12], body[13], body[14], body[15]]);
            Some((timescale, u64::from(duration)))
        }
    }

    fn skip(&mut self, size: i64) -> Option<()> {
        self.reader.seek(SeekFrom::Current(size)).ok()?;
        Some(())
    }
}
