//! Matroska (MKV/WebM) duration extraction.
//!
//! Walks the EBML element tree just far enough to locate the SegmentInfo
//! payload, then reads TimecodeScale and Duration out of it. Everything
//! else in the file is skipped by relative seeks, so the walk touches a
//! few hundred bytes of a multi-gigabyte file.
//!
//! Truncated or malformed input never errors: the walk stops and the
//! duration stays undetermined (`None`).

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::{Error, Result};

/// EBML header element, the magic number of every Matroska-family file.
const EBML_HEADER_ID: u64 = 0x1A45_DFA3;
/// Segment element wrapping everything after the EBML header.
const SEGMENT_ID: u64 = 0x1853_8067;
/// SegmentInfo element carrying the global timing metadata.
const SEGMENT_INFO_ID: u64 = 0x1549_A966;
/// TimecodeScale: nanoseconds represented by one Matroska time unit.
const TIMECODE_SCALE_ID: u64 = 0x2A_D7B1;
/// Segment duration in timecode units, stored as a float.
const DURATION_ID: u64 = 0x44_89;

/// Best-effort duration of a Matroska file, in seconds.
///
/// Returns `Err` only when the file cannot be opened. `Ok(None)` means
/// the duration could not be determined, which covers non-Matroska
/// input as well as damaged files.
pub fn duration_of(path: &Path) -> Result<Option<f64>> {
    let file = File::open(path).map_err(|e| Error::open(path, e))?;
    let mut reader = MkvReader::new(BufReader::new(file));
    Ok(reader.duration())
}

/// Minimal EBML walker over any seekable byte stream.
pub struct MkvReader<R> {
    reader: R,
}

impl<R: Read + Seek> MkvReader<R> {
    /// Create a new walker. The stream is expected to be positioned at
    /// the start of the EBML header.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Best-effort duration in seconds. `None` means undetermined.
    pub fn duration(&mut self) -> Option<f64> {
        let payload_size = self.find_segment_info()?;
        self.parse_segment_info(payload_size)
    }

    /// Read an EBML element ID.
    ///
    /// The position of the first set bit in the leading byte gives the
    /// encoded width, capped at 4 bytes. IDs keep their length marker
    /// bits, so the constants above compare directly against the raw
    /// value. End of stream yields 0, the terminal sentinel. A leading
    /// byte with no marker within four widths degrades to whatever was
    /// read.
    fn read_id(&mut self) -> u64 {
        let lead = match self.read_byte() {
            Some(b) => b,
            None => return 0,
        };

        let mut width = 0usize;
        for k in 0..4 {
            if lead & (0x80 >> k) != 0 {
                width = k + 1;
                break;
            }
        }

        let mut value = u64::from(lead);
        for _ in 1..width.max(1) {
            match self.read_byte() {
                Some(b) => value = (value << 8) | u64::from(b),
                None => return value,
            }
        }
        value
    }

    /// Read an EBML data size.
    ///
    /// Same width scheme as IDs but up to 8 bytes, and the marker bit
    /// is masked off before accumulating. End of stream yields 0.
    ///
    /// The all-ones "unknown size" sentinel gets no special treatment:
    /// it reads as a very large integer, and the resulting over-long
    /// seek runs the walk off the end of the stream, degrading the
    /// parse to undetermined.
    fn read_size(&mut self) -> u64 {
        let lead = match self.read_byte() {
            Some(b) => b,
            None => return 0,
        };

        let mut width = 0usize;
        for k in 0..8 {
            if lead & (0x80 >> k) != 0 {
                width = k + 1;
                break;
            }
        }
        if width == 0 {
            return 0;
        }

        let mut value = u64::from(lead & (0xFF >> width));
        for _ in 1..width {
            match self.read_byte() {
                Some(b) => value = (value << 8) | u64::from(b),
                None => return value,
            }
        }
        value
    }

    /// Locate the SegmentInfo element and return its payload size, with
    /// the stream positioned at the start of the payload.
    fn find_segment_info(&mut self) -> Option<u64> {
        if self.read_id() != EBML_HEADER_ID {
            tracing::debug!("no EBML header, not a Matroska container");
            return None;
        }
        let header_size = self.read_size();
        self.skip(header_size)?;

        self.scan_for(SEGMENT_ID)?;
        self.scan_for(SEGMENT_INFO_ID)
    }

    /// Scan sibling elements forward until `target` is found, skipping
    /// unmatched payloads. Returns the target's payload size, or `None`
    /// once the stream is exhausted.
    fn scan_for(&mut self, target: u64) -> Option<u64> {
        loop {
            let id = self.read_id();
            if id == 0 {
                return None;
            }
            let size = self.read_size();
            if id == target {
                return Some(size);
            }
            if size == 0 {
                return None;
            }
            self.skip(size)?;
        }
    }

    /// Read TimecodeScale and Duration out of the SegmentInfo payload.
    ///
    /// The scan is bounded by the payload size so it cannot run into
    /// sibling elements. The float duration is truncated to an integer
    /// number of timecode units before scaling, matching how scheduler
    /// databases have historically stored it.
    fn parse_segment_info(&mut self, payload_size: u64) -> Option<f64> {
        let start = self.reader.stream_position().ok()?;
        let end = start.saturating_add(payload_size);

        let mut scale: u64 = 0;
        let mut units: i64 = 0;

        while self.reader.stream_position().ok()? < end {
            let id = self.read_id();
            if id == 0 {
                break;
            }
            let size = self.read_size();

            match id {
                TIMECODE_SCALE_ID => scale = self.read_uint(size),
                DURATION_ID => units = self.read_float(size).map_or(0, |f| f as i64),
                _ => self.skip(size)?,
            }

            if scale != 0 && units != 0 {
                break;
            }
        }

        // A negative unit count can only come from a damaged or hostile
        // Duration float; the contract is seconds >= 0 or undetermined.
        if scale != 0 && units > 0 {
            Some(units as f64 * scale as f64 / 1_000_000_000.0)
        } else {
            None
        }
    }

    /// Accumulate up to `size` bytes big-endian into an unsigned
    /// integer. A short read aborts the value to 0.
    fn read_uint(&mut self, size: u64) -> u64 {
        let mut value: u64 = 0;
        for _ in 0..size {
            match self.read_byte() {
                Some(b) => value = (value << 8) | u64::from(b),
                None => return 0,
            }
        }
        value
    }

    /// Read an IEEE-754 big-endian float of the given encoded size.
    /// Matroska allows 4- or 8-byte floats; anything else, or a short
    /// read, is undetermined. The payload is always consumed so the
    /// element scan stays aligned.
    fn read_float(&mut self, size: u64) -> Option<f64> {
        match size {
            4 => {
                let mut buf = [0u8; 4];
                self.reader.read_exact(&mut buf).ok()?;
                Some(f64::from(f32::from_be_bytes(buf)))
            }
            8 => {
                let mut buf = [0u8; 8];
                self.reader.read_exact(&mut buf).ok()?;
                Some(f64::from_be_bytes(buf))
            }
            _ => {
                self.skip(size)?;
                None
            }
        }
    }

    fn read_byte(&mut self) -> Option<u8> {
        let mut buf = [0u8; 1];
        match self.reader.read(&mut buf) {
            Ok(1) => Some(buf[0]),
            _ => None,
        }
    }

    fn skip(&mut self, size: u64) -> Option<()> {
        self.reader.seek(SeekFrom::Current(size as i64)).ok()?;
        Some(())
    }
}
