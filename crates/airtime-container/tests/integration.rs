//! Integration tests for airtime-container's file-level entry point.

use std::io::Write;

use airtime_container::{file_duration, Error};
use tempfile::NamedTempFile;

fn write_fixture(data: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(data).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn mkv_file_dispatches_to_ebml_walker() {
    // EBML header, Segment, SegmentInfo with scale 1ms and 120000 units.
    let mut data = vec![0x1A, 0x45, 0xDF, 0xA3, 0x80];
    let mut info = vec![0x2A, 0xD7, 0xB1, 0x84];
    info.extend(1_000_000u32.to_be_bytes());
    info.extend([0x44, 0x89, 0x88]);
    info.extend(120_000.0f64.to_be_bytes());
    let mut segment_info = vec![0x15, 0x49, 0xA9, 0x66, 0x80 | info.len() as u8];
    segment_info.extend(info);
    data.extend([0x18, 0x53, 0x80, 0x67, 0x80 | segment_info.len() as u8]);
    data.extend(segment_info);

    let fixture = write_fixture(&data);
    assert_eq!(file_duration(fixture.path()).unwrap(), Some(120.0));
}

#[test]
fn mp4_file_dispatches_to_box_walker() {
    let mut mvhd = vec![0u8; 4];
    mvhd.extend([0u8; 8]);
    mvhd.extend(1000u32.to_be_bytes());
    mvhd.extend(65_000u32.to_be_bytes());
    mvhd.extend([0u8; 4]);

    let mut data = Vec::new();
    data.extend(16u32.to_be_bytes());
    data.extend(b"ftypisom\x00\x00\x00\x01");
    data.extend(((mvhd.len() + 16) as u32).to_be_bytes());
    data.extend(b"moov");
    data.extend(((mvhd.len() + 8) as u32).to_be_bytes());
    data.extend(b"mvhd");
    data.extend(&mvhd);

    let fixture = write_fixture(&data);
    assert_eq!(file_duration(fixture.path()).unwrap(), Some(65.0));
}

#[test]
fn unknown_magic_is_unrecognized() {
    let fixture = write_fixture(b"RIFF\x00\x00\x00\x00AVI LIST");
    let err = file_duration(fixture.path()).unwrap_err();
    assert!(matches!(err, Error::UnrecognizedContainer { .. }));
}

#[test]
fn zero_byte_file_is_unrecognized() {
    let fixture = write_fixture(&[]);
    let err = file_duration(fixture.path()).unwrap_err();
    assert!(matches!(err, Error::UnrecognizedContainer { .. }));
}

#[test]
fn missing_file_is_open_error() {
    let err = file_duration(std::path::Path::new("/no/such/file.mkv")).unwrap_err();
    assert!(matches!(err, Error::Open { .. }));
}

#[test]
fn recognized_but_damaged_file_is_undetermined() {
    // Valid EBML magic followed by a truncated element stream.
    let fixture = write_fixture(&[0x1A, 0x45, 0xDF, 0xA3, 0x84, 0, 0, 0, 0]);
    assert_eq!(file_duration(fixture.path()).unwrap(), None);
}
