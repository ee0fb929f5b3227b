//! End-to-end resolution through the byte-level strategy chain.
//!
//! External tools are deliberately left out of the chain here so the
//! tests run on hosts without ffmpeg installed; the subprocess plumbing
//! has its own tests in airtime-probe.

use std::io::Write;

use airtime::{DurationResolver, ResolverConfig, Strategy};
use tempfile::NamedTempFile;

fn byte_level_config() -> ResolverConfig {
    ResolverConfig::from_json(r#"{"strategies": ["ebml", "iso_bmff"], "windows_like": false}"#)
        .unwrap()
}

fn write_fixture(data: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(data).unwrap();
    file.flush().unwrap();
    file
}

/// EBML element with a single-byte size field.
fn ebml(id: &[u8], payload: &[u8]) -> Vec<u8> {
    let mut out = id.to_vec();
    out.push(0x80 | payload.len() as u8);
    out.extend_from_slice(payload);
    out
}

fn synthetic_mkv(timecode_scale: u32, duration_units: f64) -> Vec<u8> {
    let mut info = ebml(&[0x2A, 0xD7, 0xB1], &timecode_scale.to_be_bytes());
    info.extend(ebml(&[0x44, 0x89], &duration_units.to_be_bytes()));
    let segment_info = ebml(&[0x15, 0x49, 0xA9, 0x66], &info);
    let segment = ebml(&[0x18, 0x53, 0x80, 0x67], &segment_info);
    let mut file = ebml(&[0x1A, 0x45, 0xDF, 0xA3], &[]);
    file.extend(segment);
    file
}

fn synthetic_mp4(timescale: u32, duration: u32) -> Vec<u8> {
    let boxed = |kind: &[u8; 4], payload: &[u8]| {
        let mut out = ((payload.len() + 8) as u32).to_be_bytes().to_vec();
        out.extend_from_slice(kind);
        out.extend_from_slice(payload);
        out
    };

    let mut mvhd_payload = vec![0u8; 4]; // version 0, flags
    mvhd_payload.extend_from_slice(&[0u8; 8]); // creation, modification
    mvhd_payload.extend_from_slice(&timescale.to_be_bytes());
    mvhd_payload.extend_from_slice(&duration.to_be_bytes());
    mvhd_payload.extend_from_slice(&[0u8; 4]); // rate

    let mut file = boxed(b"ftyp", b"isom\x00\x00\x00\x01isom");
    file.extend(boxed(b"moov", &boxed(b"mvhd", &mvhd_payload)));
    file
}

#[test]
fn mkv_resolves_through_ebml_strategy() {
    let fixture = write_fixture(&synthetic_mkv(1_000_000, 120_000.0));
    let resolver = DurationResolver::new(&byte_level_config());

    let r = resolver.resolve(fixture.path().to_str().unwrap());
    assert_eq!(r.seconds(), 120.0);
    assert_eq!(r.strategy(), Strategy::Ebml);
}

#[test]
fn mp4_resolves_through_isobmff_strategy() {
    let fixture = write_fixture(&synthetic_mp4(1000, 65_000));
    let resolver = DurationResolver::new(&byte_level_config());

    let r = resolver.resolve(fixture.path().to_str().unwrap());
    assert_eq!(r.seconds(), 65.0);
    assert_eq!(r.strategy(), Strategy::IsoBmff);
}

#[test]
fn resolution_is_idempotent() {
    let fixture = write_fixture(&synthetic_mkv(1_000_000, 3_598_400.0));
    let resolver = DurationResolver::new(&byte_level_config());
    let path = fixture.path().to_str().unwrap();

    let first = resolver.resolve(path);
    let second = resolver.resolve(path);
    assert_eq!(first.seconds(), second.seconds());
    assert_eq!(first.strategy(), second.strategy());
}

#[test]
fn zero_byte_file_is_unresolved() {
    let fixture = write_fixture(&[]);
    let resolver = DurationResolver::new(&byte_level_config());

    let r = resolver.resolve(fixture.path().to_str().unwrap());
    assert!(!r.is_resolved());
    assert_eq!(r.seconds(), 0.0);
}

#[test]
fn ff_garbage_is_unresolved() {
    let fixture = write_fixture(&[0xFF; 256]);
    let resolver = DurationResolver::new(&byte_level_config());

    let r = resolver.resolve(fixture.path().to_str().unwrap());
    assert!(!r.is_resolved());
}

#[test]
fn missing_file_is_unresolved() {
    let resolver = DurationResolver::new(&byte_level_config());
    let r = resolver.resolve("/no/such/dir/missing.mkv");
    assert!(!r.is_resolved());
}

#[test]
fn chain_falls_through_to_matching_strategy() {
    // MP4 fixture against a chain that tries EBML first: the MKV walker
    // rejects it and the box walker picks it up.
    let fixture = write_fixture(&synthetic_mp4(1000, 30_000));
    let resolver = DurationResolver::new(&byte_level_config());

    let r = resolver.resolve(fixture.path().to_str().unwrap());
    assert_eq!(r.strategy(), Strategy::IsoBmff);
    assert_eq!(r.seconds(), 30.0);
}

#[test]
fn resolution_serializes_with_strategy_tag() {
    let fixture = write_fixture(&synthetic_mkv(1_000_000, 60_000.0));
    let resolver = DurationResolver::new(&byte_level_config());

    let r = resolver.resolve(fixture.path().to_str().unwrap());
    let json = serde_json::to_string(&r).unwrap();
    assert!(json.contains("\"strategy\":\"ebml\""));
    assert!(json.contains("\"seconds\":60.0"));
}

#[test]
fn concurrent_resolution_shares_one_resolver() {
    let fixture = write_fixture(&synthetic_mkv(1_000_000, 120_000.0));
    let resolver = DurationResolver::new(&byte_level_config());
    let path = fixture.path().to_str().unwrap().to_string();

    std::thread::scope(|s| {
        for _ in 0..4 {
            let resolver = &resolver;
            let path = path.clone();
            s.spawn(move || {
                assert_eq!(resolver.resolve(&path).seconds(), 120.0);
            });
        }
    });
}
