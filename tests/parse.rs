//! End-to-end scenarios against the public `parse_bytes` entry point.
//! Mirrors the scenario table in the crate's design notes (S1-S6 plus the
//! boundary cases): concrete expected structures, no round-trip grids.

use mp3probe::{parse_bytes, ChannelMode, Error, ParserConfig};

fn frame_header(bytes: [u8; 4], payload_len: usize) -> Vec<u8> {
    let mut buf = bytes.to_vec();
    buf.extend(std::iter::repeat(0u8).take(payload_len));
    buf
}

#[test]
fn s1_pure_frame_no_id3v2() {
    let input = frame_header([0xFF, 0xFB, 0x90, 0x00], 413);
    let audio = parse_bytes(&input, ParserConfig::default()).unwrap();

    assert!(audio.header.is_none());
    assert!(audio.tags.is_empty());
    assert_eq!(audio.frames.len(), 1);

    let frame = &audio.frames[0];
    assert_eq!(frame.mpeg_version_id, 3);
    assert_eq!(frame.layer_id, 1);
    assert_eq!(frame.bitrate, 128);
    assert_eq!(frame.sampling_rate, 44_100);
    assert!(!frame.padded);
    assert_eq!(frame.channel, ChannelMode::Stereo);
    assert_eq!(frame.size, 413);
    assert_eq!(frame.raw_data.len(), 413);
}

#[test]
fn s2_padded_frame() {
    let input = frame_header([0xFF, 0xFB, 0x92, 0x00], 414);
    let audio = parse_bytes(&input, ParserConfig::default()).unwrap();

    assert_eq!(audio.frames.len(), 1);
    let frame = &audio.frames[0];
    assert!(frame.padded);
    assert_eq!(frame.size, 414);
    assert_eq!(frame.raw_data.len(), 414);
}

/// Builds an ID3v2.4 preamble with a declared synchsafe size, one TIT2 tag,
/// an optional zero-padding tag, followed by S1's frame.
fn id3_input(declared_size: u32, include_padding_tag: bool) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(b"ID3");
    buf.push(0x04); // major
    buf.push(0x00); // revision
    buf.push(0x00); // flags
    let s = declared_size;
    buf.push(((s >> 21) & 0x7F) as u8);
    buf.push(((s >> 14) & 0x7F) as u8);
    buf.push(((s >> 7) & 0x7F) as u8);
    buf.push((s & 0x7F) as u8);

    buf.extend_from_slice(b"TIT2");
    buf.extend_from_slice(&9u32.to_be_bytes());
    buf.extend_from_slice(&[0x00, 0x00]); // flags
    buf.extend_from_slice(&[0x00, b'H', b'e', b'l', b'l', b'o', b'!', 0x00, 0x00]);

    if include_padding_tag {
        buf.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]); // identifier starting 0x00
        buf.extend_from_slice(&0u32.to_be_bytes()); // size 0
        buf.extend_from_slice(&[0x00, 0x00]); // flags
    }

    buf.extend(frame_header([0xFF, 0xFB, 0x90, 0x00], 413));
    buf
}

#[test]
fn s3_id3v24_with_one_tag() {
    let input = id3_input(0x13, false);
    let audio = parse_bytes(&input, ParserConfig::default()).unwrap();

    let header = audio.header.expect("header present");
    assert_eq!(header.tag_version, "ID3V2.4.0");
    assert_eq!(audio.tags.len(), 1);
    assert_eq!(audio.tags[0].identifier, "TIT2");
    assert_eq!(audio.tags[0].flags, [0, 0]);
    assert_eq!(audio.tags[0].value.len(), 9);
    assert_eq!(audio.frames.len(), 1);
}

#[test]
fn s4_padding_tag_is_dropped() {
    let input = id3_input(0x1D, true);
    let audio = parse_bytes(&input, ParserConfig::default()).unwrap();

    assert_eq!(audio.tags.len(), 1);
    assert_eq!(audio.tags[0].identifier, "TIT2");
    assert_eq!(audio.frames.len(), 1);
}

#[test]
fn s5_tag_size_mismatch_is_rejected() {
    let input = id3_input(0x14, false);
    let err = parse_bytes(&input, ParserConfig::default()).unwrap_err();
    match err {
        Error::TagSizeMismatch { expected, actual } => {
            assert_eq!(expected, 0x14);
            assert_eq!(actual, 0x13);
        }
        other => panic!("expected TagSizeMismatch, got {:?}", other),
    }
}

#[test]
fn s6_no_sync_found() {
    let input = vec![0xAAu8; 1024];
    let err = parse_bytes(&input, ParserConfig::default()).unwrap_err();
    assert_eq!(err, Error::NoFrameFound);
}

#[test]
fn boundary_empty_buffer() {
    let err = parse_bytes(&[], ParserConfig::default()).unwrap_err();
    assert_eq!(err, Error::NoFrameFound);
}

#[test]
fn boundary_short_buffer_with_no_sync() {
    let err = parse_bytes(&[0x01, 0x02, 0x03], ParserConfig::default()).unwrap_err();
    assert_eq!(err, Error::NoFrameFound);
}

#[test]
fn boundary_buffer_starts_with_sync_header_and_tags_empty() {
    let input = frame_header([0xFF, 0xFB, 0x54, 0x00], 188);
    let audio = parse_bytes(&input, ParserConfig::default()).unwrap();

    assert!(audio.header.is_none());
    assert!(audio.tags.is_empty());
    assert_eq!(audio.frames.len(), 1);
    assert_eq!(audio.frames[0].size, 188);
}

#[test]
fn multiple_frames_preserve_stream_order() {
    let mut input = frame_header([0xFF, 0xFB, 0x90, 0x00], 413);
    input.extend(frame_header([0xFF, 0xFB, 0x92, 0x00], 414));
    let audio = parse_bytes(&input, ParserConfig::default()).unwrap();

    assert_eq!(audio.frames.len(), 2);
    assert!(!audio.frames[0].padded);
    assert!(audio.frames[1].padded);
}

#[test]
fn truncated_final_frame_is_rejected() {
    let mut input = vec![0xFF, 0xFB, 0x90, 0x00];
    input.extend(std::iter::repeat(0u8).take(100)); // declares 413, only 100 present
    let err = parse_bytes(&input, ParserConfig::default()).unwrap_err();
    match err {
        Error::TruncatedFrame { expected, actual } => {
            assert_eq!(expected, 413);
            assert_eq!(actual, 100);
        }
        other => panic!("expected TruncatedFrame, got {:?}", other),
    }
}

/// Exercises the `ParserConfig { debug: true }` path under a real subscriber:
/// a successful decode (the `debug!` call site) and a truncated frame (the
/// `warn!` call site immediately before `TruncatedFrame` is raised).
#[test]
fn debug_mode_emits_tracing_events_without_changing_output() {
    let subscriber = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let input = frame_header([0xFF, 0xFB, 0x90, 0x00], 413);
        let audio = parse_bytes(&input, ParserConfig { debug: true }).unwrap();
        assert_eq!(audio.frames.len(), 1);
        assert_eq!(audio.frames[0].size, 413);

        let mut truncated = vec![0xFF, 0xFB, 0x90, 0x00];
        truncated.extend(std::iter::repeat(0u8).take(100));
        let err = parse_bytes(&truncated, ParserConfig { debug: true }).unwrap_err();
        assert_eq!(
            err,
            Error::TruncatedFrame {
                expected: 413,
                actual: 100
            }
        );
    });
}
