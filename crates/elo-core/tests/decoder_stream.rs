//! Integration tests for the elo-core frame decoder.
//!
//! These tests drive the public API with realistic byte streams: noise,
//! corrupted frames, foreign packet types and back-to-back touch reports.

use elo_core::{
    protocol::frame::{checksum, encode_touch_frame, FRAME_LEN, LEAD_BYTE},
    FrameDecoder, FrameError, Packet, TouchEvent,
};

/// The reference frame `55 54 03 00 10 00 20 00 30 CHK`.
fn reference_frame() -> [u8; FRAME_LEN] {
    let mut frame = [0x55, 0x54, 0x03, 0x00, 0x10, 0x00, 0x20, 0x00, 0x30, 0x00];
    frame[9] = checksum(&frame[..9]);
    frame
}

fn reference_event() -> TouchEvent {
    TouchEvent { touch: true, x: 0x1000, y: 0x2000, z: 0x3000, status: 0x03 }
}

fn decode_all(edge_triggered: bool, bytes: &[u8]) -> Vec<TouchEvent> {
    let mut decoder = FrameDecoder::new(edge_triggered);
    decoder.events(bytes.iter().copied()).collect()
}

#[test]
fn test_reference_frame_yields_exactly_one_event() {
    let events = decode_all(false, &reference_frame());
    assert_eq!(events, vec![reference_event()]);
}

#[test]
fn test_reference_frame_checksum_value() {
    assert_eq!(reference_frame()[9], 0xB6);
}

#[test]
fn test_non_lead_bytes_while_idle_never_produce_events() {
    // Arrange
    let mut decoder = FrameDecoder::default();

    // Act / Assert
    for byte in (0u8..=255).filter(|&b| b != LEAD_BYTE) {
        assert_eq!(decoder.process(byte), None);
        assert!(!decoder.is_collecting(), "byte 0x{byte:02X} left the decoder collecting");
    }
    assert_eq!(decoder.stats().unsynchronized_bytes, 255);
}

#[test]
fn test_single_byte_mutation_fails_checksum() {
    let original = reference_frame();

    for position in 1..FRAME_LEN {
        for delta in [0x01u8, 0x10, 0x80, 0xFF] {
            // Arrange
            let mut frame = original;
            frame[position] = frame[position].wrapping_add(delta);
            let mut decoder = FrameDecoder::default();

            // Act
            let results: Vec<_> = frame.iter().map(|&b| decoder.push(b)).collect();

            // Assert
            assert!(
                matches!(results[9], Err(FrameError::ChecksumMismatch { .. })),
                "position {position} delta 0x{delta:02X} was accepted"
            );
            assert_eq!(decoder.stats().touch_events, 0);
        }
    }
}

#[test]
fn test_two_identical_touch_frames_respect_edge_triggering() {
    let mut bytes = reference_frame().to_vec();
    bytes.extend_from_slice(&reference_frame());

    assert_eq!(decode_all(true, &bytes), vec![reference_event()]);
    assert_eq!(decode_all(false, &bytes), vec![reference_event(), reference_event()]);
}

#[test]
fn test_decoder_recovers_after_checksum_failure() {
    // Arrange
    let mut corrupted = reference_frame();
    corrupted[9] ^= 0x5A;
    let mut bytes = corrupted.to_vec();
    bytes.extend_from_slice(&reference_frame());
    let mut decoder = FrameDecoder::default();

    // Act
    let events: Vec<_> = decoder.events(bytes).collect();

    // Assert
    assert_eq!(events, vec![reference_event()]);
    assert_eq!(decoder.stats().checksum_failures, 1);
    assert_eq!(decoder.stats().frames, 1);
}

#[test]
fn test_foreign_packet_type_is_consumed_silently() {
    // Arrange
    let mut foreign = reference_frame();
    foreign[1] = b'P';
    foreign[9] = checksum(&foreign[..9]);
    let mut decoder = FrameDecoder::default();

    // Act
    let results: Vec<_> = foreign.iter().map(|&b| decoder.push(b)).collect();

    // Assert
    assert!(results.iter().all(|r| r.is_ok()));
    assert!(matches!(results[9], Ok(Some(Packet::Unknown { packet_type: b'P', .. }))));
    assert!(!decoder.is_collecting());

    // The decoder is ready for the next frame right away.
    assert_eq!(decoder.events(reference_frame()).collect::<Vec<_>>(), vec![reference_event()]);
}

#[test]
fn test_decoding_is_deterministic_across_instances() {
    let press = reference_event();
    let release = TouchEvent { touch: false, x: 0x1000, y: 0x2000, z: 0, status: 0x04 };
    let mut bytes = vec![0x00, 0x13, 0x37];
    bytes.extend_from_slice(&encode_touch_frame(&press));
    bytes.extend_from_slice(&[LEAD_BYTE, 0x54, 0x03]); // truncated frame swallows what follows
    bytes.extend_from_slice(&encode_touch_frame(&release));
    bytes.extend_from_slice(&encode_touch_frame(&press));
    bytes.extend_from_slice(&encode_touch_frame(&release));

    for edge_triggered in [false, true] {
        let first = decode_all(edge_triggered, &bytes);
        let second = decode_all(edge_triggered, &bytes);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }
}

#[test]
fn test_events_iterator_is_lazy() {
    // Arrange: an infinite stream of valid frames.
    let frame = reference_frame();
    let stream = frame.iter().copied().cycle();
    let mut decoder = FrameDecoder::default();

    // Act
    let taken: Vec<_> = decoder.events(stream).take(3).collect();

    // Assert
    assert_eq!(taken.len(), 3);
    assert_eq!(decoder.stats().frames, 3);
}
