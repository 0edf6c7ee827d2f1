//! Line-level decoding: whole announcements as a modem delivers them

use callerid_protocol::frame::{checksum, SYNC_HOLD};
use callerid_protocol::mdmf::{self, ParameterType};
use callerid_protocol::{
    checksum_valid, CallRecord, CallerIdDecoder, DecodeStats, Field, Frame, ReasonCode,
    SyncState, MSG_TYPE_MDMF, PREAMBLE_BYTE, PREAMBLE_RUN,
};
use proptest::prelude::*;

/// Preamble, TYPE, LENGTH, payload and a correct checksum
fn announcement(payload: &[u8]) -> Vec<u8> {
    let mut body = vec![MSG_TYPE_MDMF, payload.len() as u8];
    body.extend_from_slice(payload);
    let csum = checksum(&body);

    let mut out = vec![PREAMBLE_BYTE; PREAMBLE_RUN];
    out.extend_from_slice(&body);
    out.push(csum);
    out
}

fn decode_all(bytes: &[u8]) -> Vec<CallRecord> {
    let mut decoder = CallerIdDecoder::new();
    let mut records = Vec::new();
    decoder.feed_bytes(bytes, |r| records.push(r));
    records
}

fn decode_chunked(bytes: &[u8], chunk: usize) -> Vec<CallRecord> {
    let mut decoder = CallerIdDecoder::new();
    let mut records = Vec::new();
    for piece in bytes.chunks(chunk.max(1)) {
        decoder.feed_bytes(piece, |r| records.push(r));
    }
    records
}

#[test]
fn test_time_only_announcement() {
    let payload = [0x01, 0x08, b'0', b'1', b'0', b'2', b'1', b'2', b'0', b'0'];
    let records = decode_all(&announcement(&payload));

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].time.as_str(), "01021200");
    assert_eq!(records[0].name.as_str(), "");
    assert_eq!(records[0].number.as_str(), "");
    assert!(records[0].name.is_absent());
}

#[test]
fn test_number_and_name_announcement() {
    let mut payload = vec![0x02, 0x0A];
    payload.extend_from_slice(b"5551234567");
    payload.extend_from_slice(&[0x07, 0x04]);
    payload.extend_from_slice(b"Jane");

    let records = decode_all(&announcement(&payload));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].number.value(), Some("5551234567"));
    assert_eq!(records[0].name.value(), Some("Jane"));
    assert!(records[0].time.is_absent());
}

#[test]
fn test_blocked_number_announcement() {
    let records = decode_all(&announcement(&[0x04, 0x01, b'O']));
    assert_eq!(records[0].number.as_str(), "O");
    assert_eq!(records[0].number.reason(), Some(ReasonCode::Blocked));
}

#[test]
fn test_bad_checksum_then_good_message() {
    let mut line = announcement(&[0x07, 0x03, b'B', b'o', b'b']);
    let last = line.len() - 1;
    line[last] ^= 0x01;
    line.extend(announcement(&[0x07, 0x03, b'A', b'n', b'n']));

    let mut decoder = CallerIdDecoder::with_observer(DecodeStats::new());
    let mut records = Vec::new();
    decoder.feed_bytes(&line, |r| records.push(r));

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name.as_str(), "Ann");
    assert_eq!(decoder.observer().checksum_failures, 1);
}

#[test]
fn test_zero_length_discarded() {
    let mut line = vec![PREAMBLE_BYTE; PREAMBLE_RUN];
    line.extend_from_slice(&[MSG_TYPE_MDMF, 0x00]);

    let mut decoder = CallerIdDecoder::new();
    assert_eq!(decoder.feed_bytes(&line, |_| {}), 0);
    assert_eq!(decoder.state(), SyncState::Idle);

    // Still decodes the next one
    let records = {
        let mut out = Vec::new();
        decoder.feed_bytes(&announcement(&[0x02, 0x01, b'7']), |r| out.push(r));
        out
    };
    assert_eq!(records[0].number.as_str(), "7");
}

#[test]
fn test_bounds_violation_then_good_message() {
    let mut line = announcement(&[0x02, 0x01, b'5', 0x07, 0xF0, b'A']);
    line.extend(announcement(&[0x02, 0x01, b'6']));

    let mut decoder = CallerIdDecoder::with_observer(DecodeStats::new());
    let mut records = Vec::new();
    decoder.feed_bytes(&line, |r| records.push(r));

    assert_eq!(decoder.observer().decode_errors, 1);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].number.as_str(), "6");
}

#[test]
fn test_false_preamble_recovers() {
    let mut line = vec![PREAMBLE_BYTE; PREAMBLE_RUN];
    line.extend(std::iter::repeat(0x00).take(SYNC_HOLD));
    line.extend(announcement(&[0x07, 0x01, b'Z']));

    let mut decoder = CallerIdDecoder::with_observer(DecodeStats::new());
    let mut records = Vec::new();
    decoder.feed_bytes(&line, |r| records.push(r));

    assert_eq!(decoder.observer().sync_lost, 1);
    assert_eq!(records.len(), 1);
}

#[test]
fn test_long_seizure_signal() {
    // Central offices send ~30 bytes of seizure followed by mark
    let mut line = vec![PREAMBLE_BYTE; 30];
    line.extend_from_slice(&[0xFF]);
    line.extend_from_slice(&announcement(&[0x07, 0x01, b'Q'])[PREAMBLE_RUN..]);

    let records = decode_all(&line);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name.as_str(), "Q");
}

#[test]
fn test_record_frame_roundtrip_on_the_line() {
    let original = CallRecord {
        name: Field::Withheld("P".try_into().unwrap()),
        number: Field::Value("8005551212".try_into().unwrap()),
        time: Field::Value("11230815".try_into().unwrap()),
    };
    let frame = original.to_frame().unwrap();
    let mut buf = [0u8; 128];
    let len = frame.encode_with_preamble(&mut buf).unwrap();

    let records = decode_all(&buf[..len]);
    assert_eq!(records, vec![original]);
}

#[test]
fn test_sdmf_type_not_decoded() {
    // SDMF (0x04) messages are outside this decoder
    let frame = Frame::new(0x04, b"01021200555").unwrap();
    let mut buf = [0u8; 64];
    let len = frame.encode_with_preamble(&mut buf).unwrap();
    assert!(decode_all(&buf[..len]).is_empty());
}

fn arb_field() -> impl Strategy<Value = (u8, Vec<u8>)> {
    (any::<u8>(), prop::collection::vec(0x20u8..0x7F, 0..20))
}

fn arb_payload() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(arb_field(), 1..6).prop_map(|fields| {
        let mut payload = heapless::Vec::<u8, 255>::new();
        for (tag, value) in fields {
            let _ = mdmf::encode_parameter(&mut payload, ParameterType::from_byte(tag), &value);
        }
        payload.to_vec()
    })
}

proptest! {
    #[test]
    fn prop_chunking_does_not_matter(
        payloads in prop::collection::vec(arb_payload(), 1..4),
        noise in prop::collection::vec(any::<u8>(), 0..40),
        chunk in 1usize..64,
    ) {
        let mut line = noise.clone();
        for p in payloads.iter().filter(|p| !p.is_empty()) {
            line.extend(announcement(p));
            line.extend_from_slice(&noise);
        }

        let whole = decode_all(&line);
        let pieces = decode_chunked(&line, chunk);
        prop_assert_eq!(whole, pieces);
    }

    #[test]
    fn prop_single_bit_flip_breaks_checksum(
        payload in arb_payload(),
        bit in 0usize..2048,
    ) {
        let frame = Frame::mdmf(&payload).unwrap();
        let mut encoded = frame.encode_to_vec().unwrap();
        prop_assert!(checksum_valid(&encoded));

        let bit = bit % (encoded.len() * 8);
        encoded[bit / 8] ^= 1 << (bit % 8);
        prop_assert!(!checksum_valid(&encoded));
    }

    #[test]
    fn prop_recovers_after_noise(noise in prop::collection::vec(any::<u8>(), 0..512)) {
        let mut line = noise;
        line.extend(announcement(&[0x07, 0x04, b'J', b'a', b'n', b'e']));

        let mut decoder = CallerIdDecoder::new();
        // Noise may leave a message in flight; a clean stream ends it
        let mut records = Vec::new();
        decoder.feed_bytes(&line, |r| records.push(r));
        if records.is_empty() {
            decoder.feed_bytes(&announcement(&[0x07, 0x04, b'J', b'a', b'n', b'e']), |r| records.push(r));
        }
        prop_assert!(records.iter().any(|r| r.name.as_str() == "Jane"));
    }

    #[test]
    fn prop_decode_never_panics(payload in prop::collection::vec(any::<u8>(), 0..255)) {
        let _ = mdmf::decode(&payload);
    }

    #[test]
    fn prop_any_line_is_safe(line in prop::collection::vec(any::<u8>(), 0..1024)) {
        let mut decoder = CallerIdDecoder::with_observer(DecodeStats::new());
        decoder.feed_bytes(&line, |_| {});
        let stats = decoder.observer();
        prop_assert!(stats.records <= stats.frames_accepted);
    }
}
