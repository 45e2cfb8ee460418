// Record decoder coverage: field order, sentinel host id, derived duration,
// digest rendering, error attribution and JSON rendering.

mod common;

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use chrono::TimeDelta;
    use pxld_core::framing::RecordReader;
    use pxld_core::record::{decode_one, decode_record, encode_record, HostId, QueryEntry};
    use pxld_core::types::{DecodeError, ErrorKind, Field};

    use crate::common::{at_micros, entry, sample_payload, sample_record, SAMPLE_MICROS};

// # ✅ 1. Reference record

    #[test]
    fn decodes_reference_record() {
        let mut reader = RecordReader::new(Cursor::new(sample_record()));
        let event = decode_one(&mut reader).unwrap();

        assert_eq!(event.message_length, 92);
        assert_eq!(event.raw_message, sample_payload());
        assert_eq!(event.thread_id, 21);
        assert_eq!(event.username, "didasy");
        assert_eq!(event.schema, "test");
        assert_eq!(event.client_address, "127.0.0.1:33680");
        assert_eq!(event.hid, HostId::Id(1));
        assert_eq!(event.server_address.as_ref().unwrap(), "127.0.0.1:3306");
        assert_eq!(event.start_at, at_micros(SAMPLE_MICROS));
        assert_eq!(event.end_at, at_micros(SAMPLE_MICROS));
        assert_eq!(event.duration, TimeDelta::zero());
        assert_eq!(event.query_digest, "0xB3136F4238DF1D37");
        assert_eq!(event.query, "select * from test");
    }

    #[test]
    fn raw_message_length_matches_message_length() {
        let event = decode_record(&sample_payload()).unwrap();
        assert_eq!(event.raw_message.len() as u64, event.message_length);
    }

    #[test]
    fn decode_one_at_end_is_end_of_stream() {
        let mut reader = RecordReader::new(Cursor::new(Vec::<u8>::new()));
        let err = decode_one(&mut reader).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EndOfStream);
        assert!(err.is_end_of_stream());
    }

// # ✅ 2. Sentinel host id

    #[test]
    fn sentinel_hid_has_no_server_address() {
        let e = QueryEntry {
            hid: HostId::Unrecorded,
            server_address: Some("ignored:1".into()),
            ..entry(7, "select 1")
        };
        let payload = encode_record(&e).unwrap();
        let event = decode_record(&payload).unwrap();

        assert_eq!(event.hid, HostId::Unrecorded);
        assert_eq!(event.hid.to_wire(), u64::MAX);
        assert!(event.server_address.is_none());
        assert_eq!(event.query, "select 1");
    }

    #[test]
    fn sentinel_hid_on_the_wire_skips_the_address_field() {
        // marker, thread, user, schema, client, hid = MAX, start, end, digest, query
        let mut p = vec![0x00, 0x01, 0x00, 0x00, 0x00];
        p.push(0xFE);
        p.extend_from_slice(&u64::MAX.to_le_bytes());
        p.extend_from_slice(&[0x05, 0x09, 0x00, 0x02, b'o', b'k']);

        let event = decode_record(&p).unwrap();
        assert!(event.server_address.is_none());
        assert_eq!(event.duration, TimeDelta::microseconds(4));
        assert_eq!(event.query, "ok");
    }

    #[test]
    fn non_sentinel_hid_keeps_empty_server_address() {
        let e = QueryEntry {
            hid: HostId::Id(0),
            server_address: Some("".into()),
            ..entry(7, "select 1")
        };
        let event = e.into_event().unwrap();

        assert_eq!(event.hid, HostId::Id(0));
        assert_eq!(event.server_address.as_ref().unwrap(), "");
    }

    #[test]
    fn host_id_wire_mapping() {
        assert_eq!(HostId::from_wire(u64::MAX), HostId::Unrecorded);
        assert_eq!(HostId::from_wire(u64::MAX - 1), HostId::Id(u64::MAX - 1));
        assert_eq!(HostId::Id(3).get(), Some(3));
        assert_eq!(HostId::Unrecorded.get(), None);
    }

// # ✅ 3. Duration

    #[test]
    fn duration_is_end_minus_start() {
        let event = entry(1, "select sleep(1)").into_event().unwrap();
        assert_eq!(event.duration, TimeDelta::microseconds(1_250));
        assert_eq!(event.duration, event.end_at - event.start_at);
    }

    #[test]
    fn far_future_timestamp_decodes_without_calendar_instant() {
        // marker, thread, user, schema, client, hid = MAX, start = u64::MAX - 1, end = 5, digest, query
        let mut p = vec![0x00, 0x01, 0x00, 0x00, 0x00];
        p.push(0xFE);
        p.extend_from_slice(&u64::MAX.to_le_bytes());
        p.push(0xFE);
        p.extend_from_slice(&(u64::MAX - 1).to_le_bytes());
        p.extend_from_slice(&[0x05, 0x00, 0x02, b'o', b'k']);

        let event = decode_record(&p).unwrap();
        assert_eq!(event.start_at.as_micros(), u64::MAX - 1);
        assert!(event.start_at.to_datetime().is_none());
        assert_eq!(event.end_at, at_micros(5));
        assert_eq!(event.duration, TimeDelta::microseconds(i64::MIN));
        assert!(event.to_entry().is_none());

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["start_at"], u64::MAX - 1);
        assert_eq!(json["end_at"], "1970-01-01T00:00:00.000005Z");
        assert_eq!(json["duration"], i64::MIN);
    }

    #[test]
    fn negative_duration_is_propagated() {
        let e = QueryEntry {
            start_at: at_micros(SAMPLE_MICROS + 500),
            end_at: at_micros(SAMPLE_MICROS),
            ..entry(1, "select 1")
        };
        let event = e.into_event().unwrap();

        assert_eq!(event.duration, TimeDelta::microseconds(-500));
    }

// # ❌ 4. Marker and field errors

    #[test]
    fn non_zero_marker_is_invalid() {
        let mut payload = sample_payload();
        payload[0] = 0x01;

        let err = decode_record(&payload).unwrap_err();
        assert!(matches!(err, DecodeError::NotQueryLog { marker: 0x01 }));
        assert_eq!(err.kind(), ErrorKind::InvalidEncoding);
        assert_eq!(err.field(), Some(Field::Marker));
        assert!(err.to_string().contains("not a valid query log entry"));
    }

    #[test]
    fn empty_payload_is_truncated_at_marker() {
        let err = decode_record(&[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TruncatedInput);
        assert_eq!(err.field(), Some(Field::Marker));
    }

    #[test]
    fn every_strict_prefix_is_truncated() {
        let payload = sample_payload();
        for cut in 0..payload.len() {
            let err = decode_record(&payload[..cut]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::TruncatedInput, "cut at {cut}: {err}");
        }
    }

    #[test]
    fn truncation_names_the_field_and_counts() {
        // Cut inside "127.0.0.1:33680": 2 marker/thread + 7 user + 5 schema + 1 len + 4 bytes.
        let payload = sample_payload();
        let err = decode_record(&payload[..19]).unwrap_err();

        assert_eq!(err.field(), Some(Field::ClientAddress));
        assert_eq!(err.byte_counts(), Some((15, 4)));
    }

    #[test]
    fn reserved_discriminator_is_invalid_encoding() {
        let mut payload = sample_payload();
        payload[1] = 0xFF; // thread_id

        let err = decode_record(&payload).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEncoding);
        assert_eq!(err.field(), Some(Field::ThreadId));
    }

    #[test]
    fn trailing_bytes_after_query_are_ignored() {
        let mut payload = sample_payload();
        payload.extend_from_slice(&[0xDE, 0xAD]);

        let event = decode_record(&payload).unwrap();
        assert_eq!(event.query, "select * from test");
        assert_eq!(event.message_length, 94);
    }

// # ✅ 5. Encoder mirrors decoder

    #[test]
    fn encode_reproduces_reference_payload() {
        let event = decode_record(&sample_payload()).unwrap();
        let entry = event.to_entry().unwrap();

        assert_eq!(entry.query_digest.to_le_bytes(), [0xB3, 0x13, 0x6F, 0x42, 0x38, 0xDF, 0x1D, 0x37]);
        assert_eq!(encode_record(&entry).unwrap(), sample_payload());
    }

    #[test]
    fn wide_fields_survive_roundtrip() {
        let long_query = "x".repeat(70_000);
        let e = QueryEntry {
            thread_id: 16_777_216,
            hid: HostId::Id(300),
            ..entry(0, &long_query)
        };
        let event = e.clone().into_event().unwrap();

        assert_eq!(event.to_entry().unwrap(), e);
        assert_eq!(event.query.len(), 70_000);
    }

// # ✅ 6. JSON rendering

    #[test]
    fn json_uses_event_field_names() {
        let event = decode_record(&sample_payload()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&event.to_string()).unwrap();

        assert_eq!(json["message_length"], 92);
        assert_eq!(
            json["raw_message"],
            "ABUGZGlkYXN5BHRlc3QPMTI3LjAuMC4xOjMzNjgwAQ4xMjcuMC4wLjE6MzMwNv468XSRKIYFAP468XSRKIYFAP6zE29CON8dNxJzZWxlY3QgKiBmcm9tIHRlc3Q="
        );
        assert_eq!(json["thread_id"], 21);
        assert_eq!(json["username"], "didasy");
        assert_eq!(json["schema"], "test");
        assert_eq!(json["client_address"], "127.0.0.1:33680");
        assert_eq!(json["hid"], 1);
        assert_eq!(json["server_address"], "127.0.0.1:3306");
        assert_eq!(json["start_at"], "2019-04-10T08:08:00.727354Z");
        assert_eq!(json["end_at"], "2019-04-10T08:08:00.727354Z");
        assert_eq!(json["duration"], 0);
        assert_eq!(json["query_digest"], "0xB3136F4238DF1D37");
        assert_eq!(json["query"], "select * from test");
    }

    #[test]
    fn json_omits_backend_when_unrouted() {
        let e = QueryEntry {
            hid: HostId::Unrecorded,
            ..entry(9, "select 2")
        };
        let event = e.into_event().unwrap();
        let json = serde_json::to_value(&event).unwrap();

        assert!(json.get("hid").is_none());
        assert!(json.get("server_address").is_none());
        assert_eq!(json["duration"], 1_250_000);
    }
}
