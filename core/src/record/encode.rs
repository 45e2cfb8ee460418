use crate::codec::{put_timestamp, put_varint, put_varstr, LogTime};
use crate::constants::QUERY_LOG_MARKER;
use crate::framing::encode_frame;
use crate::record::decode::decode_record;
use crate::record::types::{HostId, QueryEntry, QueryEvent};
use crate::types::{AtField, DecodeError, Field};

/// Encode the payload of one record (no length prefix).
///
/// Field order mirrors `decode_record` exactly.
pub fn encode_record(entry: &QueryEntry) -> Result<Vec<u8>, DecodeError> {
    let mut out = Vec::with_capacity(64 + entry.query.len());

    out.push(QUERY_LOG_MARKER);
    put_varint(&mut out, entry.thread_id);
    put_varstr(&mut out, entry.username.as_bytes());
    put_varstr(&mut out, entry.schema.as_bytes());
    put_varstr(&mut out, entry.client_address.as_bytes());

    put_varint(&mut out, entry.hid.to_wire());
    if let HostId::Id(_) = entry.hid {
        let addr = entry.server_address.as_ref().map(|a| a.as_bytes()).unwrap_or_default();
        put_varstr(&mut out, addr);
    }

    put_timestamp(&mut out, LogTime::try_from(entry.start_at).at(Field::StartAt)?);
    put_timestamp(&mut out, LogTime::try_from(entry.end_at).at(Field::EndAt)?);
    put_varint(&mut out, entry.query_digest);
    put_varstr(&mut out, entry.query.as_bytes());

    Ok(out)
}

/// Encode a complete on-disk record, length prefix included.
pub fn encode_entry_frame(entry: &QueryEntry) -> Result<Vec<u8>, DecodeError> {
    Ok(encode_frame(&encode_record(entry)?))
}

impl QueryEntry {
    /// Encode and decode back, yielding the event a reader would see.
    pub fn into_event(self) -> Result<QueryEvent, DecodeError> {
        decode_record(&encode_record(&self)?)
    }
}

