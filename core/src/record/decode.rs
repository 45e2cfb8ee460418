use std::io::Read;

use crate::codec::{read_timestamp, read_varint, read_varstr, render_digest, ByteCursor};
use crate::constants::QUERY_LOG_MARKER;
use crate::framing::RecordReader;
use crate::record::types::{HostId, QueryEvent};
use crate::types::{AtField, DecodeError, Field};

/// Decode one framed payload into a `QueryEvent`.
///
/// Field order is fixed:
///
/// ```text
/// [ marker (1) = 0x00 ]
/// [ thread_id (varint) ]
/// [ username (varstr) ]
/// [ schema (varstr) ]
/// [ client_address (varstr) ]
/// [ hid (varint) ]
/// [ server_address (varstr) ]   only when hid != u64::MAX
/// [ start_at (varint us) ]
/// [ end_at (varint us) ]
/// [ query_digest (varint) ]
/// [ query (varstr) ]
/// ```
///
/// The first failing field aborts the whole record. Bytes after `query`
/// are not inspected.
pub fn decode_record(payload: &[u8]) -> Result<QueryEvent, DecodeError> {
    let mut cur = ByteCursor::new(payload);

    let marker = cur.take_u8().at(Field::Marker)?;
    if marker != QUERY_LOG_MARKER {
        return Err(DecodeError::NotQueryLog { marker });
    }

    let thread_id = read_varint(&mut cur).at(Field::ThreadId)?;
    let username = read_varstr(&mut cur).at(Field::Username)?;
    let schema = read_varstr(&mut cur).at(Field::Schema)?;
    let client_address = read_varstr(&mut cur).at(Field::ClientAddress)?;

    let hid = HostId::from_wire(read_varint(&mut cur).at(Field::Hid)?);
    let server_address = match hid {
        HostId::Id(_) => Some(read_varstr(&mut cur).at(Field::ServerAddress)?),
        HostId::Unrecorded => None,
    };

    let start_at = read_timestamp(&mut cur).at(Field::StartAt)?;
    let end_at = read_timestamp(&mut cur).at(Field::EndAt)?;
    let duration = end_at - start_at;

    let query_digest = render_digest(read_varint(&mut cur).at(Field::QueryDigest)?);
    let query = read_varstr(&mut cur).at(Field::Query)?;

    Ok(QueryEvent {
        message_length: payload.len() as u64,
        raw_message: payload.to_vec(),
        thread_id,
        username,
        schema,
        client_address,
        hid,
        server_address,
        start_at,
        end_at,
        duration,
        query_digest,
        query,
    })
}

/// Frame and decode exactly one record from a byte source.
///
/// A clean end of input surfaces as an error of kind `EndOfStream`.
pub fn decode_one<R: Read>(reader: &mut RecordReader<R>) -> Result<QueryEvent, DecodeError> {
    let frame = reader.frame_next()?;
    decode_record(&frame.payload)
}
