use byteorder::{ByteOrder, LittleEndian};

use crate::codec::text::LogText;
use crate::codec::time::LogTime;
use crate::codec::types::{ByteCursor, CodecError, Discriminator, VarintWidth};

/// Read exactly 8 bytes as a little-endian u64.
#[inline]
pub fn read_fixed_u64_le(cur: &mut ByteCursor<'_>) -> Result<u64, CodecError> {
    let raw = cur.take(8)?;
    Ok(LittleEndian::read_u64(raw))
}

/// Read one length-encoded integer.
///
/// Layout:
///
/// ```text
/// [ b <= 0xFB ]            -> b
/// [ 0xFC ][ 2 bytes LE ]   -> u16
/// [ 0xFD ][ 3 bytes LE ]   -> u24
/// [ 0xFE ][ 8 bytes LE ]   -> u64
/// [ 0xFF ]                 -> reserved, rejected
/// ```
#[inline]
pub fn read_varint(cur: &mut ByteCursor<'_>) -> Result<u64, CodecError> {
    let lead = cur.take_u8()?;

    match Discriminator::from(lead) {
        Discriminator::Inline(v) => Ok(v as u64),
        Discriminator::Wide(width) => {
            let raw = cur.take(width.value_len() as u64)?;
            Ok(match width {
                VarintWidth::U16 => LittleEndian::read_u16(raw) as u64,
                VarintWidth::U24 => LittleEndian::read_u24(raw) as u64,
                VarintWidth::U64 => LittleEndian::read_u64(raw),
            })
        }
        Discriminator::Reserved => Err(CodecError::ReservedDiscriminator(lead)),
    }
}

/// Read a varint length followed by that many raw bytes.
#[inline]
pub fn read_varstr(cur: &mut ByteCursor<'_>) -> Result<LogText, CodecError> {
    let n = read_varint(cur)?;
    let raw = cur.take(n)?;
    Ok(LogText::from(raw))
}

/// Read microseconds since the unix epoch. Fails only like `read_varint`.
#[inline]
pub fn read_timestamp(cur: &mut ByteCursor<'_>) -> Result<LogTime, CodecError> {
    read_varint(cur).map(LogTime::from_micros)
}

/// Render a digest the way the proxy's log tooling shows it: the 8 bytes
/// of the little-endian encoding, in order, as uppercase hex.
#[inline]
pub fn render_digest(digest: u64) -> String {
    format!("0x{}", hex::encode_upper(digest.to_le_bytes()))
}
