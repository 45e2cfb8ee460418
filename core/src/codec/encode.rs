use byteorder::{LittleEndian, WriteBytesExt};

use crate::codec::time::LogTime;
use crate::codec::types::VarintWidth;

// Writes go to a Vec<u8>, whose io::Write impl never fails.

#[inline]
pub fn put_fixed_u64_le(out: &mut Vec<u8>, value: u64) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Append `value` using the narrowest length-encoded width.
pub fn put_varint(out: &mut Vec<u8>, value: u64) {
    let Some(width) = VarintWidth::for_value(value) else {
        out.push(value as u8);
        return;
    };

    out.push(width as u8);
    let res = match width {
        VarintWidth::U16 => out.write_u16::<LittleEndian>(value as u16),
        VarintWidth::U24 => out.write_u24::<LittleEndian>(value as u32),
        VarintWidth::U64 => out.write_u64::<LittleEndian>(value),
    };
    debug_assert!(res.is_ok());
}

/// Encoded size of `value`, discriminator included.
#[inline]
pub const fn varint_len(value: u64) -> usize {
    match VarintWidth::for_value(value) {
        None => 1,
        Some(width) => 1 + width.value_len(),
    }
}

pub fn put_varstr(out: &mut Vec<u8>, raw: &[u8]) {
    put_varint(out, raw.len() as u64);
    out.extend_from_slice(raw);
}

#[inline]
pub fn put_timestamp(out: &mut Vec<u8>, at: LogTime) {
    put_varint(out, at.as_micros());
}

/// Inverse of `render_digest`; `None` unless the text is `0x` + 16 hex digits.
pub fn parse_digest(text: &str) -> Option<u64> {
    let digits = text.strip_prefix("0x")?;
    let mut raw = [0u8; 8];
    hex::decode_to_slice(digits, &mut raw).ok()?;
    Some(u64::from_le_bytes(raw))
}
