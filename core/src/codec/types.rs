//! codec/types.rs
//! Bounded cursor, discriminator registry and codec errors.

use num_enum::TryFromPrimitive;
use thiserror::Error;

use crate::constants::varint;

/// Width selector following the inline range of a length-encoded integer.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
pub enum VarintWidth {
    U16 = 0xFC,
    U24 = 0xFD,
    U64 = 0xFE,
}

impl VarintWidth {
    /// Number of value bytes following the discriminator.
    #[inline(always)]
    pub const fn value_len(self) -> usize {
        match self {
            VarintWidth::U16 => 2,
            VarintWidth::U24 => 3,
            VarintWidth::U64 => 8,
        }
    }

    /// Narrowest width able to carry `value`, `None` when it fits inline.
    #[inline]
    pub const fn for_value(value: u64) -> Option<Self> {
        if value <= varint::MAX_INLINE as u64 {
            None
        } else if value <= varint::MAX_U16 {
            Some(VarintWidth::U16)
        } else if value <= varint::MAX_U24 {
            Some(VarintWidth::U24)
        } else {
            Some(VarintWidth::U64)
        }
    }
}

/// Classification of a single discriminator byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discriminator {
    Inline(u8),
    Wide(VarintWidth),
    Reserved,
}

impl From<u8> for Discriminator {
    fn from(b: u8) -> Self {
        match b {
            0..=varint::MAX_INLINE => Discriminator::Inline(b),
            varint::RESERVED => Discriminator::Reserved,
            // 0xFC..=0xFE are the only bytes left.
            _ => match VarintWidth::try_from_primitive(b) {
                Ok(width) => Discriminator::Wide(width),
                Err(_) => Discriminator::Reserved,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("truncated input: expected {expected} bytes, {actual} available")]
    Truncated { expected: u64, actual: u64 },

    #[error("reserved length-encoded integer discriminator 0x{0:02X}")]
    ReservedDiscriminator(u8),

    #[error("timestamp {0} precedes the unix epoch and cannot be encoded")]
    NegativeTimestamp(i64),
}

/// Read cursor over one record payload.
///
/// Every read is checked against the slice end, so a field can never
/// consume bytes that belong to the next record.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Borrow the next `n` bytes and advance past them.
    #[inline]
    pub fn take(&mut self, n: u64) -> Result<&'a [u8], CodecError> {
        let available = self.remaining();
        if n > available as u64 {
            return Err(CodecError::Truncated {
                expected: n,
                actual: available as u64,
            });
        }
        let n = n as usize;
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    #[inline]
    pub fn take_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.take(1)?[0])
    }

    /// Unread tail of the payload.
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }
}
