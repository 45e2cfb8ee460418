//! Field codecs for the query log payload.
//!
//! Responsibilities:
//! - Fixed little-endian integers
//! - MySQL-style length-encoded integers
//! - Length-prefixed strings and microsecond timestamps (`LogTime`)
//!
//! Non-responsibilities:
//! - Record framing
//! - Field order
//! - IO

pub mod types;
pub mod text;
pub mod time;
pub mod encode;
pub mod decode;

pub use types::{ByteCursor, CodecError, Discriminator, VarintWidth};
pub use text::LogText;
pub use time::LogTime;
pub use decode::{read_fixed_u64_le, read_timestamp, read_varint, read_varstr, render_digest};
pub use encode::{parse_digest, put_fixed_u64_le, put_timestamp, put_varint, put_varstr, varint_len};
