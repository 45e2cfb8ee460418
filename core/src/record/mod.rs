//! Query-log record assembly.
//!
//! Responsibilities:
//! - Walk a framed payload field by field in wire order
//! - Resolve the "no backend" host id sentinel
//! - Derive duration from the two timestamps
//! - Encode records back into payloads

pub mod types;
pub mod encode;
pub mod decode;

pub use types::{HostId, QueryEntry, QueryEvent};
pub use decode::{decode_one, decode_record};
pub use encode::{encode_entry_frame, encode_record};
