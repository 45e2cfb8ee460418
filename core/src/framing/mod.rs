//! Record framing for the query log.
//!
//! Responsibilities:
//! - Read the 8-byte payload length
//! - Isolate exactly that many payload bytes
//! - Tell clean end-of-input apart from truncation
//!
//! Non-responsibilities:
//! - Field decoding
//! - Opening or rotating files

pub mod types;
pub mod encode;
pub mod decode;

pub use types::{FrameError, RecordFrame, RecordView};
pub use decode::{split_record, RecordReader};
pub use encode::encode_frame;
