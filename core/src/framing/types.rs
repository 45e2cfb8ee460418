use std::io;

use thiserror::Error;

use crate::constants::RECORD_LEN_PREFIX;

/// One record lifted out of a stream: the declared length and exactly
/// that many payload bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFrame {
    pub declared_len: u64,
    pub payload: Vec<u8>,
}

impl RecordFrame {
    /// Bytes the record occupied on the wire, prefix included.
    pub fn wire_len(&self) -> u64 {
        RECORD_LEN_PREFIX as u64 + self.declared_len
    }
}

/// Borrowed view of a record inside an in-memory buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordView<'a> {
    pub declared_len: u64,
    pub payload: &'a [u8],
}

#[derive(Debug, Error)]
pub enum FrameError {
    /// No bytes at all where the next length prefix should start.
    #[error("end of stream")]
    EndOfStream,

    #[error("truncated record length prefix: expected {expected} bytes, read {actual}")]
    TruncatedPrefix { expected: usize, actual: usize },

    #[error("truncated record payload: expected {expected} bytes, read {actual}")]
    TruncatedPayload { expected: u64, actual: u64 },

    #[error("record payload of {declared} bytes exceeds the {limit} byte limit")]
    PayloadTooLarge { declared: u64, limit: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
