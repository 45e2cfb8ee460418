use crate::constants::DEFAULT_MAX_PAYLOAD_LEN;

/// Knobs for a decode run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Declared payload lengths above this are rejected before any payload
    /// byte is read. `None` disables the check.
    pub max_payload_len: Option<u64>,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_payload_len: Some(DEFAULT_MAX_PAYLOAD_LEN),
        }
    }
}

impl DecoderConfig {
    pub fn new(max_payload_len: Option<u64>) -> Self {
        Self { max_payload_len }
    }

    pub fn unbounded() -> Self {
        Self { max_payload_len: None }
    }
}
