use crate::codec::put_fixed_u64_le;
use crate::constants::RECORD_LEN_PREFIX;

/// Encode a payload into its on-disk record.
///
/// Layout:
///
/// ```text
/// [ payload_len (8, LE) ]
/// [ payload (N) ]
/// ```
pub fn encode_frame(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(RECORD_LEN_PREFIX + payload.len());
    put_fixed_u64_le(&mut out, payload.len() as u64);
    out.extend_from_slice(payload);
    out
}
