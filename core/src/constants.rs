/// First payload byte of every query-log entry.
pub const QUERY_LOG_MARKER: u8 = 0x00;

/// Host id written when the query was never routed to a backend.
pub const UNRECORDED_HID: u64 = u64::MAX;

/// Size of the little-endian payload length that precedes every record.
pub const RECORD_LEN_PREFIX: usize = 8;

/// Default ceiling for a single record payload (1 GiB, MySQL's max_allowed_packet bound).
pub const DEFAULT_MAX_PAYLOAD_LEN: u64 = 1024 * 1024 * 1024;

/// Length-encoded integer discriminators (MySQL wire protocol layout).
pub mod varint {
    /// Largest value stored inline in the discriminator byte.
    pub const MAX_INLINE: u8 = 0xFB;
    pub const PREFIX_U16: u8 = 0xFC;
    pub const PREFIX_U24: u8 = 0xFD;
    pub const PREFIX_U64: u8 = 0xFE;
    /// Undefined by the log format; always corruption.
    pub const RESERVED: u8 = 0xFF;

    pub const MAX_U16: u64 = 0xFFFF;
    pub const MAX_U24: u64 = 0xFF_FFFF;
}
