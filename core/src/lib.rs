//! pxld-core
//!
//! Decoder for the ProxySQL binary query log.
//! Synchronous, no IO beyond the `Read` it is handed, no logging.

#![forbid(unsafe_code)]

// Shared and top level
pub mod config;
pub mod constants;
pub mod types;

// Format layers, leaves first
pub mod codec;
pub mod framing;
pub mod record;
pub mod stream;

pub mod telemetry;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::codec::{LogText, LogTime};
    pub use crate::config::DecoderConfig;
    pub use crate::framing::RecordReader;
    pub use crate::record::{decode_one, decode_record, HostId, QueryEntry, QueryEvent};
    pub use crate::stream::{
        decode_file, decode_file_with, decode_stream, decode_stream_partial, decode_stream_with,
        PartialDecode, QueryLogReader,
    };
    pub use crate::telemetry::TelemetrySnapshot;
    pub use crate::types::{DecodeError, ErrorKind, Field};
}
