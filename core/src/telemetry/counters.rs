//! telemetry/counters.rs
//! Mutable counters filled while a stream is decoded.
//!
//! Converted into an immutable `TelemetrySnapshot` at the end of a run.

use serde::{Deserialize, Serialize};

use crate::constants::RECORD_LEN_PREFIX;
use crate::record::QueryEvent;

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeCounters {
    pub records: u64,
    /// Records whose query never reached a backend.
    pub records_unrouted: u64,
    pub bytes_payload: u64,
    /// Length prefixes.
    pub bytes_framing: u64,
}

impl DecodeCounters {
    /// Record one successfully decoded event.
    pub fn add_event(&mut self, event: &QueryEvent) {
        self.records += 1;
        if event.hid.is_unrecorded() {
            self.records_unrouted += 1;
        }
        self.bytes_payload += event.message_length;
        self.bytes_framing += RECORD_LEN_PREFIX as u64;
    }

    /// Total bytes consumed from the source for decoded records.
    pub fn bytes_total(&self) -> u64 {
        self.bytes_payload + self.bytes_framing
    }
}
