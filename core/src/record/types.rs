//! record/types.rs
//! Decoded query-log event and its wire-level counterpart.
//!
//! Notes:
//! - `QueryEvent` is what the decoder hands out; immutable once built.
//! - `QueryEntry` holds only the fields that are actually encoded and is
//!   what the encoder consumes.
//! - The "no backend" sentinel is folded into `HostId` at the wire boundary.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Serialize, Serializer};

use crate::codec::{parse_digest, LogText, LogTime};
use crate::constants::UNRECORDED_HID;

/// Backend host id. The wire stores `u64::MAX` for "not routed".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostId {
    Unrecorded,
    Id(u64),
}

impl HostId {
    /// Only place the sentinel is interpreted.
    #[inline(always)]
    pub const fn from_wire(raw: u64) -> Self {
        if raw == UNRECORDED_HID {
            HostId::Unrecorded
        } else {
            HostId::Id(raw)
        }
    }

    #[inline(always)]
    pub const fn to_wire(self) -> u64 {
        match self {
            HostId::Unrecorded => UNRECORDED_HID,
            HostId::Id(v) => v,
        }
    }

    #[inline(always)]
    pub const fn is_recorded(&self) -> bool {
        matches!(self, HostId::Id(_))
    }

    pub fn is_unrecorded(&self) -> bool {
        !self.is_recorded()
    }

    pub const fn get(self) -> Option<u64> {
        match self {
            HostId::Unrecorded => None,
            HostId::Id(v) => Some(v),
        }
    }
}

impl Serialize for HostId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.to_wire())
    }
}

/// One decoded query-log record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryEvent {
    /// Payload length from the frame prefix.
    pub message_length: u64,
    /// Payload bytes exactly as read, prefix excluded.
    #[serde(serialize_with = "serialize_base64")]
    pub raw_message: Vec<u8>,
    pub thread_id: u64,
    pub username: LogText,
    pub schema: LogText,
    pub client_address: LogText,
    #[serde(skip_serializing_if = "HostId::is_unrecorded")]
    pub hid: HostId,
    /// Present iff `hid` is recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_address: Option<LogText>,
    pub start_at: LogTime,
    pub end_at: LogTime,
    /// `end_at - start_at`; negative when the proxy clock went backwards.
    #[serde(serialize_with = "serialize_nanos")]
    pub duration: TimeDelta,
    pub query_digest: String,
    pub query: LogText,
}

impl QueryEvent {
    /// Wire fields of this event, for re-encoding.
    ///
    /// `None` if a timestamp has no UTC instant, or if `query_digest` is not
    /// in the `0x` + 16 hex digit form (never the case for decoded events).
    pub fn to_entry(&self) -> Option<QueryEntry> {
        Some(QueryEntry {
            thread_id: self.thread_id,
            username: self.username.clone(),
            schema: self.schema.clone(),
            client_address: self.client_address.clone(),
            hid: self.hid,
            server_address: self.server_address.clone(),
            start_at: self.start_at.to_datetime()?,
            end_at: self.end_at.to_datetime()?,
            query_digest: parse_digest(&self.query_digest)?,
            query: self.query.clone(),
        })
    }

    /// Pretty JSON, the same rendering `Display` uses.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for QueryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = self.to_json_pretty().map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// Encodable fields of a query-log record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryEntry {
    pub thread_id: u64,
    pub username: LogText,
    pub schema: LogText,
    pub client_address: LogText,
    pub hid: HostId,
    /// Written only when `hid` is recorded; `None` then encodes as empty.
    pub server_address: Option<LogText>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub query_digest: u64,
    pub query: LogText,
}

fn serialize_base64<S: Serializer>(raw: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(raw))
}

fn serialize_nanos<S: Serializer>(d: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
    let nanos = d.num_nanoseconds().unwrap_or(if *d < TimeDelta::zero() {
        i64::MIN
    } else {
        i64::MAX
    });
    serializer.serialize_i64(nanos)
}
