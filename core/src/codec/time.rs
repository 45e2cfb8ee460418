//! codec/time.rs
//!
//! Wire timestamps are unsigned microseconds since the unix epoch. Any
//! value the varint can carry is kept as is; mapping to a calendar instant
//! happens on demand and may be `None` far beyond year 262143.

use std::fmt;
use std::ops::Sub;

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use serde::{Serialize, Serializer};

use crate::codec::types::CodecError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogTime(u64);

impl LogTime {
    pub const UNIX_EPOCH: LogTime = LogTime(0);

    #[inline]
    pub const fn from_micros(micros: u64) -> Self {
        Self(micros)
    }

    #[inline]
    pub const fn as_micros(self) -> u64 {
        self.0
    }

    /// UTC instant, `None` when chrono cannot represent it.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        i64::try_from(self.0)
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_micros)
    }

    /// `self - earlier`, saturating at the i64 microsecond range.
    pub fn signed_since(self, earlier: LogTime) -> TimeDelta {
        let diff = i128::from(self.0) - i128::from(earlier.0);
        let micros = diff.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64;
        TimeDelta::microseconds(micros)
    }
}

impl Sub for LogTime {
    type Output = TimeDelta;

    fn sub(self, rhs: LogTime) -> TimeDelta {
        self.signed_since(rhs)
    }
}

impl TryFrom<DateTime<Utc>> for LogTime {
    type Error = CodecError;

    fn try_from(at: DateTime<Utc>) -> Result<Self, Self::Error> {
        let micros = at.timestamp_micros();
        u64::try_from(micros)
            .map(LogTime)
            .map_err(|_| CodecError::NegativeTimestamp(micros))
    }
}

impl PartialEq<DateTime<Utc>> for LogTime {
    fn eq(&self, other: &DateTime<Utc>) -> bool {
        self.to_datetime().as_ref() == Some(other)
    }
}

impl fmt::Display for LogTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(at) => f.write_str(&at.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            None => write!(f, "{}us", self.0),
        }
    }
}

/// RFC 3339 string when representable, raw microseconds otherwise.
impl Serialize for LogTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.to_datetime() {
            Some(at) => at.serialize(serializer),
            None => serializer.serialize_u64(self.0),
        }
    }
}
