use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::DecodeCounters;
use crate::telemetry::timers::{StageTimes, TelemetryTimer};

/// Immutable summary of a decode run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub records: u64,
    pub records_unrouted: u64,
    pub bytes_payload: u64,
    pub bytes_framing: u64,
    pub records_per_sec: f64,
    pub bytes_per_sec: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
}

impl TelemetrySnapshot {
    pub fn from(counters: &DecodeCounters, timer: &TelemetryTimer) -> Self {
        let elapsed = timer.elapsed();
        let secs = elapsed.as_secs_f64();

        let (records_per_sec, bytes_per_sec) = if secs > 0.0 {
            (
                counters.records as f64 / secs,
                counters.bytes_total() as f64 / secs,
            )
        } else {
            (0.0, 0.0)
        };

        Self {
            records: counters.records,
            records_unrouted: counters.records_unrouted,
            bytes_payload: counters.bytes_payload,
            bytes_framing: counters.bytes_framing,
            records_per_sec,
            bytes_per_sec,
            elapsed,
            stage_times: timer.stage_times.clone(),
        }
    }

    pub fn bytes_total(&self) -> u64 {
        self.bytes_payload + self.bytes_framing
    }

    /// Stage times can never exceed wall time.
    pub fn sanity_check(&self) -> bool {
        self.stage_times.total() <= self.elapsed && self.records_unrouted <= self.records
    }
}
