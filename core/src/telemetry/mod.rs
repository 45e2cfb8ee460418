//! telemetry/mod.rs
//! Counters, stage timers and immutable snapshots for decode runs.

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;
