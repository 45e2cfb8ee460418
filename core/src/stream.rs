//! stream.rs
//!
//! Stream decoding: frame, decode, repeat until a clean end of input.
//!
//! Design notes:
//! - `QueryLogReader` is the lazy form; every other entry point drives it.
//! - Only `EndOfStream` at a record boundary ends a stream successfully.
//!   Anything else stops the run and is reported once.
//! - The reader is fused: after an error or the end of input it yields
//!   nothing more.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::config::DecoderConfig;
use crate::framing::{split_record, FrameError, RecordReader};
use crate::record::{decode_record, QueryEvent};
use crate::telemetry::{DecodeCounters, Stage, TelemetrySnapshot, TelemetryTimer};
use crate::types::DecodeError;

/// Lazy decoder over a byte source.
#[derive(Debug)]
pub struct QueryLogReader<R: Read> {
    frames: RecordReader<R>,
    counters: DecodeCounters,
    timer: TelemetryTimer,
    done: bool,
}

impl<R: Read> QueryLogReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_config(inner, DecoderConfig::default())
    }

    pub fn with_config(inner: R, config: DecoderConfig) -> Self {
        Self {
            frames: RecordReader::with_config(inner, config),
            counters: DecodeCounters::default(),
            timer: TelemetryTimer::new(),
            done: false,
        }
    }

    /// Stream offset of the next undecoded record.
    pub fn offset(&self) -> u64 {
        self.frames.offset()
    }

    pub fn telemetry(&self) -> TelemetrySnapshot {
        TelemetrySnapshot::from(&self.counters, &self.timer)
    }

    pub fn is_finished(&self) -> bool {
        self.done
    }

    fn finish(&mut self) {
        self.done = true;
        self.timer.finish();
    }
}

impl<R: Read> Iterator for QueryLogReader<R> {
    type Item = Result<QueryEvent, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let frames = &mut self.frames;
        let frame = match self.timer.time(Stage::Frame, || frames.frame_next()) {
            Ok(frame) => frame,
            Err(FrameError::EndOfStream) => {
                self.finish();
                return None;
            }
            Err(e) => {
                self.finish();
                return Some(Err(e.into()));
            }
        };

        match self.timer.time(Stage::Decode, || decode_record(&frame.payload)) {
            Ok(event) => {
                self.counters.add_event(&event);
                Some(Ok(event))
            }
            Err(e) => {
                self.finish();
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> std::iter::FusedIterator for QueryLogReader<R> {}

/// Result of a run that keeps whatever decoded before a failure.
#[derive(Debug)]
pub struct PartialDecode {
    pub events: Vec<QueryEvent>,
    /// The failure that stopped the run, `None` on a clean end of input.
    pub error: Option<DecodeError>,
    pub telemetry: TelemetrySnapshot,
}

impl PartialDecode {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Strict view: the events on a clean run, the error otherwise.
    pub fn into_result(self) -> Result<Vec<QueryEvent>, DecodeError> {
        match self.error {
            None => Ok(self.events),
            Some(e) => Err(e),
        }
    }
}

/// Decode every record until a clean end of input.
///
/// Any other failure is returned and the events decoded before it are
/// dropped; use `decode_stream_partial` to keep them.
pub fn decode_stream<R: Read>(reader: R) -> Result<Vec<QueryEvent>, DecodeError> {
    decode_stream_with(reader, DecoderConfig::default())
}

pub fn decode_stream_with<R: Read>(
    reader: R,
    config: DecoderConfig,
) -> Result<Vec<QueryEvent>, DecodeError> {
    QueryLogReader::with_config(reader, config).collect()
}

/// Decode until the end of input or the first failure, keeping the events
/// decoded so far either way.
pub fn decode_stream_partial<R: Read>(reader: R, config: DecoderConfig) -> PartialDecode {
    let mut it = QueryLogReader::with_config(reader, config);
    let mut events = Vec::new();
    let mut error = None;

    for item in it.by_ref() {
        match item {
            Ok(event) => events.push(event),
            Err(e) => error = Some(e),
        }
    }

    PartialDecode {
        events,
        error,
        telemetry: it.telemetry(),
    }
}

/// Open `path` read-only and decode it completely.
pub fn decode_file(path: impl AsRef<Path>) -> Result<Vec<QueryEvent>, DecodeError> {
    decode_file_with(path, DecoderConfig::default())
}

pub fn decode_file_with(
    path: impl AsRef<Path>,
    config: DecoderConfig,
) -> Result<Vec<QueryEvent>, DecodeError> {
    let file = File::open(path)?;
    decode_stream_with(BufReader::new(file), config)
}

/// Decode an in-memory log without copying frames out of it first.
pub fn decode_slice(wire: &[u8], config: &DecoderConfig) -> Result<Vec<QueryEvent>, DecodeError> {
    let mut events = Vec::new();
    let mut rest = wire;

    loop {
        let (view, tail) = match split_record(rest, config) {
            Ok(split) => split,
            Err(FrameError::EndOfStream) => return Ok(events),
            Err(e) => return Err(e.into()),
        };
        events.push(decode_record(view.payload)?);
        rest = tail;
    }
}
