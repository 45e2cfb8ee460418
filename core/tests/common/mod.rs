//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::io::{self, Read};

use chrono::{DateTime, Utc};
use pxld_core::record::{HostId, QueryEntry};

/// Microseconds of 2019-04-10T08:08:00.727354Z.
pub const SAMPLE_MICROS: i64 = 1_554_883_680_727_354;

/// One complete record as the proxy writes it: 8-byte prefix + 0x5C payload.
pub fn sample_record() -> Vec<u8> {
    let mut wire = vec![0x5C, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
    wire.extend_from_slice(&sample_payload());
    wire
}

pub fn sample_payload() -> Vec<u8> {
    let mut p = vec![0x00, 0x15];
    p.push(0x06);
    p.extend_from_slice(b"didasy");
    p.push(0x04);
    p.extend_from_slice(b"test");
    p.push(0x0F);
    p.extend_from_slice(b"127.0.0.1:33680");
    p.push(0x01);
    p.push(0x0E);
    p.extend_from_slice(b"127.0.0.1:3306");
    // start_at, end_at
    p.extend_from_slice(&[0xFE, 0x3A, 0xF1, 0x74, 0x91, 0x28, 0x86, 0x05, 0x00]);
    p.extend_from_slice(&[0xFE, 0x3A, 0xF1, 0x74, 0x91, 0x28, 0x86, 0x05, 0x00]);
    // digest
    p.extend_from_slice(&[0xFE, 0xB3, 0x13, 0x6F, 0x42, 0x38, 0xDF, 0x1D, 0x37]);
    p.push(0x12);
    p.extend_from_slice(b"select * from test");
    p
}

pub fn at_micros(micros: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_micros(micros).unwrap()
}

pub fn entry(thread_id: u64, query: &str) -> QueryEntry {
    QueryEntry {
        thread_id,
        username: "app".into(),
        schema: "orders".into(),
        client_address: "10.0.0.7:51544".into(),
        hid: HostId::Id(2),
        server_address: Some("10.0.1.3:3306".into()),
        start_at: at_micros(SAMPLE_MICROS),
        end_at: at_micros(SAMPLE_MICROS + 1_250),
        query_digest: 0x0123_4567_89AB_CDEF,
        query: query.into(),
    }
}

/// Reader that hands out at most `chunk` bytes per call.
pub struct TrickleReader {
    data: Vec<u8>,
    pos: usize,
    chunk: usize,
}

impl TrickleReader {
    pub fn new(data: Vec<u8>, chunk: usize) -> Self {
        Self { data, pos: 0, chunk }
    }
}

impl Read for TrickleReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.chunk.min(buf.len()).min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// Reader that errors once its data is used up, instead of reporting EOF.
pub struct FailingReader {
    data: Vec<u8>,
    pos: usize,
}

impl FailingReader {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data, pos: 0 }
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pos == self.data.len() {
            return Err(io::Error::new(io::ErrorKind::ConnectionReset, "source went away"));
        }
        let n = buf.len().min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}
