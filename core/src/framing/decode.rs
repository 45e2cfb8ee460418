use std::io::{self, Read};

use byteorder::{ByteOrder, LittleEndian};

use crate::config::DecoderConfig;
use crate::constants::RECORD_LEN_PREFIX;
use crate::framing::types::{FrameError, RecordFrame, RecordView};

/// Pulls length-framed records off a byte source.
///
/// The reader does not look inside payloads. Each payload comes back as
/// its own buffer so the record decoder cannot run into the next record.
#[derive(Debug)]
pub struct RecordReader<R: Read> {
    inner: R,
    config: DecoderConfig,
    offset: u64,
}

impl<R: Read> RecordReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_config(inner, DecoderConfig::default())
    }

    pub fn with_config(inner: R, config: DecoderConfig) -> Self {
        Self { inner, config, offset: 0 }
    }

    /// Stream offset of the next record boundary.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Read the next record.
    ///
    /// - zero bytes at the boundary -> `EndOfStream`
    /// - partial prefix             -> `TruncatedPrefix`
    /// - short payload              -> `TruncatedPayload`
    pub fn frame_next(&mut self) -> Result<RecordFrame, FrameError> {
        let mut prefix = [0u8; RECORD_LEN_PREFIX];
        let got = read_full(&mut self.inner, &mut prefix)?;
        match got {
            0 => return Err(FrameError::EndOfStream),
            RECORD_LEN_PREFIX => {}
            n => {
                return Err(FrameError::TruncatedPrefix {
                    expected: RECORD_LEN_PREFIX,
                    actual: n,
                })
            }
        }

        let declared_len = LittleEndian::read_u64(&prefix);
        check_limit(declared_len, &self.config)?;

        // Grow with the data actually present instead of trusting the
        // declared length for the allocation.
        let mut payload = Vec::new();
        let read = (&mut self.inner).take(declared_len).read_to_end(&mut payload)?;
        if read as u64 != declared_len {
            return Err(FrameError::TruncatedPayload {
                expected: declared_len,
                actual: read as u64,
            });
        }

        self.offset += RECORD_LEN_PREFIX as u64 + declared_len;
        Ok(RecordFrame { declared_len, payload })
    }
}

/// Fill `buf` unless the source runs dry; returns how many bytes landed.
/// Short reads are retried, unlike a single `read` call.
fn read_full<R: Read>(r: &mut R, buf: &mut [u8]) -> Result<usize, io::Error> {
    let mut filled = 0;
    while filled < buf.len() {
        match r.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[inline]
fn check_limit(declared: u64, config: &DecoderConfig) -> Result<(), FrameError> {
    match config.max_payload_len {
        Some(limit) if declared > limit => Err(FrameError::PayloadTooLarge { declared, limit }),
        _ => Ok(()),
    }
}

/// Split the first record off an in-memory buffer.
///
/// Returns the record view and the unread remainder. Same error rules as
/// `RecordReader::frame_next`, without copying the payload.
pub fn split_record<'a>(
    wire: &'a [u8],
    config: &DecoderConfig,
) -> Result<(RecordView<'a>, &'a [u8]), FrameError> {
    if wire.is_empty() {
        return Err(FrameError::EndOfStream);
    }
    if wire.len() < RECORD_LEN_PREFIX {
        return Err(FrameError::TruncatedPrefix {
            expected: RECORD_LEN_PREFIX,
            actual: wire.len(),
        });
    }

    let declared_len = LittleEndian::read_u64(&wire[..RECORD_LEN_PREFIX]);
    check_limit(declared_len, config)?;

    let body = &wire[RECORD_LEN_PREFIX..];
    if declared_len > body.len() as u64 {
        return Err(FrameError::TruncatedPayload {
            expected: declared_len,
            actual: body.len() as u64,
        });
    }

    let (payload, rest) = body.split_at(declared_len as usize);
    Ok((RecordView { declared_len, payload }, rest))
}
