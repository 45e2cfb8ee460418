use std::fmt;
use std::io;

use thiserror::Error;

use crate::codec::CodecError;
use crate::framing::FrameError;

/// Payload fields in wire order, used to say which one failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Marker,
    ThreadId,
    Username,
    Schema,
    ClientAddress,
    Hid,
    ServerAddress,
    StartAt,
    EndAt,
    QueryDigest,
    Query,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Marker        => "marker",
            Field::ThreadId      => "thread_id",
            Field::Username      => "username",
            Field::Schema        => "schema",
            Field::ClientAddress => "client_address",
            Field::Hid           => "hid",
            Field::ServerAddress => "server_address",
            Field::StartAt       => "start_at",
            Field::EndAt         => "end_at",
            Field::QueryDigest   => "query_digest",
            Field::Query         => "query",
        };
        f.write_str(name)
    }
}

/// Coarse classification callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Clean end of input at a record boundary.
    EndOfStream,
    /// Fewer bytes than a field or frame declared.
    TruncatedInput,
    /// Bytes present but violating the format.
    InvalidEncoding,
    /// The byte source itself failed.
    Io,
}

/// Unified decode error covering framing and field decoding.
/// `From` impls let `?` cross layers.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error("not a valid query log entry: marker byte 0x{marker:02X}")]
    NotQueryLog { marker: u8 },

    #[error("failed to decode {field}: {source}")]
    Field {
        field: Field,
        #[source]
        source: CodecError,
    },
}

impl DecodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::Frame(FrameError::EndOfStream) => ErrorKind::EndOfStream,
            DecodeError::Frame(FrameError::TruncatedPrefix { .. })
            | DecodeError::Frame(FrameError::TruncatedPayload { .. }) => ErrorKind::TruncatedInput,
            DecodeError::Frame(FrameError::PayloadTooLarge { .. }) => ErrorKind::InvalidEncoding,
            DecodeError::Frame(FrameError::Io(_)) => ErrorKind::Io,
            DecodeError::NotQueryLog { .. } => ErrorKind::InvalidEncoding,
            DecodeError::Field { source, .. } => match source {
                CodecError::Truncated { .. } => ErrorKind::TruncatedInput,
                CodecError::ReservedDiscriminator(_) | CodecError::NegativeTimestamp(_) => {
                    ErrorKind::InvalidEncoding
                }
            },
        }
    }

    pub fn is_end_of_stream(&self) -> bool {
        self.kind() == ErrorKind::EndOfStream
    }

    /// The failing payload field, if the error came from field decoding.
    pub fn field(&self) -> Option<Field> {
        match self {
            DecodeError::Field { field, .. } => Some(*field),
            DecodeError::NotQueryLog { .. } => Some(Field::Marker),
            DecodeError::Frame(_) => None,
        }
    }

    /// `(expected, actual)` byte counts for truncation errors.
    pub fn byte_counts(&self) -> Option<(u64, u64)> {
        match self {
            DecodeError::Frame(FrameError::TruncatedPrefix { expected, actual }) => {
                Some((*expected as u64, *actual as u64))
            }
            DecodeError::Frame(FrameError::TruncatedPayload { expected, actual })
            | DecodeError::Field {
                source: CodecError::Truncated { expected, actual },
                ..
            } => Some((*expected, *actual)),
            _ => None,
        }
    }
}

impl From<io::Error> for DecodeError {
    fn from(e: io::Error) -> Self {
        DecodeError::Frame(FrameError::Io(e))
    }
}

/// Attach the field name to a codec failure.
pub(crate) trait AtField<T> {
    fn at(self, field: Field) -> Result<T, DecodeError>;
}

impl<T> AtField<T> for Result<T, CodecError> {
    #[inline]
    fn at(self, field: Field) -> Result<T, DecodeError> {
        self.map_err(|source| DecodeError::Field { field, source })
    }
}
