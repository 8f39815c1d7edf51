//! Error types for the slotframe codec

use thiserror::Error;

/// Broad classification of a codec failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed framing, size line, stream layout or JSON text
    Format,
    /// Declared frame length disagrees with the payload
    SizeMismatch,
    /// Slot content has the wrong structure for the target field
    Shape,
    /// Target field type has no coercion rule
    UnsupportedType,
    /// Decode target is not record-shaped
    TargetKind,
    /// Nesting limit exceeded
    Structure,
}

/// Errors that can occur during record, frame or stream encoding and decoding
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input has fewer lines than the layout requires
    #[error("invalid format: expected at least {minimum} lines, found {found}")]
    TooFewLines {
        /// Minimum number of lines required
        minimum: usize,
        /// Number of lines present
        found: usize,
    },

    /// Size line is not a non-negative decimal integer
    #[error("invalid size format: {line:?}")]
    InvalidSize {
        /// The offending size line, trimmed
        line: String,
    },

    /// JSON text could not be parsed or produced
    #[error("invalid JSON: {message}")]
    Json {
        /// Message reported by the JSON parser
        message: String,
    },

    /// JSON value has no slot representation
    #[error("unsupported JSON value: {found}")]
    UnsupportedJson {
        /// Kind of the rejected value
        found: &'static str,
    },

    /// Declared frame size does not match the payload
    #[error("data size mismatch: expected {declared}, got {actual}")]
    SizeMismatch {
        /// Size carried on the length line
        declared: usize,
        /// Payload length plus terminator
        actual: usize,
    },

    /// A nested-record field received a non-array slot
    #[error("expected array for record field {field}, got {found}")]
    Shape {
        /// Field being decoded
        field: &'static str,
        /// Kind of the value found in the slot
        found: &'static str,
    },

    /// Field type cannot be coerced from a slot value
    #[error("unsupported field type for {field}: {type_name}")]
    UnsupportedType {
        /// Field being decoded
        field: &'static str,
        /// Rust type of the field
        type_name: &'static str,
    },

    /// Decode target was handed a value that is not an array
    #[error("decode target must be record-shaped, got {found}")]
    TargetKind {
        /// Kind of the value offered as a record
        found: &'static str,
    },

    /// Record nesting deeper than the configured limit
    #[error("record nesting exceeds {limit} levels")]
    DepthExceeded {
        /// Maximum nesting depth
        limit: usize,
    },

    /// A frame inside a stream failed to decode
    #[error("failed to parse schema at line {line}: {source}")]
    StreamFrame {
        /// Line index of the frame's size line
        line: usize,
        /// Underlying frame failure
        source: Box<Error>,
    },
}

impl Error {
    /// Returns the classification of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::TooFewLines { .. }
            | Error::InvalidSize { .. }
            | Error::Json { .. }
            | Error::UnsupportedJson { .. } => ErrorKind::Format,
            Error::SizeMismatch { .. } => ErrorKind::SizeMismatch,
            Error::Shape { .. } => ErrorKind::Shape,
            Error::UnsupportedType { .. } => ErrorKind::UnsupportedType,
            Error::TargetKind { .. } => ErrorKind::TargetKind,
            Error::DepthExceeded { .. } => ErrorKind::Structure,
            Error::StreamFrame { source, .. } => source.kind(),
        }
    }

    pub(crate) fn stream_frame(line: usize, source: Error) -> Self {
        Error::StreamFrame {
            line,
            source: Box::new(source),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
        }
    }
}

/// Result type alias for slotframe operations
pub type Result<T> = core::result::Result<T, Error>;
