//! Length-prefixed JSON frames
//!
//! ```text
//! <decimal-length>\r\n
//! <json-array>\r\n
//! ```
//!
//! The declared length counts the JSON payload plus its trailing CRLF, but
//! not the length line itself. Decoding also accepts bare `\n` endings.

use crate::error::{Error, Result};
use crate::value::Value;
use crate::{CRLF, LF, MIN_FRAME_LINES, TERMINATOR_LEN};

/// A single decoded frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    declared_size: usize,
    payload: String,
}

impl Frame {
    /// Create a frame around a JSON payload
    ///
    /// Surrounding whitespace is dropped, matching what [`Frame::parse`]
    /// reads back. A payload spanning several lines cannot be framed.
    pub fn new(payload: impl Into<String>) -> Result<Self> {
        let mut payload = payload.into();
        if payload.contains(['\r', '\n']) {
            return Err(Error::Json {
                message: "frame payload must fit on one line".into(),
            });
        }

        let trimmed = payload.trim();
        if trimmed.len() != payload.len() {
            payload = trimmed.to_owned();
        }
        Ok(Self {
            declared_size: payload.len() + TERMINATOR_LEN,
            payload,
        })
    }

    /// Create a frame holding the compact JSON form of `values`
    pub fn from_values(values: &[Value]) -> Result<Self> {
        Self::new(Value::array_to_json(values)?)
    }

    /// Parse the envelope and validate the declared size
    ///
    /// The payload is not parsed as JSON here; see [`Frame::values`].
    pub fn parse(data: &[u8]) -> Result<Self> {
        let (lines, _) = split_lines(data, MIN_FRAME_LINES)?;

        let size_line = utf8(lines[0])?.trim();
        let declared_size: usize = size_line.parse().map_err(|_| Error::InvalidSize {
            line: size_line.to_owned(),
        })?;

        let payload = utf8(lines[1])?.trim();
        let actual_size = payload.len() + TERMINATOR_LEN;
        if actual_size != declared_size {
            return Err(Error::SizeMismatch {
                declared: declared_size,
                actual: actual_size,
            });
        }

        Ok(Self {
            declared_size,
            payload: payload.to_owned(),
        })
    }

    /// Declared size: payload length plus terminator
    #[inline]
    pub fn declared_size(&self) -> usize {
        self.declared_size
    }

    /// JSON payload text, without terminator
    #[inline]
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Parse the payload as a JSON array
    pub fn values(&self) -> Result<Vec<Value>> {
        Value::parse_array(&self.payload)
    }

    /// Wire bytes of this frame
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.write_to(&mut out);
        out
    }

    /// Append the wire bytes of this frame to `out`
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.declared_size.to_string().as_bytes());
        out.extend_from_slice(CRLF);
        out.extend_from_slice(self.payload.as_bytes());
        out.extend_from_slice(CRLF);
    }

    /// Total wire size including the length line
    #[inline]
    pub fn encoded_len(&self) -> usize {
        decimal_len(self.declared_size) + TERMINATOR_LEN + self.declared_size
    }
}

/// Wrap raw JSON bytes in a frame envelope
pub fn wrap(json: &[u8]) -> Vec<u8> {
    let size = json.len() + TERMINATOR_LEN;
    let mut out = Vec::with_capacity(decimal_len(size) + TERMINATOR_LEN + size);
    out.extend_from_slice(size.to_string().as_bytes());
    out.extend_from_slice(CRLF);
    out.extend_from_slice(json);
    out.extend_from_slice(CRLF);
    out
}

/// Unwrap a frame and parse its payload as a JSON array
pub fn unwrap(data: &[u8]) -> Result<Vec<Value>> {
    let frame = Frame::parse(data)?;
    tracing::trace!(size = frame.declared_size(), "unwrapped frame");
    frame.values()
}

/// Encode slot values as a complete frame
pub fn encode_values(values: &[Value]) -> Result<Vec<u8>> {
    Ok(wrap(Value::array_to_json(values)?.as_bytes()))
}

/// Split on CRLF, falling back to LF when CRLF yields fewer than `minimum`
/// segments. Returns the segments and the terminator that produced them.
pub(crate) fn split_lines(data: &[u8], minimum: usize) -> Result<(Vec<&[u8]>, &'static [u8])> {
    let lines = split_on(data, CRLF);
    if lines.len() >= minimum {
        return Ok((lines, CRLF));
    }

    let lines = split_on(data, LF);
    if lines.len() >= minimum {
        return Ok((lines, LF));
    }

    Err(Error::TooFewLines {
        minimum,
        found: lines.len(),
    })
}

fn split_on<'a>(data: &'a [u8], sep: &[u8]) -> Vec<&'a [u8]> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut pos = 0;
    while pos + sep.len() <= data.len() {
        if &data[pos..pos + sep.len()] == sep {
            parts.push(&data[start..pos]);
            pos += sep.len();
            start = pos;
        } else {
            pos += 1;
        }
    }
    parts.push(&data[start..]);
    parts
}

fn utf8(line: &[u8]) -> Result<&str> {
    core::str::from_utf8(line).map_err(|e| Error::Json {
        message: format!("frame is not valid UTF-8: {e}"),
    })
}

#[inline]
fn decimal_len(mut n: usize) -> usize {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}
