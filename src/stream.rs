//! Multi-frame streams
//!
//! ```text
//! <marker>\r\n
//! \r\n
//! <frame-1>
//! <frame-2>
//! ...
//! ```
//!
//! The marker line is opaque and kept verbatim. A stream with no frames is
//! valid. The whole buffer is parsed at once.

use crate::decoder::array_to_record;
use crate::encoder::record_to_array;
use crate::error::{Error, Result};
use crate::frame::{self, split_lines, Frame};
use crate::position::Record;
use crate::value::Value;
use crate::{CRLF, MIN_STREAM_LINES};

/// A marker followed by decoded frame payloads
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stream {
    marker: Vec<u8>,
    frames: Vec<Vec<Value>>,
}

impl Stream {
    /// Create an empty stream with the given marker
    #[inline]
    pub fn new(marker: impl Into<Vec<u8>>) -> Self {
        Self {
            marker: marker.into(),
            frames: Vec::new(),
        }
    }

    /// Create a stream from a marker and frame payloads
    #[inline]
    pub fn with_frames(marker: impl Into<Vec<u8>>, frames: Vec<Vec<Value>>) -> Self {
        Self {
            marker: marker.into(),
            frames,
        }
    }

    /// Marker line bytes
    #[inline]
    pub fn marker(&self) -> &[u8] {
        &self.marker
    }

    /// Decoded frame payloads in stream order
    #[inline]
    pub fn frames(&self) -> &[Vec<Value>] {
        &self.frames
    }

    /// Number of frames
    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True when the stream carries no frames
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Append a frame payload
    #[inline]
    pub fn push(&mut self, values: Vec<Value>) {
        self.frames.push(values);
    }

    /// Append a record as a frame payload
    pub fn push_record<R: Record>(&mut self, record: &R) -> Result<()> {
        self.frames.push(record_to_array(record)?);
        Ok(())
    }

    /// Decode every frame into a record of type `R`
    pub fn records<R: Record>(&self) -> Result<Vec<R>> {
        self.frames
            .iter()
            .map(|values| array_to_record(values))
            .collect()
    }

    /// Split into marker and frames
    #[inline]
    pub fn into_parts(self) -> (Vec<u8>, Vec<Vec<Value>>) {
        (self.marker, self.frames)
    }

    /// Parse a complete stream buffer
    pub fn parse(data: &[u8]) -> Result<Self> {
        parse_stream(data)
    }

    /// Wire bytes of this stream
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        build_stream(&self.marker, &self.frames)
    }
}

/// Parse a marker line, a blank separator and zero or more frames
///
/// Blank lines between frames are skipped. A failing frame aborts the parse
/// with [`Error::StreamFrame`] carrying the line index of its size line.
pub fn parse_stream(data: &[u8]) -> Result<Stream> {
    let (lines, terminator) = split_lines(data, MIN_STREAM_LINES)?;

    let marker = lines[0].to_vec();
    let mut frames = Vec::new();

    // Line 1 is the mandatory blank separator.
    let mut line = 2;
    while line + 1 < lines.len() {
        if is_blank(lines[line]) {
            line += 1;
            continue;
        }

        let mut joined = Vec::with_capacity(
            lines[line].len() + lines[line + 1].len() + 2 * terminator.len(),
        );
        joined.extend_from_slice(lines[line]);
        joined.extend_from_slice(terminator);
        joined.extend_from_slice(lines[line + 1]);
        joined.extend_from_slice(terminator);

        let values = frame::unwrap(&joined).map_err(|e| Error::stream_frame(line, e))?;
        frames.push(values);
        line += 2;
    }

    tracing::debug!(
        marker_len = marker.len(),
        frames = frames.len(),
        "parsed stream"
    );
    Ok(Stream { marker, frames })
}

/// Serialize a marker and frame payloads
pub fn build_stream(marker: &[u8], frames: &[Vec<Value>]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(marker.len() + 2 * CRLF.len());
    out.extend_from_slice(marker);
    out.extend_from_slice(CRLF);
    out.extend_from_slice(CRLF);

    for values in frames {
        Frame::from_values(values)?.write_to(&mut out);
    }

    tracing::debug!(frames = frames.len(), bytes = out.len(), "built stream");
    Ok(out)
}

#[inline]
fn is_blank(line: &[u8]) -> bool {
    line.iter().all(u8::is_ascii_whitespace)
}
