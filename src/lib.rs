//! slotframe: positional JSON-array schema codec
//!
//! This crate converts typed records into JSON arrays whose slot order is
//! set by explicit position annotations rather than field declaration
//! order, and wraps those arrays in length-prefixed frames that can be
//! concatenated into a marker-led stream.
//!
//! # Frame Format
//!
//! ```text
//! <decimal-length>\r\n      length of <json-array>\r\n in bytes
//! <json-array>\r\n
//! ```
//!
//! # Stream Format
//!
//! ```text
//! <marker>\r\n              opaque, e.g. )]}'
//! \r\n
//! <frame-1><frame-2>...
//! ```
//!
//! # Features
//!
//! - Position-ordered encoding with `null` gap filling
//! - Recursive nested records with a depth guard
//! - Lenient scalar coercion on decode; short or padded arrays are fine
//! - CRLF framing that also accepts bare LF input
//! - Schema-free [`DynamicSchema`] for untyped payloads
//!
//! # Example
//!
//! ```rust
//! use slotframe::*;
//!
//! positional! {
//!     #[derive(Debug, Default, PartialEq)]
//!     pub struct Quote {
//!         #[position = 2]
//!         pub symbol: String,
//!         #[position = 1]
//!         pub price: f64,
//!         #[position = 4]
//!         pub level: u8,
//!     }
//! }
//!
//! let quote = Quote { symbol: "AAPL".into(), price: 189.5, level: 1 };
//! let bytes = encode_record(&quote)?;
//! assert_eq!(bytes, b"23\r\n[189.5,\"AAPL\",null,1]\r\n");
//!
//! let decoded: Quote = decode_record(&bytes)?;
//! assert_eq!(decoded, quote);
//! # Ok::<(), slotframe::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod decoder;
pub mod dynamic;
pub mod encoder;
pub mod error;
pub mod field;
pub mod frame;
pub mod position;
pub mod stream;
pub mod value;

// Re-export main types
pub use decoder::{array_to_record, record_from_value, SlotReader};
pub use dynamic::DynamicSchema;
pub use encoder::{record_to_array, SlotWriter};
pub use error::{Error, ErrorKind, Result};
pub use field::Field;
pub use frame::Frame;
pub use position::{FieldMut, FieldRef, Record};
pub use stream::{build_stream, parse_stream, Stream};
pub use value::Value;

/// Line terminator written by every encoder
pub const CRLF: &[u8] = b"\r\n";

/// Fallback line terminator accepted by decoders
pub const LF: &[u8] = b"\n";

/// Bytes of terminator counted in a frame's declared size
pub const TERMINATOR_LEN: usize = 2;

/// Conventional anti-hijacking stream marker
pub const DEFAULT_MARKER: &[u8] = b")]}'";

/// Maximum record nesting depth
pub const MAX_DEPTH: usize = 64;

/// Minimum line count of a frame (size line and payload line)
pub const MIN_FRAME_LINES: usize = 2;

/// Minimum line count of a stream (marker, separator, one more line)
pub const MIN_STREAM_LINES: usize = 3;

/// Encode a record as a single frame
pub fn encode_record<R: Record>(record: &R) -> Result<Vec<u8>> {
    frame::encode_values(&record_to_array(record)?)
}

/// Decode a single frame into a record
pub fn decode_record<R: Record>(data: &[u8]) -> Result<R> {
    array_to_record(&frame::unwrap(data)?)
}

/// Encode a record as an array [`Value`]
pub fn to_value<R: Record>(record: &R) -> Result<Value> {
    encoder::record_to_value(record, 0)
}

/// Decode an array [`Value`] into a record
pub fn from_value<R: Record>(value: &Value) -> Result<R> {
    record_from_value(value)
}

/// Encode ordered untyped values as a single frame
pub fn encode_dynamic(values: &[Value]) -> Result<Vec<u8>> {
    frame::encode_values(values)
}

/// Decode ordered untyped values
///
/// With `framed` set the input must carry the size line; otherwise it is a
/// bare JSON array.
pub fn decode_dynamic(data: &[u8], framed: bool) -> Result<Vec<Value>> {
    DynamicSchema::decode(data, framed).map(DynamicSchema::into_values)
}

/// Encode a marker and frame payloads as a stream
pub fn encode_stream(marker: &[u8], frames: &[Vec<Value>]) -> Result<Vec<u8>> {
    build_stream(marker, frames)
}

/// Decode a stream into its marker and frame payloads
pub fn decode_stream(data: &[u8]) -> Result<(Vec<u8>, Vec<Vec<Value>>)> {
    parse_stream(data).map(Stream::into_parts)
}
