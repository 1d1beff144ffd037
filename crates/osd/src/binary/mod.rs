//! LLSD binary encoding.
//!
//! A document is an optional `"<? llsd/binary ?>"` header line followed by
//! one value. Scalars are a one-byte marker plus a fixed or length-prefixed
//! payload; maps and arrays carry a big-endian element count and a closing
//! marker.

pub mod constants;
pub mod decoder;
pub mod encoder;

pub use decoder::BinaryDecoder;
pub use encoder::{BinaryEncoder, BinaryOptions};

use crate::error::Result;
use crate::Osd;

/// Encodes `value` with the header line.
pub fn serialize(value: &Osd) -> Vec<u8> {
    BinaryEncoder::new().encode(value)
}

pub fn serialize_with(value: &Osd, options: BinaryOptions) -> Vec<u8> {
    BinaryEncoder::with_options(options).encode(value)
}

/// Decodes a binary document, with or without the header line.
pub fn deserialize(data: &[u8]) -> Result<Osd> {
    BinaryDecoder::new().decode(data)
}
