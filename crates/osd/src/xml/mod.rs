//! LLSD XML encoding.
//!
//! Two decoding tiers are exposed:
//!
//! - `try_deserialize*`: strict; grammar violations return
//!   [`OsdError::Malformed`](crate::OsdError::Malformed).
//! - `deserialize*`: lenient; any failure is logged at `warn` level and
//!   replaced by `Osd::Undefined`, so malformed input is indistinguishable
//!   from an empty document. Existing callers rely on this.

pub mod decoder;
pub mod encoder;
pub mod reader;

pub use decoder::{parse_document, parse_element};
pub use encoder::{XmlEncoder, XmlOptions};
pub use reader::{NodeType, QuickXmlReader, XmlNodeReader};

use tracing::warn;

use crate::error::Result;
use crate::Osd;

pub fn serialize(value: &Osd) -> String {
    XmlEncoder::new().encode(value)
}

pub fn serialize_with(value: &Osd, options: XmlOptions) -> String {
    XmlEncoder::with_options(options).encode(value)
}

pub fn try_deserialize(data: &[u8]) -> Result<Osd> {
    parse_document(&mut QuickXmlReader::new(data))
}

pub fn try_deserialize_str(text: &str) -> Result<Osd> {
    try_deserialize(text.as_bytes())
}

/// Parses from a reader positioned before the `<llsd>` element.
pub fn try_deserialize_reader<R: XmlNodeReader + ?Sized>(reader: &mut R) -> Result<Osd> {
    parse_document(reader)
}

/// Lenient: returns `Osd::Undefined` for malformed input.
pub fn deserialize(data: &[u8]) -> Osd {
    lenient(try_deserialize(data))
}

/// Lenient: returns `Osd::Undefined` for malformed input.
pub fn deserialize_str(text: &str) -> Osd {
    lenient(try_deserialize_str(text))
}

/// Lenient: returns `Osd::Undefined` for malformed input.
pub fn deserialize_reader<R: XmlNodeReader + ?Sized>(reader: &mut R) -> Osd {
    lenient(try_deserialize_reader(reader))
}

fn lenient(result: Result<Osd>) -> Osd {
    result.unwrap_or_else(|error| {
        warn!(%error, "discarding malformed LLSD XML document");
        Osd::Undefined
    })
}
