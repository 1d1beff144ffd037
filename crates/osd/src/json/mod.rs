//! JSON encoding.
//!
//! JSON has no room for LLSD's richer scalar types, so UUIDs, dates and URIs
//! are written as strings and binary data as an array of byte values (which
//! [`Osd::as_binary`] turns back into bytes). NaN and infinities become
//! `null`.

pub mod convert;

use crate::error::{OsdError, Result};
use crate::Osd;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonOptions {
    pub pretty: bool,
}

pub fn serialize(value: &Osd) -> String {
    serialize_with(value, JsonOptions::default())
}

pub fn serialize_with(value: &Osd, options: JsonOptions) -> String {
    let json = serde_json::Value::from(value);
    if options.pretty {
        format!("{json:#}")
    } else {
        json.to_string()
    }
}

pub fn deserialize(text: &str) -> Result<Osd> {
    deserialize_bytes(text.as_bytes())
}

/// A leading UTF-8 byte-order mark is ignored.
pub fn deserialize_bytes(data: &[u8]) -> Result<Osd> {
    let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
    let json: serde_json::Value = serde_json::from_slice(data)
        .map_err(|e| OsdError::malformed(format!("invalid JSON: {e}")))?;
    Ok(Osd::from(json))
}
