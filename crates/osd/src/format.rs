//! Wire-format detection and dispatch.
//!
//! The first [`PREFIX_LEN`] bytes (or characters) of the input pick the
//! decoder: the binary header and the XML openers are recognised
//! case-insensitively; anything else is tried as JSON, then notation.

use std::fmt;
use std::io::{Read, Seek, SeekFrom};
use std::str::FromStr;

use tracing::debug;

use crate::error::{OsdError, Result};
use crate::{binary, json, notation, xml, Osd};

/// Bytes inspected by [`detect`]; the length of the binary header.
pub const PREFIX_LEN: usize = 17;

pub const BINARY_SIGNATURE: &str = "<? llsd/binary ?>";

pub const XML_SIGNATURES: [&str; 3] = ["<llsd>", "<?xml", "<? llsd/xml ?>"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsdFormat {
    Binary,
    Xml,
    Json,
    Notation,
}

impl OsdFormat {
    pub fn name(self) -> &'static str {
        match self {
            OsdFormat::Binary => "binary",
            OsdFormat::Xml => "xml",
            OsdFormat::Json => "json",
            OsdFormat::Notation => "notation",
        }
    }
}

impl fmt::Display for OsdFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OsdFormat {
    type Err = OsdError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "binary" | "llsd-binary" => Ok(OsdFormat::Binary),
            "xml" | "llsd-xml" => Ok(OsdFormat::Xml),
            "json" => Ok(OsdFormat::Json),
            "notation" | "llsd-notation" => Ok(OsdFormat::Notation),
            other => Err(OsdError::malformed(format!("unknown format {other:?}"))),
        }
    }
}

/// Sniffs the wire format of raw bytes.
///
/// Never returns [`OsdFormat::Notation`]: notation has no signature and is
/// only reached when JSON decoding fails.
pub fn detect(data: &[u8]) -> OsdFormat {
    let prefix = &data[..data.len().min(PREFIX_LEN)];
    let utf8 = String::from_utf8_lossy(prefix);
    let ascii: String = prefix.iter().map(|&b| b as char).collect();
    classify(&utf8, &ascii)
}

/// Sniffs the wire format of text, looking at its first [`PREFIX_LEN`] characters.
pub fn detect_str(text: &str) -> OsdFormat {
    let prefix: String = text.chars().take(PREFIX_LEN).collect();
    classify(&prefix, &prefix)
}

fn classify(utf8: &str, ascii: &str) -> OsdFormat {
    let trimmed = utf8.trim_start_matches(|c: char| c == '\u{feff}' || c.is_whitespace());
    if XML_SIGNATURES
        .iter()
        .any(|sig| starts_with_ignore_case(trimmed, sig))
    {
        OsdFormat::Xml
    } else if starts_with_ignore_case(ascii, BINARY_SIGNATURE) {
        OsdFormat::Binary
    } else if XML_SIGNATURES
        .iter()
        .any(|sig| starts_with_ignore_case(ascii, sig))
    {
        OsdFormat::Xml
    } else {
        OsdFormat::Json
    }
}

fn starts_with_ignore_case(haystack: &str, prefix: &str) -> bool {
    haystack
        .as_bytes()
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix.as_bytes()))
}

/// Detects the format of `data` and decodes it.
///
/// The XML branch is lenient (malformed XML yields `Osd::Undefined`); the
/// other branches report grammar violations.
pub fn deserialize(data: &[u8]) -> Result<Osd> {
    let format = detect(data);
    debug!(%format, len = data.len(), "detected structured data format");
    deserialize_format(data, format)
}

pub fn deserialize_str(text: &str) -> Result<Osd> {
    let format = detect_str(text);
    debug!(%format, len = text.len(), "detected structured data format");
    deserialize_format(text.as_bytes(), format)
}

/// Decodes `data` as `format` without sniffing.
///
/// [`OsdFormat::Json`] falls back to notation when the input is not JSON.
/// If both fail, the JSON error is returned.
pub fn deserialize_format(data: &[u8], format: OsdFormat) -> Result<Osd> {
    match format {
        OsdFormat::Binary => binary::deserialize(data),
        OsdFormat::Xml => Ok(xml::deserialize(data)),
        OsdFormat::Notation => notation::deserialize_bytes(data),
        OsdFormat::Json => match json::deserialize_bytes(data) {
            Ok(value) => Ok(value),
            Err(json_error) => {
                debug!(%json_error, "not JSON, trying notation");
                notation::deserialize_bytes(data).map_err(|_| json_error)
            }
        },
    }
}

/// Detects and decodes a seekable stream.
///
/// The prefix is read from the current position, which must be the start of
/// the document; the stream is then rewound and read to the end.
///
/// # Errors
///
/// [`OsdError::NotSeekable`] if the stream cannot report or restore its
/// position, [`OsdError::UnexpectedEof`] if it is empty.
pub fn deserialize_stream<R: Read + Seek>(stream: &mut R) -> Result<Osd> {
    let start = stream
        .stream_position()
        .map_err(|_| OsdError::NotSeekable)?;
    let mut prefix = [0u8; PREFIX_LEN];
    let mut filled = 0;
    while filled < PREFIX_LEN {
        match stream.read(&mut prefix[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    if filled == 0 {
        return Err(OsdError::UnexpectedEof);
    }
    let format = detect(&prefix[..filled]);
    stream
        .seek(SeekFrom::Start(start))
        .map_err(|_| OsdError::NotSeekable)?;
    let mut data = Vec::new();
    stream.read_to_end(&mut data)?;
    debug!(%format, len = data.len(), "detected structured data format");
    deserialize_format(&data, format)
}

/// Buffers a non-seekable reader completely, then detects and decodes it.
pub fn deserialize_reader<R: Read>(reader: &mut R) -> Result<Osd> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    if data.is_empty() {
        return Err(OsdError::UnexpectedEof);
    }
    deserialize(&data)
}

/// Encodes `value` in `format` with each codec's default options.
pub fn serialize(value: &Osd, format: OsdFormat) -> Vec<u8> {
    match format {
        OsdFormat::Binary => binary::serialize(value),
        OsdFormat::Xml => xml::serialize(value).into_bytes(),
        OsdFormat::Json => json::serialize(value).into_bytes(),
        OsdFormat::Notation => notation::serialize(value).into_bytes(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_binary_header() {
        let mut data = BINARY_SIGNATURE.as_bytes().to_vec();
        data.extend_from_slice(&[b'\n', b'i', 0, 0, 0, 7]);
        assert_eq!(detect(&data), OsdFormat::Binary);
        assert_eq!(detect(b"<? LLSD/BINARY ?>"), OsdFormat::Binary);
    }

    #[test]
    fn sniffs_xml_after_bom_and_whitespace() {
        let text = "\u{FEFF}  <?xml version=\"1.0\"?><llsd><undef /></llsd>";
        assert_eq!(detect_str(text), OsdFormat::Xml);
        assert_eq!(detect(text.as_bytes()), OsdFormat::Xml);
        assert_eq!(detect(b"<LLSD><undef/></LLSD>"), OsdFormat::Xml);
        assert_eq!(detect(b"<? llsd/xml ?>"), OsdFormat::Xml);
    }

    #[test]
    fn everything_else_is_json() {
        assert_eq!(detect(b"{}"), OsdFormat::Json);
        assert_eq!(detect(b"[i1,i2]"), OsdFormat::Json);
        assert_eq!(detect(b""), OsdFormat::Json);
    }

    #[test]
    fn format_names_parse_back() {
        for format in [
            OsdFormat::Binary,
            OsdFormat::Xml,
            OsdFormat::Json,
            OsdFormat::Notation,
        ] {
            assert_eq!(format.to_string().parse::<OsdFormat>().unwrap(), format);
        }
        assert!("yaml".parse::<OsdFormat>().is_err());
    }
}
