//! Strict LLSD XML parser.
//!
//! Every function here fails with [`OsdError::Malformed`] on a grammar
//! violation. The lenient entry points in [`crate::xml`] wrap these.

use base64::prelude::*;
use tracing::trace;

use super::reader::{NodeType, XmlNodeReader};
use crate::error::{OsdError, Result};
use crate::{parse, Osd, OsdArray, OsdMap, MAX_DEPTH};

/// Parses a whole `<llsd>…</llsd>` document from a fresh reader.
pub fn parse_document<R: XmlNodeReader + ?Sized>(reader: &mut R) -> Result<Osd> {
    loop {
        if !reader.read()? {
            return Err(OsdError::malformed("missing <llsd> element"));
        }
        if reader.node_type() == NodeType::Element {
            break;
        }
    }
    if reader.local_name() != "llsd" {
        return Err(OsdError::malformed(format!(
            "expected <llsd>, found <{}>",
            reader.local_name()
        )));
    }
    if reader.is_empty_element() {
        return Ok(Osd::Undefined);
    }
    reader.read()?;
    skip_whitespace(reader)?;
    let value = if reader.node_type() == NodeType::EndElement {
        Osd::Undefined
    } else {
        parse_element(reader)?.unwrap_or_default()
    };
    skip_whitespace(reader)?;
    expect_end(reader, "llsd")?;
    Ok(value)
}

/// Parses the value element under the cursor and leaves the cursor on the
/// node after it. Unknown elements are skipped and yield `None`.
pub fn parse_element<R: XmlNodeReader + ?Sized>(reader: &mut R) -> Result<Option<Osd>> {
    parse_value(reader, 0)
}

fn parse_value<R: XmlNodeReader + ?Sized>(reader: &mut R, depth: usize) -> Result<Option<Osd>> {
    skip_whitespace(reader)?;
    if reader.node_type() != NodeType::Element {
        return Err(OsdError::malformed(format!(
            "expected an element, found {:?}",
            reader.node_type()
        )));
    }
    let tag = reader.local_name().to_owned();
    let value = match tag.as_str() {
        "undef" => match scalar_text(reader)? {
            Some(_) => Osd::Undefined,
            None => return Ok(Some(Osd::Undefined)),
        },
        "boolean" => match scalar_text(reader)? {
            Some(text) => Osd::Boolean(parse::parse_boolean(text.trim())),
            None => return Ok(Some(Osd::Boolean(false))),
        },
        "integer" => match scalar_text(reader)? {
            Some(text) => Osd::Integer(parse::parse_integer(&text)),
            None => return Ok(Some(Osd::Integer(0))),
        },
        "real" => match scalar_text(reader)? {
            Some(text) => Osd::Real(parse::parse_real(&text)),
            None => return Ok(Some(Osd::Real(0.0))),
        },
        "string" => match scalar_text(reader)? {
            Some(text) => Osd::String(text),
            None => return Ok(Some(Osd::String(String::new()))),
        },
        "uuid" => match scalar_text(reader)? {
            Some(text) => Osd::Uuid(parse::parse_uuid(&text)),
            None => return Ok(Some(Osd::Uuid(uuid::Uuid::nil()))),
        },
        "date" => match scalar_text(reader)? {
            Some(text) => Osd::Date(parse::parse_date(&text)),
            None => return Ok(Some(Osd::Date(Default::default()))),
        },
        "uri" => match scalar_text(reader)? {
            Some(text) => Osd::Uri(text.trim().to_owned()),
            None => return Ok(Some(Osd::Uri(String::new()))),
        },
        "binary" => {
            if let Some(encoding) = reader.attribute("encoding") {
                if encoding != "base64" {
                    return Err(OsdError::malformed(format!(
                        "unsupported binary encoding: {encoding}"
                    )));
                }
            }
            match scalar_text(reader)? {
                Some(text) => Osd::Binary(decode_base64(&text)?),
                None => return Ok(Some(Osd::Binary(Vec::new()))),
            }
        }
        "map" => {
            let depth = descend(depth)?;
            if reader.is_empty_element() {
                reader.read()?;
                return Ok(Some(Osd::Map(OsdMap::new())));
            }
            reader.read()?;
            Osd::Map(parse_map(reader, depth)?)
        }
        "array" => {
            let depth = descend(depth)?;
            if reader.is_empty_element() {
                reader.read()?;
                return Ok(Some(Osd::Array(OsdArray::new())));
            }
            reader.read()?;
            Osd::Array(parse_array(reader, depth)?)
        }
        _ => {
            trace!(tag = %tag, "skipping unknown LLSD element");
            reader.skip()?;
            return Ok(None);
        }
    };
    skip_whitespace(reader)?;
    expect_end(reader, &tag)?;
    reader.read()?;
    Ok(Some(value))
}

/// Map body: `<key>name</key>` followed by one value element, repeated.
/// Returns with the cursor on `</map>`.
fn parse_map<R: XmlNodeReader + ?Sized>(reader: &mut R, depth: usize) -> Result<OsdMap> {
    let map = OsdMap::new();
    loop {
        skip_whitespace(reader)?;
        match reader.node_type() {
            NodeType::EndElement if reader.local_name() == "map" => return Ok(map),
            NodeType::Element if reader.local_name() == "key" => {
                let key = match scalar_text(reader)? {
                    Some(text) => {
                        expect_end(reader, "key")?;
                        reader.read()?;
                        text
                    }
                    None => String::new(),
                };
                if let Some(value) = parse_value(reader, depth)? {
                    map.insert(key, value);
                }
            }
            _ => return Err(OsdError::malformed("expected <key> or </map>")),
        }
    }
}

/// Returns with the cursor on `</array>`.
fn parse_array<R: XmlNodeReader + ?Sized>(reader: &mut R, depth: usize) -> Result<OsdArray> {
    let array = OsdArray::new();
    loop {
        skip_whitespace(reader)?;
        if reader.node_type() == NodeType::EndElement && reader.local_name() == "array" {
            return Ok(array);
        }
        if let Some(value) = parse_value(reader, depth)? {
            array.push(value);
        }
    }
}

/// Text content of a scalar element, or `None` for a self-closing one. A
/// self-closing element is consumed; otherwise the cursor stops on the first
/// markup node after the text.
fn scalar_text<R: XmlNodeReader + ?Sized>(reader: &mut R) -> Result<Option<String>> {
    let empty = reader.is_empty_element();
    reader.read()?;
    if empty {
        return Ok(None);
    }
    reader.read_string().map(Some)
}

fn descend(depth: usize) -> Result<usize> {
    if depth >= MAX_DEPTH {
        return Err(OsdError::malformed("nesting too deep"));
    }
    Ok(depth + 1)
}

fn skip_whitespace<R: XmlNodeReader + ?Sized>(reader: &mut R) -> Result<()> {
    while matches!(reader.node_type(), NodeType::Whitespace | NodeType::Other) {
        if !reader.read()? {
            break;
        }
    }
    Ok(())
}

fn expect_end<R: XmlNodeReader + ?Sized>(reader: &R, tag: &str) -> Result<()> {
    if reader.node_type() != NodeType::EndElement || reader.local_name() != tag {
        return Err(OsdError::malformed(format!("expected </{tag}>")));
    }
    Ok(())
}

fn decode_base64(text: &str) -> Result<Vec<u8>> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    BASE64_STANDARD
        .decode(compact)
        .map_err(|e| OsdError::malformed(format!("invalid base64 content: {e}")))
}
