//! Pull-style XML node reader consumed by the LLSD XML parser.
//!
//! The parser only needs a cursor over nodes that can report the node kind,
//! the element's local name, whether it is self-closing, attribute values and
//! the text run under the cursor. [`XmlNodeReader`] is that surface;
//! [`QuickXmlReader`] implements it over `quick-xml`.

use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::Event;

use crate::error::{OsdError, Result};

/// Kind of node under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Before the first `read()` or after the end of input.
    None,
    Element,
    EndElement,
    Text,
    Whitespace,
    /// Comments, processing instructions, declarations, doctypes.
    Other,
}

pub trait XmlNodeReader {
    /// Moves to the next node. Returns `false` once the input is exhausted.
    fn read(&mut self) -> Result<bool>;

    fn node_type(&self) -> NodeType;

    /// Unqualified name of the current element or end element; empty otherwise.
    fn local_name(&self) -> &str;

    /// True for a self-closing element such as `<map />`.
    fn is_empty_element(&self) -> bool;

    fn attribute(&self, name: &str) -> Option<&str>;

    /// Text content of the current text or whitespace node; empty otherwise.
    fn value(&self) -> &str;

    /// Concatenates consecutive text nodes starting at the cursor, stepping
    /// over comments, and stops on the first markup node.
    fn read_string(&mut self) -> Result<String> {
        let mut out = String::new();
        loop {
            match self.node_type() {
                NodeType::Text | NodeType::Whitespace => out.push_str(self.value()),
                NodeType::Other => {}
                _ => break,
            }
            if !self.read()? {
                break;
            }
        }
        Ok(out)
    }

    /// Skips the current node, including the whole subtree of an element.
    fn skip(&mut self) -> Result<()> {
        if self.node_type() == NodeType::Element && !self.is_empty_element() {
            let mut depth = 1usize;
            while depth > 0 {
                if !self.read()? {
                    return Err(OsdError::malformed("unexpected end of document"));
                }
                match self.node_type() {
                    NodeType::Element if !self.is_empty_element() => depth += 1,
                    NodeType::EndElement => depth -= 1,
                    _ => {}
                }
            }
        }
        self.read()?;
        Ok(())
    }
}

#[derive(Debug)]
enum Node {
    None,
    Element {
        name: String,
        attributes: Vec<(String, String)>,
        empty: bool,
    },
    EndElement(String),
    Text(String),
    Whitespace(String),
    Other,
}

/// [`XmlNodeReader`] over an in-memory document.
pub struct QuickXmlReader<'a> {
    reader: quick_xml::Reader<&'a [u8]>,
    buf: Vec<u8>,
    node: Node,
}

impl<'a> QuickXmlReader<'a> {
    /// A leading UTF-8 byte-order mark is ignored.
    pub fn new(input: &'a [u8]) -> Self {
        let input = input.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(input);
        Self {
            reader: quick_xml::Reader::from_reader(input),
            buf: Vec::new(),
            node: Node::None,
        }
    }

    fn next_node(&mut self) -> Result<Node> {
        self.buf.clear();
        let event = self.reader.read_event_into(&mut self.buf).map_err(|e| {
            OsdError::malformed(format!(
                "XML error at position {}: {e}",
                self.reader.buffer_position()
            ))
        })?;
        let node = match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let empty = matches!(event, Event::Empty(_));
                let name = utf8(e.local_name().as_ref())?.to_owned();
                let mut attributes = Vec::new();
                for attr in e.attributes() {
                    let attr = attr.map_err(|e| OsdError::malformed(e.to_string()))?;
                    let key = utf8(attr.key.local_name().as_ref())?.to_owned();
                    let value = attr
                        .unescape_value()
                        .map_err(|e| OsdError::malformed(e.to_string()))?
                        .into_owned();
                    attributes.push((key, value));
                }
                Node::Element {
                    name,
                    attributes,
                    empty,
                }
            }
            Event::End(e) => Node::EndElement(utf8(e.local_name().as_ref())?.to_owned()),
            Event::Text(e) => {
                let text = e
                    .decode()
                    .map_err(|e| OsdError::malformed(e.to_string()))?
                    .into_owned();
                text_node(text)
            }
            Event::CData(e) => text_node(utf8(e.as_ref())?.to_owned()),
            Event::GeneralRef(e) => {
                let raw = e.decode().map_err(|e| OsdError::malformed(e.to_string()))?;
                Node::Text(resolve_entity(&raw)?)
            }
            Event::Eof => Node::None,
            _ => Node::Other,
        };
        Ok(node)
    }
}

fn text_node(text: String) -> Node {
    if text.chars().all(char::is_whitespace) {
        Node::Whitespace(text)
    } else {
        Node::Text(text)
    }
}

fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|_| OsdError::malformed("invalid UTF-8 in XML"))
}

fn resolve_entity(raw: &str) -> Result<String> {
    if let Some(resolved) = resolve_xml_entity(raw) {
        return Ok(resolved.to_owned());
    }
    let code = match raw.strip_prefix('#') {
        Some(rest) => match rest.strip_prefix('x').or_else(|| rest.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => rest.parse::<u32>().ok(),
        },
        None => return Err(OsdError::malformed(format!("unknown entity &{raw};"))),
    };
    code.and_then(char::from_u32)
        .map(String::from)
        .ok_or_else(|| OsdError::malformed(format!("invalid character reference &{raw};")))
}

impl XmlNodeReader for QuickXmlReader<'_> {
    fn read(&mut self) -> Result<bool> {
        self.node = self.next_node()?;
        Ok(!matches!(self.node, Node::None))
    }

    fn node_type(&self) -> NodeType {
        match self.node {
            Node::None => NodeType::None,
            Node::Element { .. } => NodeType::Element,
            Node::EndElement(_) => NodeType::EndElement,
            Node::Text(_) => NodeType::Text,
            Node::Whitespace(_) => NodeType::Whitespace,
            Node::Other => NodeType::Other,
        }
    }

    fn local_name(&self) -> &str {
        match &self.node {
            Node::Element { name, .. } | Node::EndElement(name) => name,
            _ => "",
        }
    }

    fn is_empty_element(&self) -> bool {
        matches!(self.node, Node::Element { empty: true, .. })
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        match &self.node {
            Node::Element { attributes, .. } => attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }

    fn value(&self) -> &str {
        match &self.node {
            Node::Text(text) | Node::Whitespace(text) => text,
            _ => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_nodes() {
        let mut reader = QuickXmlReader::new(b"<a x=\"1\"><b/>t&amp;u</a>");
        assert!(reader.read().unwrap());
        assert_eq!(reader.node_type(), NodeType::Element);
        assert_eq!(reader.local_name(), "a");
        assert_eq!(reader.attribute("x"), Some("1"));
        assert!(!reader.is_empty_element());
        reader.read().unwrap();
        assert!(reader.is_empty_element());
        reader.read().unwrap();
        assert_eq!(reader.read_string().unwrap(), "t&u");
        assert_eq!(reader.node_type(), NodeType::EndElement);
        assert!(!reader.read().unwrap());
        assert_eq!(reader.node_type(), NodeType::None);
    }

    #[test]
    fn skip_consumes_subtree() {
        let mut reader = QuickXmlReader::new(b"<r><x><y>1</y><z/></x><after/></r>");
        reader.read().unwrap();
        reader.read().unwrap();
        assert_eq!(reader.local_name(), "x");
        reader.skip().unwrap();
        assert_eq!(reader.local_name(), "after");
    }

    #[test]
    fn character_references() {
        assert_eq!(resolve_entity("#65").unwrap(), "A");
        assert_eq!(resolve_entity("#x42").unwrap(), "B");
        assert_eq!(resolve_entity("lt").unwrap(), "<");
        assert!(resolve_entity("bogus").is_err());
    }
}
