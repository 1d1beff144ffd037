//! `XmlEncoder`: renders [`Osd`] trees as LLSD XML.

use base64::prelude::*;

use crate::Osd;

#[derive(Debug, Clone, Copy, Default)]
pub struct XmlOptions {
    /// Emit `<?xml version="1.0" encoding="UTF-8"?>` before `<llsd>`.
    pub declaration: bool,
    /// Put each element on its own line, indented by this many spaces per level.
    pub indent: Option<usize>,
}

pub struct XmlEncoder {
    out: String,
    options: XmlOptions,
}

impl Default for XmlEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl XmlEncoder {
    pub fn new() -> Self {
        Self::with_options(XmlOptions::default())
    }

    pub fn with_options(options: XmlOptions) -> Self {
        Self {
            out: String::new(),
            options,
        }
    }

    pub fn encode(&mut self, value: &Osd) -> String {
        self.out.clear();
        if self.options.declaration {
            self.out
                .push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
            self.newline(0);
        }
        self.out.push_str("<llsd>");
        self.write_any(value, 1);
        self.newline(0);
        self.out.push_str("</llsd>");
        std::mem::take(&mut self.out)
    }

    pub fn write_any(&mut self, value: &Osd, depth: usize) {
        self.newline(depth);
        match value {
            Osd::Undefined => self.out.push_str("<undef />"),
            Osd::Binary(bytes) => {
                self.out.push_str("<binary encoding=\"base64\">");
                self.out.push_str(&BASE64_STANDARD.encode(bytes));
                self.out.push_str("</binary>");
            }
            Osd::Map(map) => {
                let entries = map.borrow();
                if entries.is_empty() {
                    self.out.push_str("<map />");
                    return;
                }
                self.out.push_str("<map>");
                for (key, item) in entries.iter() {
                    self.newline(depth + 1);
                    self.write_element("key", key);
                    self.write_any(item, depth + 1);
                }
                self.newline(depth);
                self.out.push_str("</map>");
            }
            Osd::Array(array) => {
                let items = array.borrow();
                if items.is_empty() {
                    self.out.push_str("<array />");
                    return;
                }
                self.out.push_str("<array>");
                for item in items.iter() {
                    self.write_any(item, depth + 1);
                }
                self.newline(depth);
                self.out.push_str("</array>");
            }
            Osd::LlsdXml(fragment) => self.out.push_str(fragment),
            scalar => self.write_element(scalar.osd_type().xml_tag(), &scalar.as_string()),
        }
    }

    fn write_element(&mut self, tag: &str, text: &str) {
        self.out.push('<');
        self.out.push_str(tag);
        self.out.push('>');
        escape_text(&mut self.out, text);
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push('>');
    }

    fn newline(&mut self, depth: usize) {
        if let Some(indent) = self.options.indent {
            self.out.push('\n');
            self.out.extend(std::iter::repeat(' ').take(depth * indent));
        }
    }
}

fn escape_text(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}
