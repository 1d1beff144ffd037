//! `NotationEncoder`: renders [`Osd`] trees as LLSD notation.

use base64::prelude::*;

use crate::{parse, Osd};

#[derive(Debug, Clone, Copy)]
/// Knobs for [`NotationEncoder`].
pub struct NotationOptions {
    /// One map entry or array element per line.
    pub pretty: bool,
    /// Spaces per nesting level when `pretty` is set.
    pub indent: usize,
}

impl Default for NotationOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: 2,
        }
    }
}

/// Reusable LLSD notation encoder.
pub struct NotationEncoder {
    out: String,
    options: NotationOptions,
}

impl Default for NotationEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl NotationEncoder {
    /// Compact encoder.
    pub fn new() -> Self {
        Self::with_options(NotationOptions::default())
    }

    /// Encoder with explicit options.
    pub fn with_options(options: NotationOptions) -> Self {
        Self {
            out: String::new(),
            options,
        }
    }

    /// Renders `value` and returns the text.
    pub fn encode(&mut self, value: &Osd) -> String {
        self.out.clear();
        self.write_any(value, 0);
        std::mem::take(&mut self.out)
    }

    /// Appends one value. `depth` is the current nesting level and only
    /// affects indentation in pretty mode.
    pub fn write_any(&mut self, value: &Osd, depth: usize) {
        match value {
            Osd::Undefined => self.out.push('!'),
            Osd::Boolean(b) => self.out.push_str(if *b { "true" } else { "false" }),
            Osd::Integer(i) => {
                self.out.push('i');
                self.out.push_str(&i.to_string());
            }
            Osd::Real(r) => {
                self.out.push('r');
                self.out.push_str(&parse::format_real(*r));
            }
            Osd::Uuid(u) => {
                self.out.push('u');
                self.out.push_str(&u.hyphenated().to_string());
            }
            Osd::String(s) | Osd::LlsdXml(s) => self.write_quoted(s, '\''),
            Osd::Uri(s) => {
                self.out.push('l');
                self.write_quoted(s, '"');
            }
            Osd::Date(d) => {
                self.out.push('d');
                self.write_quoted(&parse::format_date(d), '"');
            }
            Osd::Binary(bytes) => {
                self.out.push_str("b64\"");
                self.out.push_str(&BASE64_STANDARD.encode(bytes));
                self.out.push('"');
            }
            Osd::Array(array) => {
                let items = array.borrow();
                self.out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.out.push(',');
                    }
                    self.newline(depth + 1);
                    self.write_any(item, depth + 1);
                }
                if !items.is_empty() {
                    self.newline(depth);
                }
                self.out.push(']');
            }
            Osd::Map(map) => {
                let entries = map.borrow();
                self.out.push('{');
                for (i, (key, item)) in entries.iter().enumerate() {
                    if i > 0 {
                        self.out.push(',');
                    }
                    self.newline(depth + 1);
                    self.write_quoted(key, '\'');
                    self.out.push(':');
                    self.write_any(item, depth + 1);
                }
                if !entries.is_empty() {
                    self.newline(depth);
                }
                self.out.push('}');
            }
        }
    }

    fn write_quoted(&mut self, s: &str, quote: char) {
        self.out.push(quote);
        for ch in s.chars() {
            match ch {
                '\\' => self.out.push_str("\\\\"),
                c if c == quote => {
                    self.out.push('\\');
                    self.out.push(c);
                }
                c if c.is_ascii_control() => {
                    self.out.push_str(&format!("\\x{:02x}", c as u32));
                }
                c => self.out.push(c),
            }
        }
        self.out.push(quote);
    }

    fn newline(&mut self, depth: usize) {
        if self.options.pretty {
            self.out.push('\n');
            self.out
                .extend(std::iter::repeat(' ').take(depth * self.options.indent));
        }
    }
}
