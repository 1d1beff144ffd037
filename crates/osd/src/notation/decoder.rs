//! `NotationDecoder`: cursor-based parser for LLSD notation.

use base64::prelude::*;

use crate::error::{OsdError, Result};
use crate::{parse, Osd, OsdArray, OsdMap, MAX_DEPTH};

pub struct NotationDecoder<'a> {
    pub data: &'a [u8],
    pub x: usize,
    depth: usize,
}

impl<'a> NotationDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
        Self { data, x: 0, depth: 0 }
    }

    /// Decodes exactly one value; anything but whitespace after it is an error.
    pub fn decode(&mut self) -> Result<Osd> {
        let value = self.read_any()?;
        self.skip_whitespace();
        if self.x < self.data.len() {
            return Err(OsdError::malformed(format!(
                "unexpected trailing content at offset {}",
                self.x
            )));
        }
        Ok(value)
    }

    pub fn read_any(&mut self) -> Result<Osd> {
        self.skip_whitespace();
        let Some(ch) = self.peek() else {
            return Err(OsdError::malformed("unexpected end of notation input"));
        };
        match ch {
            b'!' => {
                self.x += 1;
                Ok(Osd::Undefined)
            }
            b'1' => {
                self.x += 1;
                Ok(Osd::Boolean(true))
            }
            b'0' => {
                self.x += 1;
                Ok(Osd::Boolean(false))
            }
            b't' | b'T' => {
                self.x += 1;
                self.eat_word(b"rue");
                Ok(Osd::Boolean(true))
            }
            b'f' | b'F' => {
                self.x += 1;
                self.eat_word(b"alse");
                Ok(Osd::Boolean(false))
            }
            b'i' => {
                self.x += 1;
                self.read_integer()
            }
            b'r' => {
                self.x += 1;
                self.read_real()
            }
            b'u' => {
                self.x += 1;
                self.read_uuid()
            }
            b'b' => {
                self.x += 1;
                self.read_binary()
            }
            b'\'' | b'"' => Ok(Osd::String(self.read_quoted()?)),
            b's' => {
                self.x += 1;
                Ok(Osd::String(self.read_sized_string()?))
            }
            b'l' => {
                self.x += 1;
                Ok(Osd::Uri(self.read_quoted()?))
            }
            b'd' => {
                self.x += 1;
                let text = self.read_quoted()?;
                parse::try_parse_date(&text)
                    .map(Osd::Date)
                    .ok_or_else(|| OsdError::malformed(format!("invalid date {text:?}")))
            }
            b'[' => self.read_array(),
            b'{' => self.read_map(),
            c => Err(OsdError::malformed(format!(
                "unexpected character {:?} at offset {}",
                c as char, self.x
            ))),
        }
    }

    pub fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.x += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.x).copied()
    }

    fn expect(&mut self, byte: u8) -> Result<()> {
        if self.peek() != Some(byte) {
            return Err(OsdError::malformed(format!(
                "expected {:?} at offset {}",
                byte as char, self.x
            )));
        }
        self.x += 1;
        Ok(())
    }

    /// Consumes the rest of a `true`/`false` literal if present, in either case.
    fn eat_word(&mut self, rest: &[u8]) {
        let end = self.x + rest.len();
        if end <= self.data.len() && self.data[self.x..end].eq_ignore_ascii_case(rest) {
            self.x = end;
        }
    }

    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.x;
        while self.peek().is_some_and(&pred) {
            self.x += 1;
        }
        let data = self.data;
        // Predicates only accept ASCII.
        std::str::from_utf8(&data[start..self.x]).unwrap_or_default()
    }

    fn read_integer(&mut self) -> Result<Osd> {
        let start = self.x;
        if let Some(b'-' | b'+') = self.peek() {
            self.x += 1;
        }
        self.take_while(|c| c.is_ascii_digit());
        let text = std::str::from_utf8(&self.data[start..self.x]).unwrap_or_default();
        text.parse::<i64>()
            .map(Osd::Integer)
            .map_err(|_| OsdError::malformed(format!("invalid integer {text:?} at offset {start}")))
    }

    fn read_real(&mut self) -> Result<Osd> {
        let start = self.x;
        let text = self.take_while(|c| c.is_ascii_alphanumeric() || matches!(c, b'-' | b'+' | b'.'));
        if text.eq_ignore_ascii_case("nan") {
            return Ok(Osd::Real(f64::NAN));
        }
        text.parse::<f64>()
            .map(Osd::Real)
            .map_err(|_| OsdError::malformed(format!("invalid real {text:?} at offset {start}")))
    }

    fn read_uuid(&mut self) -> Result<Osd> {
        let end = self.x + 36;
        let text = self
            .data
            .get(self.x..end)
            .and_then(|raw| std::str::from_utf8(raw).ok())
            .ok_or_else(|| OsdError::malformed("truncated uuid"))?;
        let uuid = uuid::Uuid::parse_str(text)
            .map_err(|_| OsdError::malformed(format!("invalid uuid {text:?}")))?;
        self.x = end;
        Ok(Osd::Uuid(uuid))
    }

    fn read_binary(&mut self) -> Result<Osd> {
        match self.peek() {
            Some(b'(') => Ok(Osd::Binary(self.read_sized()?.to_vec())),
            Some(b'6') => {
                self.expect(b'6')?;
                self.expect(b'4')?;
                let text = self.read_quoted()?;
                let compact: String = text.split_ascii_whitespace().collect();
                BASE64_STANDARD
                    .decode(compact)
                    .map(Osd::Binary)
                    .map_err(|_| OsdError::malformed("invalid base64 content"))
            }
            Some(b'1') => {
                self.expect(b'1')?;
                self.expect(b'6')?;
                let text = self.read_quoted()?;
                decode_hex(&text).map(Osd::Binary)
            }
            _ => Err(OsdError::malformed(format!(
                "unknown binary encoding at offset {}",
                self.x
            ))),
        }
    }

    /// `(len)"raw bytes"`
    fn read_sized(&mut self) -> Result<&'a [u8]> {
        self.expect(b'(')?;
        let len: usize = self
            .take_while(|c| c.is_ascii_digit())
            .parse()
            .map_err(|_| OsdError::malformed("invalid length prefix"))?;
        self.expect(b')')?;
        let quote = match self.peek() {
            Some(q @ (b'"' | b'\'')) => q,
            _ => return Err(OsdError::malformed("expected quote after length prefix")),
        };
        self.x += 1;
        let data = self.data;
        let raw = data
            .get(self.x..self.x.saturating_add(len))
            .ok_or_else(|| OsdError::malformed("sized value runs past end of input"))?;
        self.x += len;
        self.expect(quote)?;
        Ok(raw)
    }

    fn read_sized_string(&mut self) -> Result<String> {
        let raw = self.read_sized()?;
        String::from_utf8(raw.to_vec()).map_err(|_| OsdError::malformed("invalid UTF-8 in sized string"))
    }

    fn read_quoted(&mut self) -> Result<String> {
        let quote = match self.peek() {
            Some(q @ (b'"' | b'\'')) => q,
            _ => return Err(OsdError::malformed(format!("expected quoted string at offset {}", self.x))),
        };
        self.x += 1;
        let mut out: Vec<u8> = Vec::new();
        loop {
            let Some(ch) = self.peek() else {
                return Err(OsdError::malformed("unterminated string"));
            };
            self.x += 1;
            match ch {
                c if c == quote => break,
                b'\\' => {
                    let Some(esc) = self.peek() else {
                        return Err(OsdError::malformed("unterminated escape"));
                    };
                    self.x += 1;
                    match esc {
                        b'a' => out.push(0x07),
                        b'b' => out.push(0x08),
                        b'f' => out.push(0x0c),
                        b'n' => out.push(b'\n'),
                        b'r' => out.push(b'\r'),
                        b't' => out.push(b'\t'),
                        b'v' => out.push(0x0b),
                        b'x' => {
                            let hex = self
                                .data
                                .get(self.x..self.x + 2)
                                .and_then(|h| std::str::from_utf8(h).ok())
                                .and_then(|h| u8::from_str_radix(h, 16).ok())
                                .ok_or_else(|| OsdError::malformed("invalid \\x escape"))?;
                            self.x += 2;
                            out.push(hex);
                        }
                        other => out.push(other),
                    }
                }
                c => out.push(c),
            }
        }
        String::from_utf8(out).map_err(|_| OsdError::malformed("invalid UTF-8 in string"))
    }

    /// Enters one container level.
    fn descend(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(OsdError::malformed("nesting too deep"));
        }
        Ok(())
    }

    fn read_array(&mut self) -> Result<Osd> {
        self.expect(b'[')?;
        self.descend()?;
        let array = OsdArray::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some(b']') {
                self.x += 1;
                self.depth -= 1;
                return Ok(Osd::Array(array));
            }
            if !array.is_empty() {
                self.expect(b',')?;
                self.skip_whitespace();
            }
            array.push(self.read_any()?);
        }
    }

    fn read_map(&mut self) -> Result<Osd> {
        self.expect(b'{')?;
        self.descend()?;
        let map = OsdMap::new();
        let mut first = true;
        loop {
            self.skip_whitespace();
            if self.peek() == Some(b'}') {
                self.x += 1;
                self.depth -= 1;
                return Ok(Osd::Map(map));
            }
            if !first {
                self.expect(b',')?;
                self.skip_whitespace();
            }
            first = false;
            let key = match self.peek() {
                Some(b's') => {
                    self.x += 1;
                    self.read_sized_string()?
                }
                _ => self.read_quoted()?,
            };
            self.skip_whitespace();
            self.expect(b':')?;
            let value = self.read_any()?;
            map.insert(key, value);
        }
    }
}

fn decode_hex(text: &str) -> Result<Vec<u8>> {
    let digits: Vec<u8> = text.bytes().filter(|c| !c.is_ascii_whitespace()).collect();
    if digits.len() % 2 != 0 {
        return Err(OsdError::malformed("odd number of hex digits"));
    }
    digits
        .chunks(2)
        .map(|pair| {
            std::str::from_utf8(pair)
                .ok()
                .and_then(|h| u8::from_str_radix(h, 16).ok())
                .ok_or_else(|| OsdError::malformed("invalid hex content"))
        })
        .collect()
}
