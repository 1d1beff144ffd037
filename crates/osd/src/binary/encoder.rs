//! `BinaryEncoder`: writes [`Osd`] trees as LLSD binary.

use super::constants::*;
use crate::buffers::Writer;
use crate::{parse, Osd};

#[derive(Debug, Clone, Copy)]
/// Knobs for [`BinaryEncoder`].
pub struct BinaryOptions {
    /// Prepend `"<? llsd/binary ?>\n"`.
    pub header: bool,
}

impl Default for BinaryOptions {
    fn default() -> Self {
        Self { header: true }
    }
}

/// Reusable LLSD binary encoder. The output buffer is reset on every
/// [`BinaryEncoder::encode`] call.
pub struct BinaryEncoder {
    pub writer: Writer,
    options: BinaryOptions,
}

impl Default for BinaryEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl BinaryEncoder {
    /// Encoder that writes the header.
    pub fn new() -> Self {
        Self::with_options(BinaryOptions::default())
    }

    /// Encoder with explicit options.
    pub fn with_options(options: BinaryOptions) -> Self {
        Self {
            writer: Writer::new(),
            options,
        }
    }

    /// Encodes `value` as a complete document and returns the bytes.
    pub fn encode(&mut self, value: &Osd) -> Vec<u8> {
        self.writer.reset();
        if self.options.header {
            self.writer.buf(HEADER);
            self.writer.u8(b'\n');
        }
        self.write_any(value);
        self.writer.flush()
    }

    /// Appends one value, with its marker, to the writer.
    pub fn write_any(&mut self, value: &Osd) {
        match value {
            Osd::Undefined => self.writer.u8(UNDEF),
            Osd::Boolean(b) => self.writer.u8(if *b { TRUE } else { FALSE }),
            Osd::Integer(i) => self.write_integer(*i),
            Osd::Real(r) => self.write_real(*r),
            Osd::Uuid(u) => {
                self.writer.u8(UUID);
                self.writer.buf(u.as_bytes());
            }
            Osd::Binary(b) => self.write_sized(BINARY, b),
            Osd::String(s) | Osd::LlsdXml(s) => self.write_sized(STRING, s.as_bytes()),
            Osd::Uri(s) => self.write_sized(URI, s.as_bytes()),
            Osd::Date(d) => {
                self.writer.u8(DATE);
                self.writer.f64_le(parse::date_to_seconds(d));
            }
            Osd::Array(array) => {
                let items = array.borrow();
                self.writer.u8(ARRAY_BEGIN);
                self.writer.u32(items.len() as u32);
                for item in items.iter() {
                    self.write_any(item);
                }
                self.writer.u8(ARRAY_END);
            }
            Osd::Map(map) => {
                let entries = map.borrow();
                self.writer.u8(MAP_BEGIN);
                self.writer.u32(entries.len() as u32);
                for (key, item) in entries.iter() {
                    self.write_sized(KEY, key.as_bytes());
                    self.write_any(item);
                }
                self.writer.u8(MAP_END);
            }
        }
    }

    /// The wire integer is 32 bits wide; wider values travel as reals and
    /// round to the nearest f64 beyond 2^53.
    pub fn write_integer(&mut self, int: i64) {
        match i32::try_from(int) {
            Ok(small) => {
                self.writer.u8(INTEGER);
                self.writer.i32(small);
            }
            Err(_) => self.write_real(int as f64),
        }
    }

    /// Writes `r` followed by the big-endian f64.
    pub fn write_real(&mut self, real: f64) {
        self.writer.u8(REAL);
        self.writer.f64(real);
    }

    fn write_sized(&mut self, marker: u8, bytes: &[u8]) {
        self.writer.u8(marker);
        self.writer.u32(bytes.len() as u32);
        self.writer.buf(bytes);
    }
}
