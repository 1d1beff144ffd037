//! `BinaryDecoder`: reads LLSD binary into [`Osd`] trees.

use uuid::Uuid;

use super::constants::*;
use crate::buffers::Reader;
use crate::error::{OsdError, Result};
use crate::{parse, Osd, OsdArray, OsdMap, MAX_DEPTH};

#[derive(Default)]
pub struct BinaryDecoder;

impl BinaryDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decodes one value. A leading header line is skipped when present;
    /// bytes after the value are ignored.
    pub fn decode(&self, data: &[u8]) -> Result<Osd> {
        let mut reader = Reader::new(data);
        if reader.starts_with(HEADER) {
            reader.skip(HEADER.len())?;
        }
        while matches!(reader.peek(), Some(b' ' | b'\t' | b'\r' | b'\n')) {
            reader.skip(1)?;
        }
        self.read_any(&mut reader)
    }

    /// Reads one value at the top nesting level.
    pub fn read_any(&self, reader: &mut Reader<'_>) -> Result<Osd> {
        self.read_value(reader, 0)
    }

    fn read_value(&self, reader: &mut Reader<'_>, depth: usize) -> Result<Osd> {
        let marker = reader.u8()?;
        let value = match marker {
            UNDEF => Osd::Undefined,
            TRUE => Osd::Boolean(true),
            FALSE => Osd::Boolean(false),
            INTEGER => Osd::Integer(i64::from(reader.i32()?)),
            REAL => Osd::Real(reader.f64()?),
            UUID => {
                let bytes = reader.buf(16)?;
                Osd::Uuid(Uuid::from_slice(bytes).map_err(|e| OsdError::malformed(e.to_string()))?)
            }
            BINARY => Osd::Binary(self.read_sized(reader)?.to_vec()),
            STRING => Osd::String(self.read_str(reader)?),
            URI => Osd::Uri(self.read_str(reader)?),
            DATE => Osd::Date(parse::date_from_seconds(reader.f64_le()?)),
            ARRAY_BEGIN => self.read_array(reader, descend(depth)?)?,
            MAP_BEGIN => self.read_map(reader, descend(depth)?)?,
            other => {
                return Err(OsdError::malformed(format!(
                    "unknown binary marker 0x{other:02x} at offset {}",
                    reader.x - 1
                )))
            }
        };
        Ok(value)
    }

    fn read_array(&self, reader: &mut Reader<'_>, depth: usize) -> Result<Osd> {
        let count = reader.u32()? as usize;
        // Every element takes at least one byte.
        let array = OsdArray::with_capacity(count.min(reader.size()));
        for _ in 0..count {
            array.push(self.read_value(reader, depth)?);
        }
        expect_marker(reader, ARRAY_END)?;
        Ok(Osd::Array(array))
    }

    fn read_map(&self, reader: &mut Reader<'_>, depth: usize) -> Result<Osd> {
        let count = reader.u32()? as usize;
        let map = OsdMap::with_capacity(count.min(reader.size()));
        for _ in 0..count {
            expect_marker(reader, KEY)?;
            let key = self.read_str(reader)?;
            map.insert(key, self.read_value(reader, depth)?);
        }
        expect_marker(reader, MAP_END)?;
        Ok(Osd::Map(map))
    }

    fn read_sized<'a>(&self, reader: &mut Reader<'a>) -> Result<&'a [u8]> {
        let len = reader.u32()? as usize;
        reader.buf(len)
    }

    fn read_str(&self, reader: &mut Reader<'_>) -> Result<String> {
        let len = reader.u32()? as usize;
        Ok(reader.utf8(len)?.to_owned())
    }
}

fn descend(depth: usize) -> Result<usize> {
    if depth >= MAX_DEPTH {
        return Err(OsdError::malformed("nesting too deep"));
    }
    Ok(depth + 1)
}

fn expect_marker(reader: &mut Reader<'_>, expected: u8) -> Result<()> {
    let actual = reader.u8()?;
    if actual != expected {
        return Err(OsdError::malformed(format!(
            "expected '{}' at offset {}, found 0x{actual:02x}",
            expected as char,
            reader.x - 1
        )));
    }
    Ok(())
}
