//! Bounds-checked byte cursor.

use crate::error::{OsdError, Result};

/// Reads big-endian primitives from a byte slice, failing with
/// [`OsdError::UnexpectedEof`] instead of panicking on truncated input.
///
/// # Example
///
/// ```
/// use osd::buffers::Reader;
///
/// let mut reader = Reader::new(&[b'i', 0, 0, 0, 7]);
/// assert_eq!(reader.u8().unwrap(), b'i');
/// assert_eq!(reader.i32().unwrap(), 7);
/// assert!(reader.u8().is_err());
/// ```
pub struct Reader<'a> {
    pub uint8: &'a [u8],
    /// Cursor.
    pub x: usize,
}

impl<'a> Reader<'a> {
    pub fn new(uint8: &'a [u8]) -> Self {
        Self { uint8, x: 0 }
    }

    /// Number of unread bytes.
    pub fn size(&self) -> usize {
        self.uint8.len() - self.x
    }

    pub fn peek(&self) -> Option<u8> {
        self.uint8.get(self.x).copied()
    }

    pub fn skip(&mut self, length: usize) -> Result<()> {
        self.buf(length).map(|_| ())
    }

    /// True if the unread input starts with `prefix`.
    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        self.uint8[self.x..].starts_with(prefix)
    }

    pub fn buf(&mut self, size: usize) -> Result<&'a [u8]> {
        if size > self.size() {
            return Err(OsdError::UnexpectedEof);
        }
        let bin = &self.uint8[self.x..self.x + size];
        self.x += size;
        Ok(bin)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.buf(N)?);
        Ok(out)
    }

    #[inline]
    pub fn u8(&mut self) -> Result<u8> {
        let val = self.peek().ok_or(OsdError::UnexpectedEof)?;
        self.x += 1;
        Ok(val)
    }

    /// Big-endian.
    #[inline]
    pub fn u32(&mut self) -> Result<u32> {
        self.array().map(u32::from_be_bytes)
    }

    /// Big-endian.
    #[inline]
    pub fn i32(&mut self) -> Result<i32> {
        self.array().map(i32::from_be_bytes)
    }

    /// Big-endian.
    #[inline]
    pub fn f64(&mut self) -> Result<f64> {
        self.array().map(f64::from_be_bytes)
    }

    #[inline]
    pub fn f64_le(&mut self) -> Result<f64> {
        self.array().map(f64::from_le_bytes)
    }

    pub fn utf8(&mut self, size: usize) -> Result<&'a str> {
        let bytes = self.buf(size)?;
        std::str::from_utf8(bytes).map_err(|_| OsdError::malformed("invalid UTF-8"))
    }
}
