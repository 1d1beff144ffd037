//! Growable byte writer.

/// A byte writer that grows its backing buffer in fixed-size steps.
///
/// # Example
///
/// ```
/// use osd::buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u8(b'i');
/// writer.i32(7);
/// assert_eq!(writer.flush(), [b'i', 0, 0, 0, 7]);
/// ```
pub struct Writer {
    /// Backing storage; only `uint8[x0..x]` holds unflushed output.
    pub uint8: Vec<u8>,
    /// Position of the last flush.
    pub x0: usize,
    /// Cursor.
    pub x: usize,
    alloc_size: usize,
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer {
    /// Creates a writer that allocates in 4 KiB steps.
    pub fn new() -> Self {
        Self::with_alloc_size(4 * 1024)
    }

    pub fn with_alloc_size(alloc_size: usize) -> Self {
        Self {
            uint8: vec![0u8; alloc_size],
            x0: 0,
            x: 0,
            alloc_size,
        }
    }

    /// Ensures `capacity` more bytes can be written without reallocating.
    pub fn ensure_capacity(&mut self, capacity: usize) {
        let remaining = self.uint8.len() - self.x;
        if remaining < capacity {
            let total = self.uint8.len() - self.x0;
            let total_required = total + (capacity - remaining);
            let new_size = if total_required <= self.alloc_size {
                self.alloc_size
            } else {
                total_required * 2
            };
            self.grow(new_size);
        }
    }

    fn grow(&mut self, new_size: usize) {
        let pending = self.x - self.x0;
        let mut new_buf = vec![0u8; new_size];
        new_buf[..pending].copy_from_slice(&self.uint8[self.x0..self.x]);
        self.uint8 = new_buf;
        self.x = pending;
        self.x0 = 0;
    }

    /// Discards unflushed output.
    pub fn reset(&mut self) {
        self.x = self.x0;
    }

    /// Number of bytes written since the last flush.
    pub fn len(&self) -> usize {
        self.x - self.x0
    }

    pub fn is_empty(&self) -> bool {
        self.x == self.x0
    }

    /// Returns the bytes written since the last flush.
    pub fn flush(&mut self) -> Vec<u8> {
        let out = self.uint8[self.x0..self.x].to_vec();
        self.x0 = self.x;
        out
    }

    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.ensure_capacity(1);
        self.uint8[self.x] = val;
        self.x += 1;
    }

    /// Big-endian.
    #[inline]
    pub fn u32(&mut self, val: u32) {
        self.buf(&val.to_be_bytes());
    }

    /// Big-endian.
    #[inline]
    pub fn i32(&mut self, val: i32) {
        self.buf(&val.to_be_bytes());
    }

    /// Big-endian.
    #[inline]
    pub fn f64(&mut self, val: f64) {
        self.buf(&val.to_be_bytes());
    }

    #[inline]
    pub fn f64_le(&mut self, val: f64) {
        self.buf(&val.to_le_bytes());
    }

    pub fn buf(&mut self, bytes: &[u8]) {
        self.ensure_capacity(bytes.len());
        self.uint8[self.x..self.x + bytes.len()].copy_from_slice(bytes);
        self.x += bytes.len();
    }

    pub fn utf8(&mut self, s: &str) {
        self.buf(s.as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grows_past_alloc_size() {
        let mut writer = Writer::with_alloc_size(4);
        writer.buf(b"hello world");
        writer.u32(0x0102_0304);
        let out = writer.flush();
        assert_eq!(&out[..11], b"hello world");
        assert_eq!(&out[11..], &[1, 2, 3, 4]);
        assert!(writer.is_empty());
    }

    #[test]
    fn reset_discards_pending_output() {
        let mut writer = Writer::new();
        writer.u8(1);
        assert_eq!(writer.flush(), [1]);
        writer.u8(2);
        writer.reset();
        writer.u8(3);
        assert_eq!(writer.flush(), [3]);
    }

    #[test]
    fn float_byte_orders() {
        let mut writer = Writer::new();
        writer.f64(1.0);
        writer.f64_le(1.0);
        let out = writer.flush();
        assert_eq!(&out[..8], &[0x3f, 0xf0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&out[8..], &[0, 0, 0, 0, 0, 0, 0xf0, 0x3f]);
    }
}
