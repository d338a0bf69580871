//! Text output writer with auto-growing capacity.

/// An output buffer that grows automatically as needed.
///
/// The encoder cursors write JSON text into a `Writer` one token at a time;
/// `flush` hands the accumulated bytes back to the caller and rewinds the
/// flush mark so the same writer can be reused for the next document.
///
/// # Example
///
/// ```
/// use json_grain_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u8(b'[');
/// writer.ascii("true");
/// writer.u8(b']');
/// assert_eq!(writer.flush(), b"[true]");
/// ```
pub struct Writer {
    /// The underlying byte buffer.
    pub uint8: Vec<u8>,
    /// Position where last flush happened.
    pub x0: usize,
    /// Current cursor position.
    pub x: usize,
    /// Allocation size when buffer needs to grow.
    alloc_size: usize,
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer {
    /// Creates a new writer with default allocation size (64KB).
    pub fn new() -> Self {
        Self::with_alloc_size(64 * 1024)
    }

    /// Creates a new writer with custom allocation size.
    pub fn with_alloc_size(alloc_size: usize) -> Self {
        let uint8 = vec![0u8; alloc_size];
        Self {
            uint8,
            x0: 0,
            x: 0,
            alloc_size,
        }
    }

    /// Ensures the buffer has at least `capacity` bytes available.
    pub fn ensure_capacity(&mut self, capacity: usize) {
        let remaining = self.uint8.len() - self.x;
        if remaining < capacity {
            let total = self.uint8.len() - self.x0;
            let required = capacity - remaining;
            let total_required = total + required;
            let new_size = if total_required <= self.alloc_size {
                self.alloc_size
            } else {
                total_required * 2
            };
            self.grow(new_size);
        }
    }

    fn grow(&mut self, new_size: usize) {
        let x0 = self.x0;
        let x = self.x;
        let mut new_buf = vec![0u8; new_size];
        new_buf[..x - x0].copy_from_slice(&self.uint8[x0..x]);
        self.uint8 = new_buf;
        self.x = x - x0;
        self.x0 = 0;
    }

    /// Resets the flush position.
    pub fn reset(&mut self) {
        self.x0 = self.x;
    }

    /// Number of bytes written since the last flush.
    pub fn written(&self) -> usize {
        self.x - self.x0
    }

    /// Returns the written data and advances the flush position.
    pub fn flush(&mut self) -> Vec<u8> {
        let result = self.uint8[self.x0..self.x].to_vec();
        self.x0 = self.x;
        result
    }

    /// Writes a single byte.
    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.ensure_capacity(1);
        self.uint8[self.x] = val;
        self.x += 1;
    }

    /// Writes four bytes at once (big-endian). Handy for 4-character ASCII
    /// tokens such as `null` (0x6e756c6c) and `true` (0x74727565).
    #[inline]
    pub fn u32(&mut self, val: u32) {
        self.ensure_capacity(4);
        let bytes = val.to_be_bytes();
        self.uint8[self.x..self.x + 4].copy_from_slice(&bytes);
        self.x += 4;
    }

    /// Writes a byte slice.
    pub fn buf(&mut self, buf: &[u8]) {
        let length = buf.len();
        self.ensure_capacity(length);
        self.uint8[self.x..self.x + length].copy_from_slice(buf);
        self.x += length;
    }

    /// Writes a UTF-8 string. Returns the number of bytes written.
    pub fn utf8(&mut self, s: &str) -> usize {
        let bytes = s.as_bytes();
        let length = bytes.len();
        self.ensure_capacity(length);
        self.uint8[self.x..self.x + length].copy_from_slice(bytes);
        self.x += length;
        length
    }

    /// Writes an ASCII string.
    pub fn ascii(&mut self, s: &str) {
        self.utf8(s); // ASCII is a subset of UTF-8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8() {
        let mut writer = Writer::new();
        writer.u8(b'{');
        writer.u8(b'}');
        assert_eq!(writer.flush(), b"{}");
    }

    #[test]
    fn test_u32_ascii_token() {
        let mut writer = Writer::new();
        writer.u32(0x6e756c6c);
        assert_eq!(writer.flush(), b"null");
    }

    #[test]
    fn test_utf8() {
        let mut writer = Writer::new();
        writer.utf8("hello");
        assert_eq!(writer.flush(), b"hello");
    }

    #[test]
    fn test_flush_multiple() {
        let mut writer = Writer::new();
        writer.u8(b'a');
        assert_eq!(writer.flush(), b"a");
        writer.u8(b'b');
        assert_eq!(writer.flush(), b"b");
    }

    #[test]
    fn test_grow_past_alloc_size() {
        let mut writer = Writer::with_alloc_size(4);
        writer.buf(b"0123456789abcdef");
        writer.utf8("more");
        assert_eq!(writer.flush(), b"0123456789abcdefmore");
    }

    #[test]
    fn test_written_and_reset() {
        let mut writer = Writer::new();
        writer.ascii("xyz");
        assert_eq!(writer.written(), 3);
        writer.reset();
        assert_eq!(writer.written(), 0);
    }
}
