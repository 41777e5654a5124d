// A growable byte buffer backing every string-stack slot.
//
// The original chew.c buffer is a fixed-size malloc'd block that doubles on
// overflow and never releases memory until the slot is freed. In a managed
// target language the doubling is just `Vec`'s own growth policy, so this
// wraps a `Vec<u8>` rather than hand-rolling capacity arithmetic.

#[derive(Debug, Default, Clone)]
pub struct ByteBuffer {
    data: Vec<u8>,
}

impl ByteBuffer {
    pub fn new() -> Self {
        ByteBuffer { data: Vec::new() }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        ByteBuffer { data: bytes.to_vec() }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_str_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn push_byte(&mut self, b: u8) {
        self.data.push(b);
    }

    pub fn append_slice(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    pub fn append(&mut self, other: &ByteBuffer) {
        self.data.extend_from_slice(&other.data);
    }

    /// Reads are 0-past-end, matching the sentinel byte the original scan
    /// buffer relies on instead of an explicit bounds check everywhere.
    pub fn at(&self, idx: usize) -> u8 {
        self.data.get(idx).copied().unwrap_or(0)
    }

    /// Drops exactly one byte from the end, if any. Used by `remchar` and by
    /// `strip_trailing_newlines`'s trim loop.
    pub fn drop_last(&mut self) {
        self.data.pop();
    }

    pub fn replace(&mut self, bytes: Vec<u8>) {
        self.data = bytes;
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_past_end_is_zero() {
        let b = ByteBuffer::from_bytes(b"ab");
        assert_eq!(b.at(0), b'a');
        assert_eq!(b.at(1), b'b');
        assert_eq!(b.at(2), 0);
        assert_eq!(b.at(100), 0);
    }

    #[test]
    fn append_grows_in_place() {
        let mut b = ByteBuffer::from_bytes(b"foo");
        let tail = ByteBuffer::from_bytes(b"bar");
        b.append(&tail);
        assert_eq!(b.as_bytes(), b"foobar");
    }

    #[test]
    fn drop_last_is_noop_on_empty() {
        let mut b = ByteBuffer::new();
        b.drop_last();
        assert!(b.is_empty());
    }
}
