//! Byte-granular reader for headers and token streams.
//!
//! The LZ77 token stream and every container header are byte aligned, so they
//! are read through a [`ByteCursor`] rather than a [`BitReader`](crate::BitReader).
//! Running off the end of the slice is reported as
//! [`VcError::TruncatedInput`].

use crate::error::{Result, VcError};

/// A forward-only cursor over a byte slice.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Create a cursor starting at `pos`.
    pub fn at(data: &'a [u8], pos: usize) -> Self {
        Self { data, pos }
    }

    /// Current byte offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Slice of everything after the cursor.
    pub fn rest(&self) -> &'a [u8] {
        self.data.get(self.pos..).unwrap_or(&[])
    }

    /// Take the next `len` bytes.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .ok_or_else(|| VcError::truncated(self.pos, len - self.remaining().min(len)))?;
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    /// Advance the cursor by `len` bytes.
    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.take(len).map(|_| ())
    }

    /// Look at the next `len` bytes without consuming them.
    pub fn peek(&self, len: usize) -> Option<&'a [u8]> {
        self.data.get(self.pos..self.pos.checked_add(len)?)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Read one byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.array::<1>()?[0])
    }

    /// Read a big-endian u16.
    pub fn read_u16_be(&mut self) -> Result<u16> {
        self.array().map(u16::from_be_bytes)
    }

    /// Read a little-endian u16.
    pub fn read_u16_le(&mut self) -> Result<u16> {
        self.array().map(u16::from_le_bytes)
    }

    /// Read a big-endian u32.
    pub fn read_u32_be(&mut self) -> Result<u32> {
        self.array().map(u32::from_be_bytes)
    }

    /// Read a little-endian u32.
    pub fn read_u32_le(&mut self) -> Result<u32> {
        self.array().map(u32::from_le_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers() {
        let data = [0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC];
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.read_u16_be().unwrap(), 0x1234);
        assert_eq!(cursor.read_u16_le().unwrap(), 0x7856);
        assert_eq!(cursor.read_u8().unwrap(), 0x9A);
        assert_eq!(cursor.remaining(), 1);

        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.read_u32_le().unwrap(), 0x7856_3412);
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.read_u32_be().unwrap(), 0x1234_5678);
    }

    #[test]
    fn test_truncated_take() {
        let data = [1, 2, 3];
        let mut cursor = ByteCursor::at(&data, 1);
        let err = cursor.read_u32_le().unwrap_err();
        assert_eq!(err, VcError::truncated(1, 2));
        // A failed read leaves the cursor in place.
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.rest(), &[2, 3]);
    }

    #[test]
    fn test_peek() {
        let data = *b"LZ77\x10";
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.peek(4), Some(&b"LZ77"[..]));
        cursor.skip(4).unwrap();
        assert_eq!(cursor.peek(4), None);
        assert_eq!(cursor.read_u8().unwrap(), 0x10);
    }
}
