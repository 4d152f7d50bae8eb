//! Huf8 decompression.
//!
//! Huf8 is a pure 8-bit Huffman coder:
//!
//! ```text
//! 0x00       u32 LE    bits 0-7: 0x28, bits 8-31: uncompressed length
//! 0x04       u8        symbol count - 1
//! 0x05       [u8]      packed node table, 2 * symbol count - 1 bytes
//! ...        [u32 LE]  bitstream, each word consumed from bit 31 down
//! ```

use crate::packed::PackedTree;
use oxivc_core::cursor::ByteCursor;
use oxivc_core::error::{Result, VcError};
use oxivc_core::window::{DEFAULT_MAX_OUTPUT_LEN, OutputWindow};

/// Huf8 type byte.
pub const HUF8_TAG: u8 = 0x28;

/// Parsed Huf8 header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Huf8Header {
    /// Declared uncompressed length.
    pub uncompressed_len: usize,
    /// Number of leaf symbols in the tree.
    pub symbol_count: usize,
}

impl Huf8Header {
    /// Size of the fixed header in bytes.
    pub const SIZE: usize = 5;

    /// Parse the header at the start of `data`.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut cursor = ByteCursor::new(data);
        let word = cursor.read_u32_le()?;
        if word & 0xFF != HUF8_TAG as u32 {
            return Err(VcError::unsupported_format(format!(
                "Huf8 type byte {:#04x}",
                word & 0xFF
            )));
        }
        let symbol_count = cursor.read_u8()? as usize + 1;

        Ok(Self {
            uncompressed_len: (word >> 8) as usize,
            symbol_count,
        })
    }

    /// Size of the node table in bytes.
    pub fn table_len(&self) -> usize {
        self.symbol_count * 2 - 1
    }

    /// Offset of the first bitstream word.
    pub fn data_offset(&self) -> usize {
        Self::SIZE + self.table_len()
    }
}

/// Bits pulled from 32-bit little-endian words, most significant first.
struct WordBits<'a> {
    cursor: ByteCursor<'a>,
    word: u32,
    left: u8,
}

impl<'a> WordBits<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self {
            cursor: ByteCursor::new(data),
            word: 0,
            left: 0,
        }
    }

    fn next_bit(&mut self) -> Result<bool> {
        if self.left == 0 {
            self.word = self.cursor.read_u32_le()?;
            self.left = 32;
        }
        let bit = self.word & 0x8000_0000 != 0;
        self.word <<= 1;
        self.left -= 1;
        Ok(bit)
    }
}

/// Decompress a Huf8 blob, capping the declared length at
/// [`DEFAULT_MAX_OUTPUT_LEN`].
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    decompress_with_limit(data, DEFAULT_MAX_OUTPUT_LEN)
}

/// Decompress a Huf8 blob whose declared length must not exceed `limit`.
pub fn decompress_with_limit(data: &[u8], limit: usize) -> Result<Vec<u8>> {
    let header = Huf8Header::parse(data)?;
    if header.uncompressed_len > limit {
        return Err(VcError::output_too_large(header.uncompressed_len, limit));
    }
    let table = ByteCursor::at(data, Huf8Header::SIZE).take(header.table_len())?;
    let tree = PackedTree::from_bytes(table);

    tracing::debug!(
        length = header.uncompressed_len,
        symbols = header.symbol_count,
        "huf8 header"
    );

    let mut bits = WordBits::new(&data[header.data_offset()..]);
    let mut window = OutputWindow::new(header.uncompressed_len);

    while !window.is_full() {
        let position = window.position();
        let value = tree.decode(|| bits.next_bit(), position)?;
        window.push_literal(value as u8)?;
    }

    window.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header() {
        let header = Huf8Header::parse(&[0x28, 0x06, 0x00, 0x00, 0x02]).unwrap();
        assert_eq!(header.uncompressed_len, 6);
        assert_eq!(header.symbol_count, 3);
        assert_eq!(header.table_len(), 5);
        assert_eq!(header.data_offset(), 10);
    }

    #[test]
    fn test_wrong_tag() {
        let err = Huf8Header::parse(&[0x24, 0x06, 0x00, 0x00, 0x02]).unwrap_err();
        assert!(matches!(err, VcError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_word_bits_order() {
        // Word 0x80000001: first bit set, then 30 clear, then set.
        let mut bits = WordBits::new(&[0x01, 0x00, 0x00, 0x80]);
        assert!(bits.next_bit().unwrap());
        for _ in 0..30 {
            assert!(!bits.next_bit().unwrap());
        }
        assert!(bits.next_bit().unwrap());
        assert!(matches!(
            bits.next_bit(),
            Err(VcError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn test_limit() {
        let data = [0x28, 0x06, 0x00, 0x00, 0x02];
        let err = decompress_with_limit(&data, 5).unwrap_err();
        assert_eq!(err, VcError::output_too_large(6, 5));
    }

    #[test]
    fn test_zero_length() {
        let data = [0x28, 0x00, 0x00, 0x00, 0x00, 0x00];
        assert!(decompress(&data).unwrap().is_empty());
    }
}
