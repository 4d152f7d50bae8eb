//! LZH8 decompression.
//!
//! LZH8 is LZSS with two packed Huffman trees: one for literal bytes and
//! back-reference lengths, one for the bit length of the displacement.
//!
//! ```text
//! 0x00     u32 LE   bits 0-7: 0x40, bits 8-31: uncompressed length
//! [0x04]   u32 LE   uncompressed length, only when bits 8-31 are zero
//!
//! length table     u16 LE n, then 9-bit MSB-first node words;
//!                  (n + 1) * 4 bytes including n
//! displen table    u8 m, then 5-bit MSB-first node words;
//!                  (m + 1) * 4 bytes including m
//! body             MSB-first bitstream
//! ```
//!
//! In the body, a length-tree value below 0x100 is a literal byte. Any other
//! value `v` starts a back-reference of `(v & 0xFF) + 3` bytes; the displen
//! tree then yields `d`. For `d == 0` the displacement is 0, otherwise it is
//! a 1 followed by `d - 1` further bits. The copy distance is displacement + 1.

use crate::packed::{NodeLayout, PackedTree};
use oxivc_core::bitstream::BitReader;
use oxivc_core::cursor::ByteCursor;
use oxivc_core::error::{Result, VcError};
use oxivc_core::window::{DEFAULT_MAX_OUTPUT_LEN, OutputWindow};

/// LZH8 type byte.
pub const LZH8_TAG: u8 = 0x40;

/// Bits per length-tree node word.
const LENGTH_BITS: u8 = 9;
/// Bits per displen-tree node word.
const DISPLEN_BITS: u8 = 5;
/// Maximum node words in the length tree.
const LENGTH_TABLE_CAPACITY: usize = (1 << LENGTH_BITS) * 2 - 1;
/// Maximum node words in the displen tree.
const DISPLEN_TABLE_CAPACITY: usize = (1 << DISPLEN_BITS) * 2 - 1;

/// Parsed LZH8 header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lzh8Header {
    /// Declared uncompressed length.
    pub uncompressed_len: usize,
    /// Offset of the length table.
    pub tables_offset: usize,
}

impl Lzh8Header {
    /// Parse the header at the start of `data`.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut cursor = ByteCursor::new(data);
        let word = cursor.read_u32_le()?;
        if word & 0xFF != LZH8_TAG as u32 {
            return Err(VcError::unsupported_format(format!(
                "LZH8 type byte {:#04x}",
                word & 0xFF
            )));
        }

        let mut uncompressed_len = (word >> 8) as usize;
        if uncompressed_len == 0 {
            uncompressed_len = cursor.read_u32_le()? as usize;
        }

        Ok(Self {
            uncompressed_len,
            tables_offset: cursor.position(),
        })
    }
}

/// Read one size-prefixed node table starting at the cursor.
///
/// Node words are read while the bytes fetched stay short of the table end
/// (the size field counts toward the table length). The last word may run
/// into the bytes after the table; those bits are discarded. The cursor is
/// left just past the table.
fn read_tree(
    cursor: &mut ByteCursor<'_>,
    wide_size: bool,
    entry_bits: u8,
    capacity: usize,
    layout: NodeLayout,
) -> Result<PackedTree> {
    let (field_len, size) = if wide_size {
        (2, cursor.read_u16_le()? as usize)
    } else {
        (1, cursor.read_u8()? as usize)
    };
    let table_bytes = (size + 1) * 4;
    let region = cursor.rest();
    cursor.skip(table_bytes - field_len)?;

    let mut reader = BitReader::msb(region);
    let mut nodes = vec![0u16; capacity];
    let mut count = 0;
    while reader.bytes_consumed() + field_len < table_bytes && count < capacity {
        nodes[count] = reader.read_bits(entry_bits)? as u16;
        count += 1;
    }

    tracing::trace!(table_bytes, entries = count, entry_bits, "lzh8 table");
    Ok(PackedTree::new(nodes, layout))
}

/// Decompress an LZH8 blob, capping the declared length at
/// [`DEFAULT_MAX_OUTPUT_LEN`].
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    decompress_with_limit(data, DEFAULT_MAX_OUTPUT_LEN)
}

/// Decompress an LZH8 blob whose declared length must not exceed `limit`.
pub fn decompress_with_limit(data: &[u8], limit: usize) -> Result<Vec<u8>> {
    let header = Lzh8Header::parse(data)?;
    if header.uncompressed_len > limit {
        return Err(VcError::output_too_large(header.uncompressed_len, limit));
    }
    let mut cursor = ByteCursor::at(data, header.tables_offset);

    let length_tree = read_tree(
        &mut cursor,
        true,
        LENGTH_BITS,
        LENGTH_TABLE_CAPACITY,
        NodeLayout::LZH8_LENGTH,
    )?;
    let displen_tree = read_tree(
        &mut cursor,
        false,
        DISPLEN_BITS,
        DISPLEN_TABLE_CAPACITY,
        NodeLayout::LZH8_DISPLEN,
    )?;

    tracing::debug!(
        length = header.uncompressed_len,
        body_offset = cursor.position(),
        "lzh8 header"
    );

    let mut reader = BitReader::msb(cursor.rest());
    let mut window = OutputWindow::new(header.uncompressed_len);

    while !window.is_full() {
        let position = window.position();
        let symbol = length_tree.decode(|| reader.read_bit(), position)?;

        if symbol < 0x100 {
            window.push_literal(symbol as u8)?;
            continue;
        }

        let length = (symbol & 0xFF) as usize + 3;
        let displen = displen_tree.decode(|| reader.read_bit(), position)?;

        let mut displacement = 0usize;
        if displen != 0 {
            displacement = 1;
            for _ in 1..displen {
                displacement = (displacement << 1) | reader.read_bit()? as usize;
            }
        }

        tracing::trace!(length, distance = displacement + 1, position, "lzh8 back-reference");
        window.copy_backref(length, displacement + 1)?;
    }

    window.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packed::Step;

    #[test]
    fn test_header() {
        let header = Lzh8Header::parse(&[0x40, 0x09, 0x00, 0x00]).unwrap();
        assert_eq!(header.uncompressed_len, 9);
        assert_eq!(header.tables_offset, 4);

        let header = Lzh8Header::parse(&[0x40, 0, 0, 0, 0x00, 0x00, 0x01, 0x00]).unwrap();
        assert_eq!(header.uncompressed_len, 0x1_0000);
        assert_eq!(header.tables_offset, 8);
    }

    #[test]
    fn test_wrong_tag() {
        let err = Lzh8Header::parse(&[0x28, 0x09, 0x00, 0x00]).unwrap_err();
        assert!(matches!(err, VcError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_read_tree_stops_at_table_end() {
        // Size field 0: the table is 4 bytes including the field.
        let data = [0x00, 0x84, 0x21, 0xFF, 0xAA];
        let mut cursor = ByteCursor::new(&data);
        let tree = read_tree(
            &mut cursor,
            false,
            DISPLEN_BITS,
            DISPLEN_TABLE_CAPACITY,
            NodeLayout::LZH8_DISPLEN,
        )
        .unwrap();
        assert_eq!(cursor.position(), 4);
        assert_eq!(tree.len(), DISPLEN_TABLE_CAPACITY);
        // Entries 0b10000, 0b10000, ...: root's left child is a leaf.
        assert_eq!(tree.step(0, false).unwrap(), Step::Leaf(0x10));
    }

    #[test]
    fn test_last_word_reads_past_table() {
        // Size field 2: 12 bytes, so the fifth 9-bit word ends beyond the
        // table and takes its last bits from the following byte.
        let mut data = vec![0x02, 0x00];
        data.extend_from_slice(&[0xFF; 10]);
        data.push(0x80);
        let mut cursor = ByteCursor::new(&data);
        let tree = read_tree(
            &mut cursor,
            true,
            LENGTH_BITS,
            LENGTH_TABLE_CAPACITY,
            NodeLayout::LZH8_LENGTH,
        )
        .unwrap();
        assert_eq!(cursor.position(), 12);
        assert_eq!(tree.len(), LENGTH_TABLE_CAPACITY);
    }

    #[test]
    fn test_limit() {
        let data = [0x40, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF];
        let err = decompress(&data).unwrap_err();
        assert_eq!(err, VcError::output_too_large(0xFFFF_FFFF, DEFAULT_MAX_OUTPUT_LEN));

        let err = decompress_with_limit(&[0x40, 0x09, 0x00, 0x00], 8).unwrap_err();
        assert_eq!(err, VcError::output_too_large(9, 8));
    }

    #[test]
    fn test_table_truncated() {
        let data = [0x40, 0x09, 0x00, 0x00, 0x02, 0x00, 0x00];
        let err = decompress(&data).unwrap_err();
        assert!(matches!(err, VcError::TruncatedInput { .. }));
    }
}
