//! Romchu (N64 `romc` type 2) decompression.
//!
//! The body after the 4-byte romc header is a sequence of blocks, each
//! starting with a 32-bit header read LSB-first (a little-endian word):
//! bit 0 is the compressed flag and bits 1-31 the block size.
//!
//! - Raw blocks: the size is a byte count; the bytes are copied verbatim.
//! - Compressed blocks: the size is a bit count that includes the 32 header
//!   bits. The payload holds two canonical Huffman tables followed by the
//!   body, all read LSB-first:
//!
//! ```text
//! u16       table 1 size in bits
//! [bits]    table 1 code lengths (0x11D symbols), byte padded
//! u16       table 2 size in bits
//! [bits]    table 2 code lengths (0x1E symbols), byte padded
//! [bits]    body, up to the end of the payload
//! ```
//!
//! Table 1 symbols below 0x100 are literals; the rest select a length class.
//! Each back-reference is followed by a table 2 displacement class. Every
//! sub-stream must have zero padding in its final byte.

use crate::canonical::CanonicalHuffmanTable;
use oxivc_core::bitstream::BitReader;
use oxivc_core::cursor::ByteCursor;
use oxivc_core::error::{Result, VcError};
use oxivc_core::window::{DEFAULT_MAX_OUTPUT_LEN, OutputWindow};
use oxivc_lz77::header::{RomcHeader, RomcKind};

/// Symbols in the literal/length table.
pub const LITLEN_SYMBOLS: usize = 0x11D;
/// Symbols in the displacement table.
pub const DISP_SYMBOLS: usize = 0x1E;

/// Size of a block header in bytes.
const BLOCK_HEADER_SIZE: usize = 4;

/// Length class base values (symbol - 0x100).
const LENGTH_BASE: [u32; 29] = [
    0, 1, 2, 3, 4, 5, 6, 7, // 0 extra bits
    8, 10, 12, 14, // 1 extra bit
    16, 20, 24, 28, // 2 extra bits
    32, 40, 48, 56, // 3 extra bits
    64, 80, 96, 112, // 4 extra bits
    128, 160, 192, 224, // 5 extra bits
    255, // 0 extra bits
];

/// Extra bits for each length class.
const LENGTH_EXTRA: [u8; 29] = [
    0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 0,
];

/// Displacement class base values.
const DISP_BASE: [u32; 30] = [
    0, 1, 2, 3, 4, 6, 8, 12, 16, 24, 32, 48, 64, 96, 128, 192, 256, 384, 512, 768, 1024, 1536,
    2048, 3072, 4096, 6144, 8192, 12288, 16384, 24576,
];

/// Extra bits for each displacement class.
const DISP_EXTRA: [u8; 30] = [
    0, 0, 0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9, 10, 10, 11, 11, 12, 12, 13,
    13,
];

/// Progress report emitted after each block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockProgress {
    /// Zero-based block index.
    pub index: usize,
    /// Whether the block was Huffman-coded.
    pub compressed: bool,
    /// Input bytes consumed so far (after the romc header).
    pub input_offset: usize,
    /// Output bytes produced so far.
    pub output_len: usize,
    /// Declared total output length.
    pub total_len: usize,
}

/// Romchu block decoder.
#[derive(Debug, Clone, Copy)]
pub struct RomchuDecoder {
    /// Reject nonzero padding bits at the end of each sub-stream.
    verify_padding: bool,
    /// Largest nominal output length accepted.
    max_output_len: usize,
}

impl Default for RomchuDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl RomchuDecoder {
    /// Create a decoder with padding verification enabled and the default
    /// output limit.
    pub fn new() -> Self {
        Self {
            verify_padding: true,
            max_output_len: DEFAULT_MAX_OUTPUT_LEN,
        }
    }

    /// Set the largest nominal output length accepted.
    pub fn with_max_output_len(mut self, limit: usize) -> Self {
        self.max_output_len = limit;
        self
    }

    /// Enable or disable padding verification.
    pub fn with_padding_check(mut self, verify: bool) -> Self {
        self.verify_padding = verify;
        self
    }

    /// Decode the block sequence that follows a romc header.
    pub fn decode_body(&self, body: &[u8], nominal_len: usize) -> Result<Vec<u8>> {
        self.decode_body_with_progress(body, nominal_len, |_| {})
    }

    /// Decode the block sequence, reporting after each block.
    pub fn decode_body_with_progress<F>(
        &self,
        body: &[u8],
        nominal_len: usize,
        mut progress: F,
    ) -> Result<Vec<u8>>
    where
        F: FnMut(BlockProgress),
    {
        let mut cursor = ByteCursor::new(body);
        let mut window = OutputWindow::with_limit(nominal_len, self.max_output_len)?;
        let mut index = 0;

        while cursor.remaining() >= BLOCK_HEADER_SIZE {
            let word = cursor.read_u32_le()?;
            let compressed = word & 1 != 0;
            let size = (word >> 1) as usize;

            if compressed {
                let payload_bits = size.checked_sub(BLOCK_HEADER_SIZE * 8).ok_or_else(|| {
                    VcError::huffman_corrupt(format!(
                        "block of {} bits is smaller than its header",
                        size
                    ))
                })?;
                let payload = cursor.take(payload_bits.div_ceil(8))?;
                self.decode_block(payload, payload_bits as u64, &mut window)?;
            } else {
                window.push_slice(cursor.take(size)?)?;
            }

            tracing::debug!(
                block = index,
                compressed,
                size,
                output = window.position(),
                total = nominal_len,
                "romchu block"
            );
            progress(BlockProgress {
                index,
                compressed,
                input_offset: cursor.position(),
                output_len: window.position(),
                total_len: nominal_len,
            });
            index += 1;
        }

        window.finish()
    }

    /// Open an LSB-first sub-stream of exactly `bits` bits at `offset`.
    fn sub_stream<'a>(
        &self,
        payload: &'a [u8],
        offset: usize,
        bits: u64,
    ) -> Result<BitReader<'a>> {
        let data = payload
            .get(offset..)
            .ok_or_else(|| VcError::truncated(payload.len(), offset - payload.len()))?;
        let reader = BitReader::lsb(data).with_bit_limit(bits);
        if self.verify_padding {
            reader.check_padding()?;
        }
        Ok(reader)
    }

    /// Decode one compressed block into `window`.
    fn decode_block(
        &self,
        payload: &[u8],
        payload_bits: u64,
        window: &mut OutputWindow,
    ) -> Result<()> {
        let mut whole = self.sub_stream(payload, 0, payload_bits)?;
        let table1_bits = whole.read_bits(16)? as usize;
        let mut reader = self.sub_stream(payload, 2, table1_bits as u64)?;
        let litlen = CanonicalHuffmanTable::read(&mut reader, LITLEN_SYMBOLS)?;

        let table2_offset = 2 + table1_bits.div_ceil(8);
        let table2_bits = ByteCursor::at(payload, table2_offset).read_u16_le()? as usize;
        let mut reader = self.sub_stream(payload, table2_offset + 2, table2_bits as u64)?;
        let disp = CanonicalHuffmanTable::read(&mut reader, DISP_SYMBOLS)?;

        let body_offset = table2_offset + 2 + table2_bits.div_ceil(8);
        let body_bits = payload_bits
            .checked_sub(body_offset as u64 * 8)
            .ok_or_else(|| {
                VcError::truncated(
                    payload.len(),
                    body_offset.saturating_sub(payload.len()).max(1),
                )
            })?;
        let mut reader = self.sub_stream(payload, body_offset, body_bits)?;

        tracing::trace!(table1_bits, table2_bits, body_bits, "romchu tables");

        while !reader.is_exhausted() {
            let symbol = litlen.decode_symbol(&mut reader)? as usize;
            if symbol < 0x100 {
                window.push_literal(symbol as u8)?;
                continue;
            }

            let class = symbol - 0x100;
            let mut length = LENGTH_BASE[class] as usize;
            if LENGTH_EXTRA[class] > 0 {
                length += reader.read_bits(LENGTH_EXTRA[class])? as usize;
            }
            length += 3;

            let class = disp.decode_symbol(&mut reader)? as usize;
            let mut distance = DISP_BASE[class] as usize;
            if DISP_EXTRA[class] > 0 {
                distance += reader.read_bits(DISP_EXTRA[class])? as usize;
            }
            distance += 1;

            window.copy_backref(length, distance)?;
        }

        Ok(())
    }
}

/// Decompress a complete romc type 2 blob (header included).
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    decompress_with_progress(data, |_| {})
}

/// Decompress a complete romc type 2 blob, reporting after each block.
pub fn decompress_with_progress<F>(data: &[u8], progress: F) -> Result<Vec<u8>>
where
    F: FnMut(BlockProgress),
{
    let header = RomcHeader::parse(data)?;
    if header.kind != RomcKind::Romchu {
        return Err(VcError::unsupported_format("romc type 1 is LZSS, not Romchu"));
    }
    tracing::debug!(length = header.uncompressed_len, "romchu header");

    RomchuDecoder::new().decode_body_with_progress(
        &data[RomcHeader::SIZE..],
        header.uncompressed_len,
        progress,
    )
}
