//! Bit-level reading over an in-memory byte slice.
//!
//! This module provides [`BitReader`], a cursor that hands out bits one byte
//! refill at a time. The Virtual Console formats disagree on bit order, so the
//! reader is parameterized by [`BitOrder`]:
//!
//! - **MSB-first** (LZH8): the most significant remaining bit of the stream is
//!   the most significant bit of the returned value.
//! - **LSB-first** (Romchu): bits come from the low end of each byte and the
//!   first bit read becomes the least significant bit of the returned value.
//!
//! A reader may be limited to an exact number of bits, which is how Romchu
//! carves its per-block table and body sub-streams out of a shared payload.
//!
//! # Example
//!
//! ```
//! use oxivc_core::bitstream::BitReader;
//!
//! let mut msb = BitReader::msb(&[0b1010_0000]);
//! assert_eq!(msb.read_bits(3).unwrap(), 0b101);
//!
//! let mut lsb = BitReader::lsb(&[0b0000_0101]);
//! assert_eq!(lsb.read_bits(3).unwrap(), 0b101);
//! ```

use crate::error::{Result, VcError};

/// Order in which bits are taken from each byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitOrder {
    /// Most significant bit first.
    Msb,
    /// Least significant bit first.
    Lsb,
}

/// A bit-level reader over a byte slice.
///
/// All state lives in the reader itself; each decode call creates its own.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    /// Input data.
    data: &'a [u8],
    /// Bit order within each byte.
    order: BitOrder,
    /// Index of the next byte to fetch.
    byte_pos: usize,
    /// Unconsumed bits of the current byte.
    current: u32,
    /// Number of valid bits left in `current`.
    bits_in_current: u8,
    /// Bits not yet fetched from `data` (bounded by the bit limit).
    bits_unfetched: u64,
    /// Exact bit length, if the stream was limited.
    limit: Option<u64>,
    /// Total bits read (for error reporting).
    total_bits_read: u64,
}

impl<'a> BitReader<'a> {
    /// Create a new reader with the given bit order.
    pub fn new(data: &'a [u8], order: BitOrder) -> Self {
        Self {
            data,
            order,
            byte_pos: 0,
            current: 0,
            bits_in_current: 0,
            bits_unfetched: data.len() as u64 * 8,
            limit: None,
            total_bits_read: 0,
        }
    }

    /// Create an MSB-first reader.
    pub fn msb(data: &'a [u8]) -> Self {
        Self::new(data, BitOrder::Msb)
    }

    /// Create an LSB-first reader.
    pub fn lsb(data: &'a [u8]) -> Self {
        Self::new(data, BitOrder::Lsb)
    }

    /// Restrict the stream to exactly `bits` bits.
    ///
    /// Must be applied before any bits are read. The final byte may be
    /// partial; see [`check_padding`](Self::check_padding).
    pub fn with_bit_limit(mut self, bits: u64) -> Self {
        debug_assert_eq!(self.total_bits_read, 0, "limit applied after reading");
        self.bits_unfetched = bits;
        self.limit = Some(bits);
        self
    }

    /// Get the bit order of this reader.
    pub fn order(&self) -> BitOrder {
        self.order
    }

    /// Number of bits still available.
    pub fn remaining_bits(&self) -> u64 {
        self.bits_unfetched + self.bits_in_current as u64
    }

    /// Whether every available bit has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.remaining_bits() == 0
    }

    /// Number of bytes fetched from the underlying slice so far.
    pub fn bytes_consumed(&self) -> usize {
        self.byte_pos
    }

    /// Get the current bit position (for error reporting).
    pub fn bit_position(&self) -> u64 {
        self.total_bits_read
    }

    /// Verify that the padding bits after the bit limit are zero.
    ///
    /// Only the unused part of the final partial byte is inspected. A reader
    /// without a limit, or with a byte-aligned one, always passes.
    pub fn check_padding(&self) -> Result<()> {
        let Some(limit) = self.limit else {
            return Ok(());
        };
        let used = (limit % 8) as u32;
        if used == 0 {
            return Ok(());
        }

        let index = (limit / 8) as usize;
        let byte = *self
            .data
            .get(index)
            .ok_or_else(|| VcError::truncated(index, 1))? as u32;
        let padding = match self.order {
            BitOrder::Lsb => byte & !((1u32 << used) - 1) & 0xFF,
            BitOrder::Msb => byte & ((1u32 << (8 - used)) - 1),
        };

        if padding != 0 {
            return Err(VcError::huffman_corrupt(format!(
                "nonzero padding {:#04x} at end of {}-bit stream",
                padding, limit
            )));
        }
        Ok(())
    }

    /// Fetch the next byte into `current`.
    #[inline]
    fn refill(&mut self) -> Result<()> {
        if self.bits_unfetched == 0 {
            return Err(VcError::truncated(self.byte_pos, 1));
        }
        let byte = *self
            .data
            .get(self.byte_pos)
            .ok_or_else(|| VcError::truncated(self.byte_pos, 1))?;
        self.byte_pos += 1;

        let take = self.bits_unfetched.min(8) as u8;
        self.bits_unfetched -= take as u64;
        self.current = byte as u32;
        self.bits_in_current = take;
        Ok(())
    }

    /// Read up to 32 bits from the stream.
    ///
    /// # Arguments
    ///
    /// * `count` - Number of bits to read (0-32)
    ///
    /// # Returns
    ///
    /// The bits read, assembled according to the reader's [`BitOrder`].
    pub fn read_bits(&mut self, count: u8) -> Result<u32> {
        debug_assert!(count <= 32, "Cannot read more than 32 bits at once");

        let mut value = 0u64;
        let mut produced = 0u8;

        while produced < count {
            if self.bits_in_current == 0 {
                self.refill()?;
            }

            let take = self.bits_in_current.min(count - produced);
            let mask = (1u32 << take) - 1;

            match self.order {
                BitOrder::Msb => {
                    // `current` is kept aligned so its next bit sits at bit 7.
                    let chunk = (self.current >> (8 - take)) & mask;
                    value = (value << take) | chunk as u64;
                    self.current = (self.current << take) & 0xFF;
                }
                BitOrder::Lsb => {
                    let chunk = self.current & mask;
                    value |= (chunk as u64) << produced;
                    self.current >>= take;
                }
            }

            self.bits_in_current -= take;
            produced += take;
        }

        self.total_bits_read += count as u64;
        Ok(value as u32)
    }

    /// Read a single bit.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? != 0)
    }
}
