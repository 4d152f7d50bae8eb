//! Canonical Huffman tables for Romchu.
//!
//! A table is transmitted as a run-length coded list of 5-bit code lengths,
//! one per symbol. Codes are assigned canonically: within each length, codes
//! are consecutive integers in symbol order. The codes are then inserted into
//! an index arena so that decoding walks one bit at a time from the root
//! (0 = left, 1 = right).

use oxivc_core::BitReader;
use oxivc_core::error::{Result, VcError};

/// Number of distinct code lengths a 5-bit length field can describe.
pub const MAX_CODE_LENGTHS: usize = 32;

/// Child slot of an arena node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Child {
    /// No code passes through this slot.
    Empty,
    /// Index of an inner node.
    Node(u32),
    /// Terminal symbol.
    Leaf(u16),
}

/// Canonical Huffman decoding table backed by a node arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalHuffmanTable {
    /// Inner nodes as `[left, right]`; index 0 is the root.
    nodes: Vec<[Child; 2]>,
    /// Number of symbols the table was built for.
    symbol_count: usize,
}

impl CanonicalHuffmanTable {
    /// Read a run-length coded length list and build the table.
    ///
    /// The reader must be limited to the table's bit size: every bit has to
    /// be consumed by the last run.
    pub fn read(reader: &mut BitReader<'_>, symbol_count: usize) -> Result<Self> {
        let lengths = read_lengths(reader, symbol_count)?;
        if !reader.is_exhausted() {
            return Err(VcError::huffman_corrupt(format!(
                "{} unused bits after code lengths",
                reader.remaining_bits()
            )));
        }
        Self::from_lengths(&lengths)
    }

    /// Build a table from per-symbol code lengths (0 = symbol absent).
    pub fn from_lengths(lengths: &[u8]) -> Result<Self> {
        let symbol_count = lengths.len();

        // Count codes of each length
        let mut len_count = [0u64; MAX_CODE_LENGTHS];
        for &len in lengths {
            let len = len as usize;
            if len >= MAX_CODE_LENGTHS {
                return Err(VcError::huffman_corrupt(format!("code length {}", len)));
            }
            len_count[len] += 1;
        }
        len_count[0] = 0;

        // First code of each length
        let mut next_code = [0u64; MAX_CODE_LENGTHS];
        let mut accum = 0u64;
        for len in 1..MAX_CODE_LENGTHS {
            accum = (accum + len_count[len - 1]) << 1;
            next_code[len] = accum;
        }

        let capacity = symbol_count * 2;
        let mut nodes = Vec::with_capacity(capacity);
        nodes.push([Child::Empty; 2]);

        for (symbol, &len) in lengths.iter().enumerate() {
            if len == 0 {
                continue;
            }
            let code = next_code[len as usize];
            next_code[len as usize] += 1;
            insert_code(&mut nodes, capacity, code, len, symbol as u16)?;
        }

        Ok(Self {
            nodes,
            symbol_count,
        })
    }

    /// Number of symbols in the alphabet.
    pub fn symbol_count(&self) -> usize {
        self.symbol_count
    }

    /// Decode one symbol.
    pub fn decode_symbol(&self, reader: &mut BitReader<'_>) -> Result<u16> {
        let mut node = 0usize;
        loop {
            let bit = reader.read_bit()? as usize;
            match self.nodes[node][bit] {
                Child::Leaf(symbol) => return Ok(symbol),
                Child::Node(next) => node = next as usize,
                Child::Empty => {
                    return Err(VcError::huffman_corrupt(format!(
                        "no code continues through node {} at bit {}",
                        node,
                        reader.bit_position()
                    )));
                }
            }
        }
    }
}

/// Read `symbol_count` code lengths.
///
/// Each run starts with a 1-bit tag. `1`: a 7-bit count (+2) and a single
/// 5-bit length shared by the whole run. `0`: a 7-bit count (+1) followed by
/// that many 5-bit lengths.
pub fn read_lengths(reader: &mut BitReader<'_>, symbol_count: usize) -> Result<Vec<u8>> {
    let mut lengths = vec![0u8; symbol_count];
    let mut i = 0;

    while i < symbol_count {
        let equal = reader.read_bit()?;
        let count = reader.read_bits(7)? as usize + if equal { 2 } else { 1 };

        if i + count > symbol_count {
            return Err(VcError::huffman_corrupt(format!(
                "length run of {} at symbol {} overflows {} symbols",
                count, i, symbol_count
            )));
        }

        if equal {
            let len = reader.read_bits(5)? as u8;
            lengths[i..i + count].fill(len);
        } else {
            for slot in &mut lengths[i..i + count] {
                *slot = reader.read_bits(5)? as u8;
            }
        }
        i += count;
    }

    Ok(lengths)
}

/// Insert one code, walking its bits from most to least significant.
fn insert_code(
    nodes: &mut Vec<[Child; 2]>,
    capacity: usize,
    code: u64,
    len: u8,
    symbol: u16,
) -> Result<()> {
    let mut node = 0usize;

    for j in (1..len).rev() {
        let bit = ((code >> j) & 1) as usize;
        node = match nodes[node][bit] {
            Child::Node(next) => next as usize,
            Child::Leaf(other) => {
                return Err(VcError::huffman_corrupt(format!(
                    "code for symbol {} passes through leaf {}",
                    symbol, other
                )));
            }
            Child::Empty => {
                if nodes.len() >= capacity {
                    return Err(VcError::huffman_corrupt(format!(
                        "tree exceeds {} nodes",
                        capacity
                    )));
                }
                let next = nodes.len();
                nodes.push([Child::Empty; 2]);
                nodes[node][bit] = Child::Node(next as u32);
                next
            }
        };
    }

    let bit = (code & 1) as usize;
    if nodes[node][bit] != Child::Empty {
        return Err(VcError::huffman_corrupt(format!(
            "code for symbol {} collides with an existing code",
            symbol
        )));
    }
    nodes[node][bit] = Child::Leaf(symbol);
    Ok(())
}
