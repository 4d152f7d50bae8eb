//! Packed Huffman node tables (Huf8 and LZH8).
//!
//! Nintendo stores these trees as a flat array of node words. Each inner node
//! holds a child-pair offset in its low bits and two leaf flags above it:
//!
//! ```text
//! pair  = ((i + 1) / 2 * 2) + 1 + (node & offset_mask) * 2
//! child = pair + bit             (bit 0 = left, bit 1 = right)
//! leaf  = node & (bit ? right_leaf : left_leaf)
//! ```
//!
//! When the chosen child is flagged as a leaf, the word at `child` is the
//! decoded value; otherwise decoding continues at `child`. Indices are
//! 0-based with the root at 0.

use oxivc_core::error::{Result, VcError};

/// Bit layout of a node word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeLayout {
    /// Mask selecting the child-pair offset.
    pub offset_mask: u16,
    /// Flag marking the left child as a leaf.
    pub left_leaf: u16,
    /// Flag marking the right child as a leaf.
    pub right_leaf: u16,
}

impl NodeLayout {
    /// Huf8: 8-bit nodes, 6-bit offset.
    pub const HUF8: Self = Self {
        offset_mask: 0x3F,
        left_leaf: 0x80,
        right_leaf: 0x40,
    };

    /// LZH8 literal/length table: 9-bit nodes, 7-bit offset.
    pub const LZH8_LENGTH: Self = Self {
        offset_mask: 0x7F,
        left_leaf: 0x100,
        right_leaf: 0x80,
    };

    /// LZH8 displacement-length table: 5-bit nodes, 3-bit offset.
    pub const LZH8_DISPLEN: Self = Self {
        offset_mask: 0x07,
        left_leaf: 0x10,
        right_leaf: 0x08,
    };
}

/// Result of following one bit from a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Reached a leaf carrying this value.
    Leaf(u16),
    /// Continue at this inner node.
    Inner(usize),
}

/// A packed node table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedTree {
    nodes: Vec<u16>,
    layout: NodeLayout,
}

impl PackedTree {
    /// Wrap a node array with the given layout.
    pub fn new(nodes: Vec<u16>, layout: NodeLayout) -> Self {
        Self { nodes, layout }
    }

    /// Build a Huf8 tree from its on-disk bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(bytes.iter().map(|&b| b as u16).collect(), NodeLayout::HUF8)
    }

    /// Number of node words.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the table has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Follow `bit` from node `index`.
    pub fn step(&self, index: usize, bit: bool) -> Result<Step> {
        let node = *self
            .nodes
            .get(index)
            .ok_or_else(|| self.out_of_range(index))?;

        let next = ((index + 1) / 2 * 2) + 1 + (node & self.layout.offset_mask) as usize * 2
            + bit as usize;
        let value = *self.nodes.get(next).ok_or_else(|| self.out_of_range(next))?;

        let flag = if bit {
            self.layout.right_leaf
        } else {
            self.layout.left_leaf
        };
        if node & flag != 0 {
            Ok(Step::Leaf(value))
        } else {
            Ok(Step::Inner(next))
        }
    }

    /// Decode one value, pulling bits from `next_bit`.
    ///
    /// `position` is the output cursor, used only for error reporting.
    pub fn decode<F>(&self, mut next_bit: F, position: usize) -> Result<u16>
    where
        F: FnMut() -> Result<bool>,
    {
        let mut index = 0;
        loop {
            match self.step(index, next_bit()?)? {
                Step::Leaf(value) => return Ok(value),
                Step::Inner(next) if next == index => {
                    return Err(VcError::decode_loop(index, position));
                }
                Step::Inner(next) => index = next,
            }
        }
    }

    fn out_of_range(&self, index: usize) -> VcError {
        VcError::huffman_corrupt(format!(
            "node {} outside {}-entry table",
            index,
            self.nodes.len()
        ))
    }
}
