//! # OxiVC LZHuf
//!
//! Pure Rust decompression for the Huffman-based Virtual Console codecs:
//!
//! - **Huf8**: 8-bit Huffman coding over a packed node table
//! - **LZH8**: LZSS whose literals, lengths and displacement lengths are
//!   Huffman coded with two packed node tables
//! - **Romchu**: N64 `romc` type 2, block-structured LZ77 with per-block
//!   canonical Huffman tables
//!
//! ## Example
//!
//! ```rust
//! use oxivc_lzhuf::huf8;
//!
//! let blob = [
//!     0x28, 0x06, 0x00, 0x00, 0x02, // header: 6 bytes, 3 symbols
//!     0x80, b'a', 0xC0, b'b', b'c', // node table
//!     0x00, 0x00, 0x00, 0x59, // bitstream word
//! ];
//! assert_eq!(huf8::decompress(&blob).unwrap(), b"abcaab");
//! ```
//!
//! ## Romchu progress
//!
//! Romchu images can be several megabytes; [`RomchuDecoder`] reports each
//! finished block through a callback:
//!
//! ```rust
//! use oxivc_lzhuf::RomchuDecoder;
//!
//! let body = [0x06, 0x00, 0x00, 0x00, b'X', b'Y', b'Z'];
//! let mut blocks = 0;
//! let out = RomchuDecoder::new()
//!     .decode_body_with_progress(&body, 3, |_| blocks += 1)
//!     .unwrap();
//! assert_eq!(out, b"XYZ");
//! assert_eq!(blocks, 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod canonical;
pub mod huf8;
pub mod lzh8;
pub mod packed;
pub mod romchu;

// Re-exports
pub use canonical::CanonicalHuffmanTable;
pub use huf8::{HUF8_TAG, Huf8Header};
pub use lzh8::{LZH8_TAG, Lzh8Header};
pub use packed::{NodeLayout, PackedTree};
pub use romchu::{BlockProgress, RomchuDecoder};
