//! # OxiVC LZ77
//!
//! Pure Rust decompression for the LZ77 family used by Virtual Console titles:
//!
//! - **Type 0x10**: classic LZSS, 2-byte back-references (length 3-18)
//! - **Type 0x11**: extended LZSS, 2/3/4-byte back-references (length 1-65808)
//! - **N64 romc type 1**: the 0x10 token stream behind a big-endian header
//!
//! All three share a 4096-byte window and the same flag-byte grouping.
//!
//! ## Example
//!
//! ```rust
//! use oxivc_lz77::decompress;
//!
//! let blob = [0x10, 0x0A, 0x00, 0x00, 0x10, b'a', b'b', b'c', 0x30, 0x02, b'X'];
//! assert_eq!(decompress(&blob).unwrap(), b"abcabcabcX");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod decode;
pub mod header;

// Re-exports
pub use decode::{
    Lz77Decoder, decompress, decompress_romc, decompress_romc_with_limit, decompress_with_limit,
};
pub use header::{LZ77_MAGIC, Lz77Header, Lz77Variant, RomcHeader, RomcKind};
