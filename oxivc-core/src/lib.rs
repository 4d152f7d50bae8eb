//! # OxiVC Core
//!
//! Core components shared by the OxiVC decompressors.
//!
//! This crate provides the building blocks every codec is written against:
//!
//! - [`bitstream`]: Bit-level reader (MSB-first and LSB-first) over a byte slice
//! - [`cursor`]: Byte-granular header reader
//! - [`window`]: Preallocated output buffer with back-reference copying
//! - [`error`]: Error taxonomy shared by all codecs
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: Dispatch                                            │
//! │     oxivc-formats (tag hint + header sniff), CLI        │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     LZ77 0x10/0x11/romc, Huf8, LZH8, Romchu             │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                              │
//! │     BitReader, ByteCursor, OutputWindow                 │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxivc_core::bitstream::BitReader;
//! use oxivc_core::window::OutputWindow;
//!
//! let mut reader = BitReader::msb(&[0xAB, 0xCD]);
//! assert_eq!(reader.read_bits(12).unwrap(), 0xABC);
//!
//! let mut window = OutputWindow::new(4);
//! window.push_literal(b'x').unwrap();
//! window.copy_backref(3, 1).unwrap();
//! assert_eq!(window.finish().unwrap(), b"xxxx");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod cursor;
pub mod error;
pub mod window;

// Re-exports for convenience
pub use bitstream::{BitOrder, BitReader};
pub use cursor::ByteCursor;
pub use error::{Result, VcError};
pub use window::{DEFAULT_MAX_OUTPUT_LEN, OutputWindow, Token};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::{BitOrder, BitReader};
    pub use crate::cursor::ByteCursor;
    pub use crate::error::{Result, VcError};
    pub use crate::window::{OutputWindow, Token};
}
