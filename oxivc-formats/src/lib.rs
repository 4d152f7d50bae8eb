//! # OxiVC Formats
//!
//! Single entry point over every OxiVC codec. A blob is identified either by
//! the container tag it was stored under ([`TagHint`]) or by probing its
//! header, then handed to the matching decoder:
//!
//! | Tag    | Header byte  | Format                          |
//! |--------|--------------|---------------------------------|
//! | `LZ77` | `0x10`       | [`Format::Lz10`]                |
//! | `LZ77` | `0x11`       | [`Format::Lz11`]                |
//! | `Huf8` | `0x28`       | [`Format::Huf8`]                |
//! | `LZH8` | `0x40`       | [`Format::Lzh8`]                |
//! | `romc` | type bits 1  | [`Format::RomcLzss`]            |
//! | `romc` | type bits 2  | [`Format::Romchu`]              |
//!
//! ## Example
//!
//! ```rust
//! use oxivc_formats::{Format, TagHint, decode, detect};
//!
//! let blob = [0x10, 0x0A, 0x00, 0x00, 0x10, b'a', b'b', b'c', 0x30, 0x02, b'X'];
//! assert_eq!(detect(None, &blob).unwrap().format, Format::Lz10);
//! assert_eq!(decode(Some(TagHint::Lz77), &blob).unwrap(), b"abcabcabcX");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod decode;
pub mod detect;

// Re-exports
pub use config::DecodeConfig;
pub use decode::{decode, decode_detected, decode_with_config, decode_with_progress};
pub use detect::{Format, FormatHeader, TagHint, detect};
pub use oxivc_core::{Result, VcError};
pub use oxivc_lzhuf::BlockProgress;
