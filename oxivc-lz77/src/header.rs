//! LZ77 container headers.
//!
//! Two header layouts precede the same family of token streams:
//!
//! ```text
//! Wii-style (little-endian):
//!   [ "LZ77" ]            optional 4-byte ASCII magic
//!   u32 LE                bits 0-7: type (0x10 or 0x11), bits 8-31: length
//!   [ u32 LE ]            extended length, type 0x11 with length 0 only
//!
//! N64 romc (big-endian, no magic):
//!   u32 BE                bits 0-1: type (1 = LZSS, 2 = Romchu), bits 2-31: length
//! ```

use oxivc_core::cursor::ByteCursor;
use oxivc_core::error::{Result, VcError};

/// Optional magic preceding Wii-style LZ77 headers.
pub const LZ77_MAGIC: &[u8; 4] = b"LZ77";

/// Token encoding used by an LZ77 stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lz77Variant {
    /// Type 0x10: 2-byte back-references, lengths 3-18.
    Lzss,
    /// Type 0x11: tiered 2/3/4-byte back-references, lengths 1-65808.
    Extended,
}

impl Lz77Variant {
    /// Parse the variant from a header type byte.
    pub fn from_type_byte(byte: u8) -> Option<Self> {
        match byte {
            0x10 => Some(Self::Lzss),
            0x11 => Some(Self::Extended),
            _ => None,
        }
    }

    /// Get the header type byte.
    pub fn type_byte(&self) -> u8 {
        match self {
            Self::Lzss => 0x10,
            Self::Extended => 0x11,
        }
    }

    /// Get the variant name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Lzss => "lz10",
            Self::Extended => "lz11",
        }
    }
}

impl std::fmt::Display for Lz77Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Parsed Wii-style LZ77 header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lz77Header {
    /// Token encoding.
    pub variant: Lz77Variant,
    /// Declared uncompressed length.
    pub uncompressed_len: usize,
    /// Offset of the first flag byte.
    pub data_offset: usize,
    /// Whether the `LZ77` magic was present.
    pub has_magic: bool,
}

impl Lz77Header {
    /// Parse a header from the start of `data`.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut cursor = ByteCursor::new(data);

        let has_magic = cursor.peek(LZ77_MAGIC.len()) == Some(&LZ77_MAGIC[..]);
        if has_magic {
            cursor.skip(LZ77_MAGIC.len())?;
        }

        let word = cursor.read_u32_le()?;
        let type_byte = (word & 0xFF) as u8;
        let variant = Lz77Variant::from_type_byte(type_byte).ok_or_else(|| {
            VcError::unsupported_format(format!("LZ77 type byte {:#04x}", type_byte))
        })?;

        let mut uncompressed_len = (word >> 8) as usize;
        if uncompressed_len == 0 && variant == Lz77Variant::Extended {
            uncompressed_len = cursor.read_u32_le()? as usize;
        }

        Ok(Self {
            variant,
            uncompressed_len,
            data_offset: cursor.position(),
            has_magic,
        })
    }
}

/// Compression used by an N64 `romc` image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RomcKind {
    /// Type 1: LZSS tokens (same encoding as [`Lz77Variant::Lzss`]).
    Lzss,
    /// Type 2: block-structured LZ77+Huffman (Romchu).
    Romchu,
}

impl RomcKind {
    /// Parse the kind from the low two header bits.
    pub fn from_type_bits(bits: u8) -> Option<Self> {
        match bits {
            1 => Some(Self::Lzss),
            2 => Some(Self::Romchu),
            _ => None,
        }
    }
}

/// Parsed N64 `romc` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RomcHeader {
    /// Compression kind.
    pub kind: RomcKind,
    /// Declared uncompressed length.
    pub uncompressed_len: usize,
}

impl RomcHeader {
    /// Size of the header in bytes.
    pub const SIZE: usize = 4;

    /// Parse a header from the start of `data`.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let word = ByteCursor::new(data).read_u32_be()?;
        let type_bits = (word & 0x3) as u8;
        let kind = RomcKind::from_type_bits(type_bits).ok_or_else(|| {
            VcError::unsupported_format(format!("romc compression type {}", type_bits))
        })?;

        Ok(Self {
            kind,
            uncompressed_len: (word >> 2) as usize,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_from_type_byte() {
        assert_eq!(Lz77Variant::from_type_byte(0x10), Some(Lz77Variant::Lzss));
        assert_eq!(Lz77Variant::from_type_byte(0x11), Some(Lz77Variant::Extended));
        assert_eq!(Lz77Variant::from_type_byte(0x28), None);
        assert_eq!(Lz77Variant::Extended.type_byte(), 0x11);
    }

    #[test]
    fn test_plain_header() {
        let header = Lz77Header::parse(&[0x10, 0x34, 0x12, 0x00, 0xFF]).unwrap();
        assert_eq!(header.variant, Lz77Variant::Lzss);
        assert_eq!(header.uncompressed_len, 0x1234);
        assert_eq!(header.data_offset, 4);
        assert!(!header.has_magic);
    }

    #[test]
    fn test_magic_header() {
        let header = Lz77Header::parse(b"LZ77\x11\x0A\x00\x00").unwrap();
        assert_eq!(header.variant, Lz77Variant::Extended);
        assert_eq!(header.uncompressed_len, 10);
        assert_eq!(header.data_offset, 8);
        assert!(header.has_magic);
    }

    #[test]
    fn test_extended_length() {
        let data = [0x11, 0, 0, 0, 0x00, 0x00, 0x40, 0x00];
        let header = Lz77Header::parse(&data).unwrap();
        assert_eq!(header.uncompressed_len, 0x40_0000);
        assert_eq!(header.data_offset, 8);

        // Type 0x10 has no extension: a zero length stays zero.
        let header = Lz77Header::parse(&[0x10, 0, 0, 0]).unwrap();
        assert_eq!(header.uncompressed_len, 0);
        assert_eq!(header.data_offset, 4);
    }

    #[test]
    fn test_unknown_type() {
        let err = Lz77Header::parse(&[0x24, 0x10, 0x00, 0x00]).unwrap_err();
        assert!(matches!(err, VcError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_romc_header() {
        let header = RomcHeader::parse(&[0x00, 0x40, 0x00, 0x01]).unwrap();
        assert_eq!(header.kind, RomcKind::Lzss);
        assert_eq!(header.uncompressed_len, 0x10_0000);

        let header = RomcHeader::parse(&[0x00, 0x00, 0x00, 0x32]).unwrap();
        assert_eq!(header.kind, RomcKind::Romchu);
        assert_eq!(header.uncompressed_len, 12);

        assert!(RomcHeader::parse(&[0x00, 0x00, 0x00, 0x03]).is_err());
        assert!(matches!(
            RomcHeader::parse(&[0x00, 0x00]),
            Err(VcError::TruncatedInput { .. })
        ));
    }
}
