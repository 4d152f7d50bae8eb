//! Format detection.
//!
//! Virtual Console containers name their compressed members with a 4-byte
//! tag prefix (`LZ77`, `Huf8`, `LZH8`, `romc`). When that tag is known it is
//! passed as a [`TagHint`]; otherwise the format is sniffed from the leading
//! bytes. N64 `romc` images carry no magic and can only be decoded with the
//! hint.

use oxivc_core::error::{Result, VcError};
use oxivc_lz77::{LZ77_MAGIC, Lz77Header, Lz77Variant, RomcHeader, RomcKind};
use oxivc_lzhuf::{HUF8_TAG, Huf8Header, LZH8_TAG, Lzh8Header};
use std::str::FromStr;

/// Known compressed formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// LZ77 type 0x10.
    Lz10,
    /// LZ77 type 0x11.
    Lz11,
    /// N64 romc type 1 (LZSS).
    RomcLzss,
    /// Huf8 (8-bit Huffman).
    Huf8,
    /// LZH8 (LZSS + Huffman).
    Lzh8,
    /// N64 romc type 2 (Romchu).
    Romchu,
}

impl Format {
    /// Get the short format name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Lz10 => "lz10",
            Self::Lz11 => "lz11",
            Self::RomcLzss => "romc-lzss",
            Self::Huf8 => "huf8",
            Self::Lzh8 => "lzh8",
            Self::Romchu => "romchu",
        }
    }

    /// Get a human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Lz10 => "LZ77 type 0x10 (LZSS)",
            Self::Lz11 => "LZ77 type 0x11 (extended LZSS)",
            Self::RomcLzss => "N64 romc type 1 (LZSS)",
            Self::Huf8 => "Huf8 (8-bit Huffman)",
            Self::Lzh8 => "LZH8 (LZSS + Huffman)",
            Self::Romchu => "N64 romc type 2 (Romchu)",
        }
    }

    /// Get the tag that selects this format's family.
    pub fn tag_hint(&self) -> TagHint {
        match self {
            Self::Lz10 | Self::Lz11 => TagHint::Lz77,
            Self::Huf8 => TagHint::Huf8,
            Self::Lzh8 => TagHint::Lzh8,
            Self::RomcLzss | Self::Romchu => TagHint::Romc,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Container tag naming a format family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagHint {
    /// `LZ77`: type 0x10 or 0x11.
    Lz77,
    /// `Huf8`.
    Huf8,
    /// `LZH8`.
    Lzh8,
    /// `romc`: N64 type 1 or 2.
    Romc,
}

impl TagHint {
    /// All tags, in probing order.
    pub const ALL: [Self; 4] = [Self::Lz77, Self::Huf8, Self::Lzh8, Self::Romc];

    /// Get the 4-byte tag.
    pub fn tag(&self) -> &'static [u8; 4] {
        match self {
            Self::Lz77 => b"LZ77",
            Self::Huf8 => b"Huf8",
            Self::Lzh8 => b"LZH8",
            Self::Romc => b"romc",
        }
    }

    /// Parse an exact 4-byte tag.
    pub fn from_tag(tag: &[u8]) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|hint| hint.tag().as_slice() == tag)
            .ok_or_else(|| {
                VcError::unsupported_format(format!("tag {:?}", String::from_utf8_lossy(tag)))
            })
    }

    /// Infer the tag from a file or archive member name prefix.
    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|hint| name.as_bytes().starts_with(hint.tag()))
    }
}

impl std::fmt::Display for TagHint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.tag()))
    }
}

impl FromStr for TagHint {
    type Err = VcError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|hint| s.as_bytes().eq_ignore_ascii_case(hint.tag()))
            .ok_or_else(|| VcError::unsupported_format(format!("tag {:?}", s)))
    }
}

/// Result of header detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatHeader {
    /// Detected format.
    pub format: Format,
    /// Declared uncompressed length.
    pub uncompressed_len: usize,
    /// Offset of the first byte after the header.
    pub payload_offset: usize,
}

/// Detect the format and parse its header.
///
/// With a hint, only that family's header is accepted. Without one, the
/// leading bytes are sniffed.
pub fn detect(hint: Option<TagHint>, data: &[u8]) -> Result<FormatHeader> {
    let hint = match hint {
        Some(hint) => hint,
        None => sniff(data)?,
    };

    let header = match hint {
        TagHint::Lz77 => {
            let header = Lz77Header::parse(data)?;
            FormatHeader {
                format: match header.variant {
                    Lz77Variant::Lzss => Format::Lz10,
                    Lz77Variant::Extended => Format::Lz11,
                },
                uncompressed_len: header.uncompressed_len,
                payload_offset: header.data_offset,
            }
        }
        TagHint::Huf8 => {
            let header = Huf8Header::parse(data)?;
            FormatHeader {
                format: Format::Huf8,
                uncompressed_len: header.uncompressed_len,
                payload_offset: Huf8Header::SIZE,
            }
        }
        TagHint::Lzh8 => {
            let header = Lzh8Header::parse(data)?;
            FormatHeader {
                format: Format::Lzh8,
                uncompressed_len: header.uncompressed_len,
                payload_offset: header.tables_offset,
            }
        }
        TagHint::Romc => {
            let header = RomcHeader::parse(data)?;
            FormatHeader {
                format: match header.kind {
                    RomcKind::Lzss => Format::RomcLzss,
                    RomcKind::Romchu => Format::Romchu,
                },
                uncompressed_len: header.uncompressed_len,
                payload_offset: RomcHeader::SIZE,
            }
        }
    };

    tracing::debug!(
        format = %header.format,
        length = header.uncompressed_len,
        offset = header.payload_offset,
        "detected format"
    );
    Ok(header)
}

/// Guess the tag from the leading bytes.
fn sniff(data: &[u8]) -> Result<TagHint> {
    if data.starts_with(LZ77_MAGIC) {
        return Ok(TagHint::Lz77);
    }

    let first = *data.first().ok_or_else(|| VcError::truncated(0, 1))?;
    match first {
        0x10 | 0x11 => Ok(TagHint::Lz77),
        HUF8_TAG => Ok(TagHint::Huf8),
        LZH8_TAG => Ok(TagHint::Lzh8),
        other => Err(VcError::unsupported_format(format!(
            "type byte {:#04x} (romc images need a tag hint)",
            other
        ))),
    }
}
