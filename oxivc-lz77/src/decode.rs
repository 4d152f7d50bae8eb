//! LZ77 token stream decompression.
//!
//! The body after the header is a sequence of groups: one flag byte followed
//! by up to eight tokens. Flag bits are read from bit 7 down to bit 0; a clear
//! bit is a literal byte, a set bit is a back-reference whose encoding depends
//! on the [`Lz77Variant`]. Decoding stops as soon as the declared length has
//! been produced, so unused flag bits and trailing input are ignored.

use crate::header::{Lz77Header, Lz77Variant, RomcHeader, RomcKind};
use oxivc_core::cursor::ByteCursor;
use oxivc_core::error::{Result, VcError};
use oxivc_core::window::{DEFAULT_MAX_OUTPUT_LEN, OutputWindow, Token};

/// Base length for the 3-byte (type 0x11) back-reference form.
const EXT_MEDIUM_BIAS: usize = 0x11;
/// Base length for the 4-byte (type 0x11) back-reference form.
const EXT_LONG_BIAS: usize = 0x111;

/// LZ77 token stream decoder.
#[derive(Debug, Clone, Copy)]
pub struct Lz77Decoder {
    /// Back-reference encoding.
    variant: Lz77Variant,
}

impl Lz77Decoder {
    /// Create a decoder for the given variant.
    pub fn new(variant: Lz77Variant) -> Self {
        Self { variant }
    }

    /// Get the variant this decoder reads.
    pub fn variant(&self) -> Lz77Variant {
        self.variant
    }

    /// Decode a headerless token stream into exactly `uncompressed_len` bytes.
    pub fn decode_body(&self, body: &[u8], uncompressed_len: usize) -> Result<Vec<u8>> {
        let mut cursor = ByteCursor::new(body);
        let mut window = OutputWindow::new(uncompressed_len);

        while !window.is_full() {
            let flags = cursor.read_u8()?;

            for bit in (0..8).rev() {
                if window.is_full() {
                    break;
                }

                let token = if flags & (1 << bit) != 0 {
                    self.read_backref(&mut cursor)?
                } else {
                    Token::Literal(cursor.read_u8()?)
                };

                if let Token::Backref { length, distance } = token {
                    tracing::trace!(
                        length,
                        distance,
                        position = window.position(),
                        "lz77 back-reference"
                    );
                }
                window.apply(token)?;
            }
        }

        tracing::debug!(
            variant = %self.variant,
            output = uncompressed_len,
            consumed = cursor.position(),
            trailing = cursor.remaining(),
            "lz77 stream decoded"
        );
        window.finish()
    }

    /// Read one back-reference token.
    fn read_backref(&self, cursor: &mut ByteCursor<'_>) -> Result<Token> {
        let info = cursor.read_u16_be()? as usize;

        let (length, distance) = match self.variant {
            Lz77Variant::Lzss => ((info >> 12) + 3, (info & 0xFFF) + 1),
            Lz77Variant::Extended => match info >> 12 {
                0 => {
                    // 3-byte form: 8-bit length field spans bytes 0 and 1.
                    let extra = cursor.read_u8()? as usize;
                    let length = ((info & 0xFF0) >> 4) + EXT_MEDIUM_BIAS;
                    let distance = (((info & 0xF) << 8) | extra) + 1;
                    (length, distance)
                }
                1 => {
                    // 4-byte form: 16-bit length field spans bytes 0 to 2.
                    let info2 = cursor.read_u16_be()? as usize;
                    let length = (((info & 0xFFF) << 4) | (info2 >> 12)) + EXT_LONG_BIAS;
                    let distance = (info2 & 0xFFF) + 1;
                    (length, distance)
                }
                high => (high + 1, (info & 0xFFF) + 1),
            },
        };

        Ok(Token::Backref { length, distance })
    }
}

/// Decompress a Wii-style LZ77 blob (optional `LZ77` magic, type 0x10 or 0x11),
/// capping the declared length at [`DEFAULT_MAX_OUTPUT_LEN`].
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    decompress_with_limit(data, DEFAULT_MAX_OUTPUT_LEN)
}

/// Decompress a Wii-style LZ77 blob whose declared length must not exceed `limit`.
pub fn decompress_with_limit(data: &[u8], limit: usize) -> Result<Vec<u8>> {
    let header = Lz77Header::parse(data)?;
    if header.uncompressed_len > limit {
        return Err(VcError::output_too_large(header.uncompressed_len, limit));
    }
    tracing::debug!(
        variant = %header.variant,
        length = header.uncompressed_len,
        magic = header.has_magic,
        "lz77 header"
    );
    Lz77Decoder::new(header.variant)
        .decode_body(&data[header.data_offset..], header.uncompressed_len)
}

/// Decompress an N64 `romc` blob whose header selects LZSS (type 1).
///
/// Type 2 blobs are Romchu-compressed and are rejected with
/// [`VcError::UnsupportedFormat`].
pub fn decompress_romc(data: &[u8]) -> Result<Vec<u8>> {
    decompress_romc_with_limit(data, DEFAULT_MAX_OUTPUT_LEN)
}

/// Decompress a romc LZSS blob whose declared length must not exceed `limit`.
pub fn decompress_romc_with_limit(data: &[u8], limit: usize) -> Result<Vec<u8>> {
    let header = RomcHeader::parse(data)?;
    if header.kind != RomcKind::Lzss {
        return Err(VcError::unsupported_format(
            "romc type 2 is Romchu, not LZSS",
        ));
    }
    if header.uncompressed_len > limit {
        return Err(VcError::output_too_large(header.uncompressed_len, limit));
    }
    tracing::debug!(length = header.uncompressed_len, "romc lzss header");
    Lz77Decoder::new(Lz77Variant::Lzss)
        .decode_body(&data[RomcHeader::SIZE..], header.uncompressed_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backref(decoder: Lz77Decoder, bytes: &[u8]) -> Token {
        decoder.read_backref(&mut ByteCursor::new(bytes)).unwrap()
    }

    #[test]
    fn test_lzss_backref_fields() {
        let decoder = Lz77Decoder::new(Lz77Variant::Lzss);
        assert_eq!(
            backref(decoder, &[0x30, 0x02]),
            Token::Backref {
                length: 6,
                distance: 3
            }
        );
        assert_eq!(
            backref(decoder, &[0xFF, 0xFF]),
            Token::Backref {
                length: 18,
                distance: 4096
            }
        );
    }

    #[test]
    fn test_extended_backref_tiers() {
        let decoder = Lz77Decoder::new(Lz77Variant::Extended);
        assert_eq!(
            backref(decoder, &[0x50, 0x02]),
            Token::Backref {
                length: 6,
                distance: 3
            }
        );
        assert_eq!(
            backref(decoder, &[0x00, 0x30, 0x00]),
            Token::Backref {
                length: 20,
                distance: 1
            }
        );
        assert_eq!(
            backref(decoder, &[0x10, 0x01, 0xB0, 0x00]),
            Token::Backref {
                length: 300,
                distance: 1
            }
        );
        assert_eq!(
            backref(decoder, &[0x1F, 0xFF, 0xFF, 0xFF]),
            Token::Backref {
                length: 0xFFFF + EXT_LONG_BIAS,
                distance: 4096
            }
        );
    }

    #[test]
    fn test_literals_only() {
        let body = [0x00, b'a', b'b', b'c'];
        let out = Lz77Decoder::new(Lz77Variant::Lzss)
            .decode_body(&body, 3)
            .unwrap();
        assert_eq!(out, b"abc");
    }

    #[test]
    fn test_zero_length_output() {
        let out = Lz77Decoder::new(Lz77Variant::Extended)
            .decode_body(&[], 0)
            .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_missing_flag_byte() {
        let err = Lz77Decoder::new(Lz77Variant::Lzss)
            .decode_body(&[0x00, b'a'], 2)
            .unwrap_err();
        assert!(matches!(err, VcError::TruncatedInput { .. }));
    }

    #[test]
    fn test_extended_length_over_limit() {
        // Type 0x11, zero 24-bit length, then 0xFFFFFFFF.
        let data = [0x11, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF];
        let err = decompress(&data).unwrap_err();
        assert_eq!(err, VcError::output_too_large(0xFFFF_FFFF, DEFAULT_MAX_OUTPUT_LEN));

        let err = decompress_with_limit(&[0x10, 0x03, 0x00, 0x00], 2).unwrap_err();
        assert_eq!(err, VcError::output_too_large(3, 2));
    }

    #[test]
    fn test_romc_over_limit() {
        // Declared length 0x100, type 1.
        let err = decompress_romc_with_limit(&[0x00, 0x00, 0x04, 0x01], 0xFF).unwrap_err();
        assert_eq!(err, VcError::output_too_large(0x100, 0xFF));
    }

    #[test]
    fn test_romc_rejects_romchu() {
        let err = decompress_romc(&[0x00, 0x00, 0x00, 0x32]).unwrap_err();
        assert!(matches!(err, VcError::UnsupportedFormat { .. }));
    }
}
