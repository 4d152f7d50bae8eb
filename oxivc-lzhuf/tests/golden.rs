//! Fixed-vector tests for Huf8, LZH8 and Romchu.
//!
//! Blobs are hand-built. Expected outputs were reproduced with straight ports
//! of the reference decoders, except where a test notes that this crate is
//! deliberately more permissive.

use oxivc_core::VcError;
use oxivc_lzhuf::{BlockProgress, RomchuDecoder, huf8, lzh8, romchu};

/// Root's left child is a leaf. Reference decoders reject this tree.
const HUF8_ABCAAB: [u8; 14] = [
    0x28, 0x06, 0x00, 0x00, 0x02, 0x80, 0x61, 0xC0, 0x62, 0x63, 0x00, 0x00, 0x00, 0x59,
];

/// 4 symbols, no leaf directly under the root.
const HUF8_ABCD: [u8; 16] = [
    0x28, 0x04, 0x00, 0x00, 0x03, 0x00, 0xC0, 0xC1, 0x61, 0x62, 0x63, 0x64, 0x00, 0x00, 0x00,
    0x1B,
];

const LZH8_ABC: [u8; 22] = [
    0x40, 0x09, 0x00, 0x00, // header
    0x02, 0x00, 0x00, 0x60, 0x30, 0x26, 0x13, 0x11, 0x8E, 0x06, 0x00, 0x00, // length table
    0x00, 0xC0, 0x80, 0x00, // displen table
    0x1B, 0x00, // body
];

/// romc type 2, 12 bytes: one compressed block ("abcabcabc") and one raw
/// block ("XYZ").
const ROMCHU_TWO_BLOCKS: [u8; 36] = [
    0x00, 0x00, 0x00, 0x32, 0x83, 0x01, 0x00, 0x00, 0x4E, 0x00, 0xBF, 0x60, 0x40, 0xFC, 0x83,
    0x1C, 0x00, 0x20, 0x5E, 0x00, 0x24, 0x00, 0x04, 0x01, 0x84, 0x19, 0x00, 0xD8, 0x01, 0x06,
    0x00, 0x00, 0x00, 0x58, 0x59, 0x5A,
];

/// romc type 2, 21 bytes: one literal and a length class with extra bits.
const ROMCHU_EXTRA_BITS: [u8; 27] = [
    0x00, 0x00, 0x00, 0x56, 0x6B, 0x01, 0x00, 0x00, 0x4E, 0x00, 0xBF, 0x00, 0x20, 0xFC, 0x83,
    0x27, 0x00, 0x10, 0x3A, 0x00, 0x1A, 0x00, 0x00, 0xE1, 0x06, 0x00, 0x06,
];

/// romc type 2, 4 bytes: a literal followed by a distance-2 back-reference.
const ROMCHU_DISTANCE_BEFORE_START: [u8; 27] = [
    0x00, 0x00, 0x00, 0x12, 0x67, 0x01, 0x00, 0x00, 0x4E, 0x00, 0xBF, 0x00, 0x20, 0xFC, 0x83,
    0x1B, 0x00, 0x10, 0x6A, 0x00, 0x1F, 0x00, 0x02, 0x21, 0xD4, 0x00, 0x06,
];

/// Pack `bits`-wide words MSB-first into a zeroed buffer of `len` bytes.
fn msb_pack(words: &[u16], bits: usize, len: usize) -> Vec<u8> {
    let mut out = vec![0u8; len];
    for (i, &word) in words.iter().enumerate() {
        for b in 0..bits {
            if word >> (bits - 1 - b) & 1 != 0 {
                let pos = i * bits + b;
                out[pos / 8] |= 0x80 >> (pos % 8);
            }
        }
    }
    out
}

/// Build an LZH8 blob with a length table of the given size field and a
/// one-word displen table.
fn lzh8_blob(
    size_field: u16,
    lengths: &[u16],
    displens: &[u16],
    body: &[u8],
    out_len: u8,
) -> Vec<u8> {
    let mut blob = vec![0x40, out_len, 0x00, 0x00];
    blob.extend_from_slice(&size_field.to_le_bytes());
    blob.extend(msb_pack(lengths, 9, (size_field as usize + 1) * 4 - 2));
    blob.push(0x00);
    blob.extend(msb_pack(displens, 5, 3));
    blob.extend_from_slice(body);
    blob
}

// ============================================================================
// Huf8
// ============================================================================

#[test]
fn test_huf8_golden() {
    // A leaf directly under the root is accepted here; reference decoders
    // stop with "infinite loop" on this blob. Deliberately more permissive.
    assert_eq!(huf8::decompress(&HUF8_ABCAAB).unwrap(), b"abcaab");
}

#[test]
fn test_huf8_inner_root_children() {
    assert_eq!(huf8::decompress(&HUF8_ABCD).unwrap(), b"abcd");
}

#[test]
fn test_huf8_repeatable() {
    let first = huf8::decompress(&HUF8_ABCAAB).unwrap();
    let second = huf8::decompress(&HUF8_ABCAAB).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_huf8_corrupt_table() {
    let mut blob = HUF8_ABCAAB;
    blob[5] = 0x3F;
    let err = huf8::decompress(&blob).unwrap_err();
    assert!(matches!(err, VcError::HuffmanTableCorrupt { .. }));
}

#[test]
fn test_huf8_missing_word() {
    let mut blob = HUF8_ABCAAB;
    blob[1] = 0x40; // 64 bytes need more than one word
    let err = huf8::decompress(&blob).unwrap_err();
    assert!(matches!(err, VcError::TruncatedInput { .. }));
}

#[test]
fn test_huf8_table_truncated() {
    let err = huf8::decompress(&HUF8_ABCAAB[..8]).unwrap_err();
    assert!(matches!(err, VcError::TruncatedInput { .. }));
}

// ============================================================================
// LZH8
// ============================================================================

#[test]
fn test_lzh8_golden() {
    assert_eq!(lzh8::decompress(&LZH8_ABC).unwrap(), b"abcabcabc");
}

#[test]
fn test_lzh8_zero_displen_unverified_against_real_data() {
    // Last displen symbol switched to 0: displacement 0, distance 1.
    let mut blob = LZH8_ABC;
    blob[21] = 0x80;
    assert_eq!(lzh8::decompress(&blob).unwrap(), b"abccccccc");
}

#[test]
fn test_lzh8_extended_length_unverified_against_real_data() {
    let mut blob = vec![0x40, 0x00, 0x00, 0x00, 0x09, 0x00, 0x00, 0x00];
    blob.extend_from_slice(&LZH8_ABC[4..]);
    assert_eq!(lzh8::decompress(&blob).unwrap(), b"abcabcabc");
}

#[test]
fn test_lzh8_table_word_crosses_table_end() {
    // Size fields 2 and 11 leave a final 9-bit word that ends one bit past
    // the length table, inside the displen size byte.
    for size_field in [2, 3, 11] {
        let blob = lzh8_blob(size_field, &[0x180, 0x61, 0x61], &[0x18, 2, 2], &[0x00], 2);
        assert_eq!(
            lzh8::decompress(&blob).unwrap(),
            b"aa",
            "size field {}",
            size_field
        );
    }
}

#[test]
fn test_lzh8_distance_before_start() {
    // 'a', then length 3 at distance 3 from position 1.
    let blob = lzh8_blob(3, &[0x180, 0x61, 0x100], &[0x18, 2, 2], &[0x40], 4);
    let err = lzh8::decompress(&blob).unwrap_err();
    assert!(matches!(
        err,
        VcError::InvalidBackreference { position: 1, .. }
    ));
}

#[test]
fn test_lzh8_body_truncated() {
    let err = lzh8::decompress(&LZH8_ABC[..21]).unwrap_err();
    assert!(matches!(err, VcError::TruncatedInput { .. }));
}

#[test]
fn test_lzh8_overrun_is_error() {
    let mut blob = LZH8_ABC;
    blob[1] = 0x07;
    let err = lzh8::decompress(&blob).unwrap_err();
    assert!(matches!(err, VcError::LengthMismatch { expected: 7, .. }));
}

// ============================================================================
// Romchu
// ============================================================================

#[test]
fn test_romchu_two_blocks() {
    assert_eq!(
        romchu::decompress(&ROMCHU_TWO_BLOCKS).unwrap(),
        b"abcabcabcXYZ"
    );
}

#[test]
fn test_romchu_length_extra_bits() {
    assert_eq!(
        romchu::decompress(&ROMCHU_EXTRA_BITS).unwrap(),
        vec![b'a'; 21]
    );
}

#[test]
fn test_romchu_progress() {
    let mut reports: Vec<BlockProgress> = Vec::new();
    let out = romchu::decompress_with_progress(&ROMCHU_TWO_BLOCKS, |p| reports.push(p)).unwrap();
    assert_eq!(out.len(), 12);
    assert_eq!(reports.len(), 2);
    assert!(reports[0].compressed);
    assert_eq!(reports[0].output_len, 9);
    assert_eq!(reports[0].input_offset, 25);
    assert!(!reports[1].compressed);
    assert_eq!(reports[1].output_len, 12);
    assert_eq!(reports[1].total_len, 12);
}

#[test]
fn test_romchu_nonzero_padding() {
    let mut blob = ROMCHU_TWO_BLOCKS;
    blob[28] = 0x03;
    let err = romchu::decompress(&blob).unwrap_err();
    assert!(matches!(err, VcError::HuffmanTableCorrupt { .. }));
}

#[test]
fn test_romchu_padding_check_disabled() {
    let mut blob = ROMCHU_TWO_BLOCKS;
    blob[28] = 0x03;
    let out = RomchuDecoder::new()
        .with_padding_check(false)
        .decode_body(&blob[4..], 12)
        .unwrap();
    assert_eq!(out, b"abcabcabcXYZ");
}

#[test]
fn test_romchu_length_mismatch() {
    // Declared 16 bytes, blocks produce 12.
    let mut blob = ROMCHU_TWO_BLOCKS;
    blob[3] = 0x42;
    let err = romchu::decompress(&blob).unwrap_err();
    assert_eq!(err, VcError::length_mismatch(16, 12));
}

#[test]
fn test_romchu_distance_before_start() {
    let err = romchu::decompress(&ROMCHU_DISTANCE_BEFORE_START).unwrap_err();
    assert!(matches!(
        err,
        VcError::InvalidBackreference { position: 1, .. }
    ));
}

#[test]
fn test_romchu_truncated_payload() {
    let err = romchu::decompress(&ROMCHU_TWO_BLOCKS[..20]).unwrap_err();
    assert!(matches!(err, VcError::TruncatedInput { .. }));
}
