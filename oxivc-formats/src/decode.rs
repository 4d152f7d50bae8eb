//! Format dispatch.

use crate::config::DecodeConfig;
use crate::detect::{Format, FormatHeader, TagHint, detect};
use oxivc_core::error::{Result, VcError};
use oxivc_lzhuf::{BlockProgress, RomchuDecoder, huf8, lzh8};

/// Decode a compressed blob with the default configuration.
pub fn decode(hint: Option<TagHint>, data: &[u8]) -> Result<Vec<u8>> {
    decode_with_config(hint, data, &DecodeConfig::default())
}

/// Decode a compressed blob.
pub fn decode_with_config(
    hint: Option<TagHint>,
    data: &[u8],
    config: &DecodeConfig,
) -> Result<Vec<u8>> {
    decode_with_progress(hint, data, config, |_| {})
}

/// Decode a compressed blob, reporting Romchu block progress.
///
/// Only Romchu is block-structured; other formats never call `progress`.
pub fn decode_with_progress<F>(
    hint: Option<TagHint>,
    data: &[u8],
    config: &DecodeConfig,
    progress: F,
) -> Result<Vec<u8>>
where
    F: FnMut(BlockProgress),
{
    let header = detect(hint, data)?;
    decode_detected(&header, data, config, progress)
}

/// Decode a blob whose header has already been detected.
pub fn decode_detected<F>(
    header: &FormatHeader,
    data: &[u8],
    config: &DecodeConfig,
    progress: F,
) -> Result<Vec<u8>>
where
    F: FnMut(BlockProgress),
{
    let limit = config.max_output_len;
    if header.uncompressed_len > limit {
        return Err(VcError::output_too_large(header.uncompressed_len, limit));
    }

    match header.format {
        Format::Lz10 | Format::Lz11 => oxivc_lz77::decompress_with_limit(data, limit),
        Format::RomcLzss => oxivc_lz77::decompress_romc_with_limit(data, limit),
        Format::Huf8 => huf8::decompress_with_limit(data, limit),
        Format::Lzh8 => lzh8::decompress_with_limit(data, limit),
        Format::Romchu => {
            let body = data.get(header.payload_offset..).ok_or_else(|| {
                VcError::truncated(data.len(), header.payload_offset - data.len())
            })?;
            RomchuDecoder::new()
                .with_padding_check(config.verify_romchu_padding)
                .with_max_output_len(limit)
                .decode_body_with_progress(body, header.uncompressed_len, progress)
        }
    }
}
