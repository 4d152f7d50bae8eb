//! Info command implementation.

use crate::utils::{create_bytes_bar, resolve_hint, space_savings};
use oxivc_formats::{DecodeConfig, Format, TagHint, decode_detected, detect};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Machine-readable summary printed by `info --json`.
#[derive(Serialize)]
struct InfoReport {
    file: String,
    format: &'static str,
    description: &'static str,
    tag: String,
    compressed_size: usize,
    decoded_size: usize,
    payload_offset: usize,
    space_savings: f64,
    /// Block count for Romchu images.
    #[serde(skip_serializing_if = "Option::is_none")]
    blocks: Option<usize>,
}

pub fn cmd_info(
    file: &Path,
    hint: Option<TagHint>,
    config: &DecodeConfig,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(file)?;
    let header = detect(resolve_hint(hint, file), &data)?;

    let pb = create_bytes_bar(
        header.uncompressed_len as u64,
        !json && header.format == Format::Romchu,
    );
    let mut blocks = 0usize;
    let decoded = decode_detected(&header, &data, config, |p| {
        blocks = p.index + 1;
        pb.set_position(p.output_len as u64);
        pb.set_message(if p.compressed { "huffman" } else { "raw" });
    })?;
    pb.finish_and_clear();

    let report = InfoReport {
        file: file.display().to_string(),
        format: header.format.name(),
        description: header.format.description(),
        tag: header.format.tag_hint().to_string(),
        compressed_size: data.len(),
        decoded_size: decoded.len(),
        payload_offset: header.payload_offset,
        space_savings: space_savings(data.len(), decoded.len()),
        blocks: (header.format == Format::Romchu).then_some(blocks),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("=== {} ===", report.file);
    println!("Format: {} ({})", report.format, report.description);
    println!("Tag: {}", report.tag);
    println!("Compressed size: {} bytes", report.compressed_size);
    println!("Decoded size: {} bytes", report.decoded_size);
    println!("Payload offset: {:#x}", report.payload_offset);
    println!("Space savings: {:.1}%", report.space_savings);
    if let Some(blocks) = report.blocks {
        println!("Blocks: {}", blocks);
    }

    Ok(())
}
