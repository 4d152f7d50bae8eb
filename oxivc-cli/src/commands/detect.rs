//! Detect command implementation.

use crate::utils::resolve_hint;
use oxivc_formats::{TagHint, detect};
use std::fs;
use std::path::Path;

pub fn cmd_detect(file: &Path, hint: Option<TagHint>) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(file)?;
    let hint = resolve_hint(hint, file);
    let header = detect(hint, &data)?;

    println!("File: {}", file.display());
    println!("Format: {}", header.format);
    println!("Description: {}", header.format.description());
    println!("Tag: {}", header.format.tag_hint());
    println!("Declared size: {} bytes", header.uncompressed_len);
    println!("Payload offset: {:#x}", header.payload_offset);
    println!(
        "Header bytes: {:02X?}",
        &data[..data.len().min(header.payload_offset.max(4))]
    );

    Ok(())
}
