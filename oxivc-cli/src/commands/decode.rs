//! Decode command implementation.

use crate::utils::{FileError, create_progress_bar, output_path, resolve_hint};
use oxivc_formats::{DecodeConfig, TagHint, decode_with_config};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Decode one file into `out_dir`, returning the output path and size.
fn decode_file(
    input: &Path,
    out_dir: &Path,
    hint: Option<TagHint>,
    config: &DecodeConfig,
) -> Result<(PathBuf, usize), FileError> {
    let data = fs::read(input)?;
    let decoded = decode_with_config(resolve_hint(hint, input), &data, config)?;

    let target = output_path(out_dir, input);
    fs::write(&target, &decoded)?;
    Ok((target, decoded.len()))
}

pub fn cmd_decode(
    inputs: &[PathBuf],
    out_dir: &Path,
    hint: Option<TagHint>,
    config: &DecodeConfig,
    progress: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(out_dir)?;

    let pb = create_progress_bar(inputs.len() as u64, progress && inputs.len() > 1);
    let results: Vec<_> = inputs
        .par_iter()
        .map(|input| {
            let result = decode_file(input, out_dir, hint, config);
            if let Err(e) = &result {
                tracing::debug!(file = %input.display(), error = %e, "decode failed");
            }
            pb.inc(1);
            (input, result)
        })
        .collect();
    pb.finish_and_clear();

    let mut failed = 0usize;
    for (input, result) in &results {
        match result {
            Ok((target, size)) => {
                println!(
                    "  {} -> {} ({} bytes)",
                    input.display(),
                    target.display(),
                    size
                );
            }
            Err(e) => {
                failed += 1;
                eprintln!("  FAILED: {} - {}", input.display(), e);
            }
        }
    }

    if failed > 0 {
        return Err(format!("{} of {} files failed to decode", failed, results.len()).into());
    }
    Ok(())
}
