//! Utility functions for the CLI.

use indicatif::{ProgressBar, ProgressStyle};
use oxivc_formats::TagHint;
use std::path::{Path, PathBuf};
use tracing::Level;

/// Error type for per-file work that may run on the rayon pool.
pub type FileError = Box<dyn std::error::Error + Send + Sync>;

/// Install the stderr log subscriber.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Create a progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    styled_bar(len, enable, "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
}

/// Create a byte-count progress bar for block-by-block decoding.
pub fn create_bytes_bar(len: u64, enable: bool) -> ProgressBar {
    styled_bar(
        len,
        enable,
        "[{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}",
    )
}

fn styled_bar(len: u64, enable: bool, template: &str) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let style = ProgressStyle::default_bar()
        .template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░ ");
    let pb = ProgressBar::new(len);
    pb.set_style(style);
    pb
}

/// Pick the tag hint: explicit flag first, then the file name prefix.
pub fn resolve_hint(explicit: Option<TagHint>, path: &Path) -> Option<TagHint> {
    explicit.or_else(|| {
        path.file_name()
            .and_then(|name| name.to_str())
            .and_then(TagHint::from_file_name)
    })
}

/// Output path for a decoded input: `<dir>/<file name>.dec`.
pub fn output_path(dir: &Path, input: &Path) -> PathBuf {
    let mut name = input
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "output".into());
    name.push(".dec");
    dir.join(name)
}

/// Space savings as a percentage of the decoded size.
pub fn space_savings(compressed: usize, decoded: usize) -> f64 {
    if decoded == 0 {
        return 0.0;
    }
    (1.0 - compressed as f64 / decoded as f64) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_hint() {
        let path = Path::new("/tmp/vc/LZ77000001.app");
        assert_eq!(resolve_hint(None, path), Some(TagHint::Lz77));
        assert_eq!(resolve_hint(Some(TagHint::Romc), path), Some(TagHint::Romc));
        assert_eq!(resolve_hint(None, Path::new("00000001.app")), None);
    }

    #[test]
    fn test_output_path() {
        let out = output_path(Path::new("out"), Path::new("in/romc"));
        assert_eq!(out, Path::new("out/romc.dec"));
    }

    #[test]
    fn test_space_savings() {
        assert_eq!(space_savings(50, 100), 50.0);
        assert_eq!(space_savings(10, 0), 0.0);
    }
}
