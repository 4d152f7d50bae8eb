//! OxiVC CLI - Virtual Console decompressor
//!
//! A Pure Rust utility for the LZ77, Huf8, LZH8 and N64 romc formats found in
//! Virtual Console titles.

mod commands;
mod utils;

use clap::{Parser, Subcommand};
use commands::{cmd_decode, cmd_detect, cmd_info, cmd_test};
use oxivc_formats::{DecodeConfig, TagHint};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxivc")]
#[command(
    author,
    version,
    about = "Pure Rust decompressor for Virtual Console asset formats"
)]
#[command(long_about = "
OxiVC decodes the compression formats used by Virtual Console titles.
Supported formats: LZ77 (0x10, 0x11), Huf8, LZH8, N64 romc (LZSS, Romchu)

The format is taken from --format, then from a file name prefix
(LZ77, Huf8, LZH8, romc), then sniffed from the header. N64 romc
images have no magic and need one of the first two.

Examples:
  oxivc decode LZ77000001.app
  oxivc decode -o out/ romc -f romc
  oxivc detect 00000002.app
  oxivc info --json romc
  oxivc test *.app
")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every decoding command.
#[derive(clap::Args)]
struct DecodeOptions {
    /// Format tag (LZ77, Huf8, LZH8, romc); overrides the file name prefix
    #[arg(short, long)]
    format: Option<TagHint>,

    /// Refuse declared output sizes above this many bytes
    #[arg(long, default_value_t = DecodeConfig::DEFAULT_MAX_OUTPUT_LEN)]
    max_size: usize,

    /// Accept nonzero padding bits in Romchu blocks
    #[arg(long)]
    no_padding_check: bool,
}

impl DecodeOptions {
    fn config(&self) -> DecodeConfig {
        DecodeConfig::new()
            .with_max_output_len(self.max_size)
            .with_romchu_padding_check(!self.no_padding_check)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Decode files, writing <name>.dec into the output directory
    #[command(alias = "d")]
    Decode {
        /// Compressed input files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        #[command(flatten)]
        options: DecodeOptions,

        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,
    },

    /// Detect the format and print the header
    Detect {
        /// File to detect
        file: PathBuf,

        /// Format tag (LZ77, Huf8, LZH8, romc)
        #[arg(short, long)]
        format: Option<TagHint>,
    },

    /// Decode a file and show size information
    #[command(alias = "i")]
    Info {
        /// File to inspect
        file: PathBuf,

        #[command(flatten)]
        options: DecodeOptions,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Check that files decode without writing output
    #[command(alias = "t")]
    Test {
        /// Files to test
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        options: DecodeOptions,
    },
}

fn main() {
    let cli = Cli::parse();
    utils::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Decode {
            inputs,
            output,
            options,
            no_progress,
        } => cmd_decode(
            &inputs,
            &output,
            options.format,
            &options.config(),
            !no_progress,
        ),
        Commands::Detect { file, format } => cmd_detect(&file, format),
        Commands::Info {
            file,
            options,
            json,
        } => cmd_info(&file, options.format, &options.config(), json),
        Commands::Test { files, options } => cmd_test(&files, options.format, &options.config()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
