//! Argument shapes (out of scope for the core per spec.md §1; this module
//! is the "CLI layer" spec.md treats as an external collaborator).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::error::Direction;
use crate::io::{ByteSink, ByteSource};
use crate::level::CompressionLevel;
use crate::orchestrator::Request;

/// A sentinel meaning "standard input" / "standard output" on the
/// command line, matching the Unix convention used by `gzip`, `xz`, and
/// most other single-file codec CLIs.
const STREAM_MARKER: &str = "-";

#[derive(Debug, Parser)]
#[command(name = "blockzip", version, about = "Compress or decompress a single file or byte stream")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase logging verbosity (may be repeated).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all diagnostic logging.
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compress a file or stream.
    Compress(OperationArgs),
    /// Decompress a file or stream.
    Decompress(OperationArgs),
}

#[derive(Debug, Args)]
pub struct OperationArgs {
    /// Input path, or `-` for standard input.
    pub input: PathBuf,

    /// Output path, or `-` for standard output. Defaults to a derived path.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Algorithm: lzfse, lz4, zlib or lzma. Required for compress unless
    /// `--level` implies one; required for decompress from standard input.
    #[arg(short = 'm', long)]
    pub algorithm: Option<String>,

    /// Compression level hint.
    #[arg(short, long, value_enum, default_value_t = CompressionLevel::Balanced)]
    pub level: CompressionLevel,

    /// Overwrite an existing output file.
    #[arg(short, long)]
    pub force: bool,

    /// Render a progress bar on standard error.
    #[arg(long)]
    pub progress: bool,

    /// Permit a symlinked input file (rejected by default).
    #[arg(long)]
    pub allow_symlink: bool,
}

impl OperationArgs {
    pub fn into_request(self, direction: Direction) -> Request {
        let input = if self.input.as_os_str() == STREAM_MARKER {
            ByteSource::Stdin
        } else {
            ByteSource::File(self.input)
        };
        let output = self.output.map(|path| {
            if path.as_os_str() == STREAM_MARKER {
                ByteSink::Stdout
            } else {
                ByteSink::File(path)
            }
        });
        Request {
            direction,
            input,
            output,
            algorithm: self.algorithm,
            level: self.level,
            force: self.force,
            progress_enabled: self.progress,
            allow_symlink: self.allow_symlink,
        }
    }
}
