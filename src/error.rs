//! Layered error taxonomy (spec.md §7).
//!
//! Three layers, each recovering only what is locally meaningful:
//! [`InfrastructureError`] (I/O and codec-library failures),
//! [`DomainError`] (request-shape and policy failures), and [`CoreError`],
//! the orchestrator-level wrapper that identifies which operation failed.
//!
//! Mirrors the donor's separation of concerns (path resolution never
//! catches I/O, the validator never catches codec errors) but replaces the
//! donor's `anyhow`-everywhere style with a structured enum, since spec.md
//! §7 requires the failure value to carry enough structured context
//! (algorithm name, path, phase, cause) to build a message without further
//! inspection.

use std::fmt;
use std::path::PathBuf;

/// The phase of the streaming engine's drive loop (spec.md §4.D.2) in which
/// a codec-library failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecPhase {
    Initialise,
    Process,
    Finalize,
}

impl fmt::Display for CodecPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CodecPhase::Initialise => "initialise",
            CodecPhase::Process => "process",
            CodecPhase::Finalize => "finalize",
        };
        f.write_str(s)
    }
}

/// Compress or decompress — which direction a codec failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Compress,
    Decompress,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Compress => "compress",
            Direction::Decompress => "decompress",
        };
        f.write_str(s)
    }
}

/// Infrastructure-layer failures: source/sink I/O and codec-library errors.
///
/// Corresponds to spec.md §4.D.5's failure taxonomy plus source/sink open
/// failures from §4.C.
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    #[error("failed to open source {path}: {source}")]
    SourceOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open sink {path}: {source}")]
    SinkOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("read from source failed: {source}")]
    SourceRead {
        #[source]
        source: std::io::Error,
    },

    #[error("write to sink failed: {source}")]
    SinkWrite {
        #[source]
        source: std::io::Error,
    },

    #[error("{algorithm} codec initialisation failed")]
    CodecInitFailed {
        algorithm: &'static str,
        direction: Direction,
    },

    #[error("{algorithm} {direction} failed during {phase}: {cause}")]
    CodecProcessError {
        algorithm: &'static str,
        direction: Direction,
        phase: CodecPhase,
        cause: String,
    },

    #[error("{algorithm} decompression of truncated or corrupted input")]
    TruncatedInput {
        algorithm: &'static str,
    },
}

/// Domain-layer failures: bad requests, rejected by validation before any
/// codec or engine work happens (spec.md §4.G, §4.H step 2).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("unknown algorithm '{given}'; supported algorithms: {}", supported.join(", "))]
    UnknownAlgorithm { given: String, supported: Vec<&'static str> },

    #[error("an algorithm must be specified explicitly; it could not be inferred")]
    MissingAlgorithm,

    #[error("invalid input path: {reason}")]
    InvalidInputPath { reason: String },

    #[error("invalid output path: {reason}")]
    InvalidOutputPath { reason: String },

    #[error("input and output resolve to the same path: {path}")]
    SamePath { path: PathBuf },

    #[error("{path} already exists; pass --force to overwrite")]
    OutputExists { path: PathBuf },

    #[error("{path} is a symbolic link; pass --allow-symlink to process it")]
    SymlinkRejected { path: PathBuf },

    #[error("input {path} does not exist or is not a readable regular file")]
    InputUnreadable { path: PathBuf },

    #[error("no output destination was given and none could be inferred")]
    UndefinedOutput,
}

/// The top-level error the orchestrator returns, identifying which
/// high-level operation failed.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{direction} failed: {source}")]
    Domain {
        direction: Direction,
        #[source]
        source: DomainError,
    },

    #[error("{direction} failed: {source}")]
    Infrastructure {
        direction: Direction,
        #[source]
        source: InfrastructureError,
    },
}

impl CoreError {
    pub fn direction(&self) -> Direction {
        match self {
            CoreError::Domain { direction, .. } | CoreError::Infrastructure { direction, .. } => {
                *direction
            }
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
