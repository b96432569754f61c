//! Byte-source and byte-sink abstraction (spec.md §4.C, §9 "Polymorphism
//! across source/sink kinds").
//!
//! Grounded in `jafreck-lz4r`'s `io::file_io` module (`open_src_file`,
//! `open_dst_file`, the `STDIN_MARK`/`STDOUT_MARK` path sentinels), but
//! generalised: this crate has no legacy-frame sparse-file detection and no
//! interactive overwrite prompt — overwrite is a hard policy check
//! (`crate::validate`) that runs before a sink is ever opened.
//!
//! spec.md models `open`/`close` as explicit idempotent lifecycle calls on
//! an opaque resource. This implementation uses ownership instead: opening
//! a [`ByteSource`]/[`ByteSink`] consumes its descriptor and returns a
//! boxed `Read`/`Write` trait object whose `Drop` impl closes the
//! underlying handle exactly once, which is the idiomatic Rust equivalent
//! of the scoped-resource discipline spec.md §5 and §9 ask for.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::InfrastructureError;

/// Where bytes are read from (spec.md §3 `InputSource`).
#[derive(Debug, Clone)]
pub enum ByteSource {
    File(PathBuf),
    Stdin,
}

impl ByteSource {
    /// The path this source resolves to, if it is a file.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ByteSource::File(path) => Some(path),
            ByteSource::Stdin => None,
        }
    }

    /// Opens the underlying channel. Exactly-once semantics are upheld by
    /// Rust's ownership: this consumes `self`.
    pub fn open(self) -> Result<Box<dyn Read>, InfrastructureError> {
        match self {
            ByteSource::File(path) => {
                let file = File::open(&path).map_err(|source| InfrastructureError::SourceOpen {
                    path: path.display().to_string(),
                    source,
                })?;
                Ok(Box::new(file))
            }
            ByteSource::Stdin => Ok(Box::new(io::stdin())),
        }
    }
}

/// Where bytes are written to (spec.md §3 `OutputDestination`).
#[derive(Debug, Clone)]
pub enum ByteSink {
    File(PathBuf),
    Stdout,
}

impl ByteSink {
    /// The path this sink resolves to, if it is a file.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ByteSink::File(path) => Some(path),
            ByteSink::Stdout => None,
        }
    }

    /// Creates (or truncates) the underlying channel.
    ///
    /// Overwrite policy (spec.md §4.G) MUST have already been checked by
    /// the caller — this always creates/truncates a file destination
    /// unconditionally, matching spec.md §4.C: "the sink variant for a
    /// file path creates/truncates; overwrite policy is enforced before
    /// opening".
    pub fn open(self) -> Result<Box<dyn Write>, InfrastructureError> {
        match self {
            ByteSink::File(path) => {
                let file = OpenOptions::new()
                    .write(true)
                    .create(true)
                    .truncate(true)
                    .open(&path)
                    .map_err(|source| InfrastructureError::SinkOpen {
                        path: path.display().to_string(),
                        source,
                    })?;
                Ok(Box::new(file))
            }
            ByteSink::Stdout => Ok(Box::new(io::stdout())),
        }
    }
}
