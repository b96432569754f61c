//! `blockzip` — compress or decompress a single file or byte stream over
//! LZFSE, LZ4, zlib or LZMA.
//!
//! The public surface mirrors the three subsystems spec.md §1 names: the
//! [`codec`] polymorphism layer, the [`engine`] streaming driver, and the
//! [`orchestrator`] that composes everything (including [`io`],
//! [`path_resolver`], [`validate`] and [`progress`]) into one operation.
//! Argument parsing ([`cli`]) and human-facing error rendering live in
//! `main.rs`, outside this crate's core per spec.md §1.

pub mod cli;
pub mod codec;
pub mod engine;
pub mod error;
pub mod io;
pub mod level;
pub mod orchestrator;
pub mod path_resolver;
pub mod progress;
pub mod validate;
