//! Codec polymorphism layer (spec.md §4.A, §4.B, §9 "Polymorphism across
//! four codecs").
//!
//! A [`CodecCapability`] is the uniform contract the four algorithms
//! implement; [`registry::Registry`] is the name → capability lookup table.
//! Every implementation delegates its real work to
//! [`crate::engine::driver::copy_chunked`] and contributes only its name and
//! the call into its platform codec crate — exactly the "one-line
//! delegation plus its name" shape spec.md §9 asks for.

mod lz4;
mod lzfse;
mod lzma;
mod registry;
mod zlib;

pub use registry::Registry;

use std::io::{Read, Write};

use crate::error::InfrastructureError;
use crate::level::CompressionLevel;

/// The capability set every codec exposes (spec.md §4.B).
///
/// `source` and `sink` are already-opened trait objects (spec.md §9:
/// "the streaming engine should accept an already-opened reader/writer
/// trait object") — the capability owns no knowledge of files, paths, or
/// standard streams.
pub trait CodecCapability: Send + Sync {
    /// The canonical, lowercase algorithm name (spec.md §3).
    fn name(&self) -> &'static str;

    /// Pushes `source` through the encoder and writes the encoded artifact
    /// to `sink`. At most one pass over `source`; deterministic
    /// termination (spec.md §4.B).
    fn compress_stream(
        &self,
        source: &mut dyn Read,
        sink: &mut dyn Write,
        buffer_size: usize,
        level: CompressionLevel,
    ) -> Result<(), InfrastructureError>;

    /// Symmetric with [`CodecCapability::compress_stream`].
    fn decompress_stream(
        &self,
        source: &mut dyn Read,
        sink: &mut dyn Write,
        buffer_size: usize,
        level: CompressionLevel,
    ) -> Result<(), InfrastructureError>;
}
