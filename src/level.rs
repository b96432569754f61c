//! Compression level hint (spec.md §3, `CompressionLevel`).

use clap::ValueEnum;

/// A semantic hint that selects an engine buffer size and, on compress
/// without an explicit algorithm, a recommended codec.
///
/// Every codec accepts the level but is not required to let it change its
/// internal behaviour (spec.md §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CompressionLevel {
    /// Recommends LZ4; 256 KiB engine buffers.
    Fast,
    /// Recommends zlib; 64 KiB engine buffers.
    #[default]
    Balanced,
    /// Recommends LZMA; 64 KiB engine buffers.
    Best,
}

impl CompressionLevel {
    /// Engine chunk size in bytes for this level (spec.md §3, §4.D.1).
    pub const fn buffer_size(self) -> usize {
        match self {
            CompressionLevel::Fast => 256 * 1024,
            CompressionLevel::Balanced | CompressionLevel::Best => 64 * 1024,
        }
    }

    /// The algorithm recommended for this level when compressing without an
    /// explicit `-m`/`--algorithm` flag.
    pub const fn recommended_algorithm(self) -> &'static str {
        match self {
            CompressionLevel::Fast => "lz4",
            CompressionLevel::Balanced => "zlib",
            CompressionLevel::Best => "lzma",
        }
    }
}
