//! The zlib/DEFLATE codec capability, backed by `flate2`.
//!
//! `flate2`'s `ZlibEncoder<W>`/`ZlibDecoder<R>` already present the
//! init/process/finalize state machine of spec.md §4.D.2 as ordinary
//! `Read`/`Write` adapters, so the capability is exactly the "one-line
//! delegation plus its name" spec.md §9 describes.

use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::engine::driver::{copy_chunked, finalize_error};
use crate::error::{Direction, InfrastructureError};
use crate::level::CompressionLevel;

use super::CodecCapability;

const NAME: &str = "zlib";

pub struct Zlib;

impl CodecCapability for Zlib {
    fn name(&self) -> &'static str {
        NAME
    }

    fn compress_stream(
        &self,
        source: &mut dyn Read,
        sink: &mut dyn Write,
        buffer_size: usize,
        level: CompressionLevel,
    ) -> Result<(), InfrastructureError> {
        let mut encoder = ZlibEncoder::new(sink, compression_for(level));
        copy_chunked(source, &mut encoder, buffer_size, NAME, Direction::Compress, false)?;
        encoder
            .finish()
            .map_err(|e| finalize_error(NAME, Direction::Compress, e))?;
        Ok(())
    }

    fn decompress_stream(
        &self,
        source: &mut dyn Read,
        sink: &mut dyn Write,
        buffer_size: usize,
        _level: CompressionLevel,
    ) -> Result<(), InfrastructureError> {
        let mut decoder = ZlibDecoder::new(source);
        copy_chunked(&mut decoder, sink, buffer_size, NAME, Direction::Decompress, true)?;
        Ok(())
    }
}

fn compression_for(level: CompressionLevel) -> Compression {
    match level {
        CompressionLevel::Fast => Compression::fast(),
        CompressionLevel::Balanced => Compression::default(),
        CompressionLevel::Best => Compression::best(),
    }
}
