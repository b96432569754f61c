//! The LZFSE codec capability.
//!
//! LZFSE is Apple's Compression.framework algorithm (the provenance of
//! this whole tool — see `martial-plains-rust-macios`'s raw
//! `compression_stream_*` FFI bindings for the C-level shape this crate's
//! `lzfse` dependency wraps safely). Its `Writer`/`Reader` types mirror
//! `flate2`'s encoder/decoder convention closely enough to use the same
//! shared driver.

use std::io::{Read, Write};

use lzfse::{LzfseReader, LzfseWriter};

use crate::engine::driver::{copy_chunked, finalize_error};
use crate::error::{Direction, InfrastructureError};
use crate::level::CompressionLevel;

use super::CodecCapability;

const NAME: &str = "lzfse";

pub struct Lzfse;

impl CodecCapability for Lzfse {
    fn name(&self) -> &'static str {
        NAME
    }

    fn compress_stream(
        &self,
        source: &mut dyn Read,
        sink: &mut dyn Write,
        buffer_size: usize,
        _level: CompressionLevel,
    ) -> Result<(), InfrastructureError> {
        let mut encoder = LzfseWriter::new(sink);
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
        let mut decoder = LzfseReader::new(source);
        copy_chunked(&mut decoder, sink, buffer_size, NAME, Direction::Decompress, true)?;
        Ok(())
    }
}
