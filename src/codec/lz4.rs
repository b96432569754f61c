//! The LZ4 codec capability, backed by `lz4_flex`'s frame format.
//!
//! `lz4_flex` has no raw init/process/finalize cursor API (unlike
//! `flate2`/`xz2`); its `frame::FrameEncoder<W>`/`frame::FrameDecoder<R>`
//! are the idiomatic `Write`/`Read` wrappers and slot into the same shared
//! driver as the other three codecs.

use std::io::{Read, Write};

use lz4_flex::frame::{FrameDecoder, FrameEncoder};

use crate::engine::driver::{copy_chunked, finalize_error};
use crate::error::{Direction, InfrastructureError};
use crate::level::CompressionLevel;

use super::CodecCapability;

const NAME: &str = "lz4";

pub struct Lz4;

impl CodecCapability for Lz4 {
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
        let mut encoder = FrameEncoder::new(sink);
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
        let mut decoder = FrameDecoder::new(source);
        copy_chunked(&mut decoder, sink, buffer_size, NAME, Direction::Decompress, true)?;
        Ok(())
    }
}
