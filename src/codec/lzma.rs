//! The LZMA codec capability, backed by `xz2` (liblzma).
//!
//! Same shape as [`super::zlib`]: `xz2::read::XzDecoder` /
//! `xz2::write::XzEncoder` are `Read`/`Write` adapters over liblzma's own
//! init/process/finalize machinery.

use std::io::{Read, Write};

use xz2::read::XzDecoder;
use xz2::stream::{Check, Stream};
use xz2::write::XzEncoder;

use crate::engine::driver::{copy_chunked, finalize_error};
use crate::error::{Direction, InfrastructureError};
use crate::level::CompressionLevel;

use super::CodecCapability;

const NAME: &str = "lzma";

pub struct Lzma;

impl CodecCapability for Lzma {
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
        let stream = Stream::new_easy_encoder(preset_for(level), Check::Crc64).map_err(|_| {
            InfrastructureError::CodecInitFailed {
                algorithm: NAME,
                direction: Direction::Compress,
            }
        })?;
        let mut encoder = XzEncoder::new_stream(sink, stream);
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
        // memlimit::MAX, no flags: accepts exactly what new_easy_encoder produced above.
        let stream = Stream::new_stream_decoder(u64::MAX, 0).map_err(|_| {
            InfrastructureError::CodecInitFailed {
                algorithm: NAME,
                direction: Direction::Decompress,
            }
        })?;
        let mut decoder = XzDecoder::new_stream(source, stream);
        copy_chunked(&mut decoder, sink, buffer_size, NAME, Direction::Decompress, true)?;
        Ok(())
    }
}

fn preset_for(level: CompressionLevel) -> u32 {
    match level {
        CompressionLevel::Fast => 1,
        CompressionLevel::Balanced => 6,
        CompressionLevel::Best => 9,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn round_trips_a_short_message() {
        let codec = Lzma;
        let original = b"the quick brown fox jumps over the lazy dog".to_vec();

        let mut compressed = Vec::new();
        codec
            .compress_stream(
                &mut Cursor::new(original.clone()),
                &mut compressed,
                64 * 1024,
                CompressionLevel::Best,
            )
            .unwrap();

        let mut restored = Vec::new();
        codec
            .decompress_stream(&mut Cursor::new(compressed), &mut restored, 64 * 1024, CompressionLevel::Best)
            .unwrap();

        assert_eq!(restored, original);
    }

    #[test]
    fn round_trips_one_byte() {
        let codec = Lzma;
        let original = vec![0x42u8];
        let mut compressed = Vec::new();
        codec
            .compress_stream(&mut Cursor::new(original.clone()), &mut compressed, 4096, CompressionLevel::Balanced)
            .unwrap();

        let mut restored = Vec::new();
        codec
            .decompress_stream(&mut Cursor::new(compressed), &mut restored, 4096, CompressionLevel::Balanced)
            .unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn round_trips_payloads_spanning_the_64kib_buffer_boundary() {
        let codec = Lzma;
        for len in [65535usize, 65536, 65537] {
            let original: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();

            let mut compressed = Vec::new();
            codec
                .compress_stream(
                    &mut Cursor::new(original.clone()),
                    &mut compressed,
                    64 * 1024,
                    CompressionLevel::Fast,
                )
                .unwrap();

            let mut restored = Vec::new();
            codec
                .decompress_stream(&mut Cursor::new(compressed), &mut restored, 64 * 1024, CompressionLevel::Fast)
                .unwrap();
            assert_eq!(restored, original, "payload length {len}");
        }
    }
}
