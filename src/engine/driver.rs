//! The streaming engine (spec.md §4.D) — the chunked drive loop shared by
//! all four codec capabilities.
//!
//! Each platform codec crate (`flate2`, `xz2`, `lz4_flex`, `lzfse`) exposes
//! its init/process/finalize state machine as a [`std::io::Read`] or
//! [`std::io::Write`] adapter around the *other* side of the pipe: a
//! compressing adapter wraps the sink (bytes pushed in are compressed and
//! forwarded), a decompressing adapter wraps the source (bytes pulled out
//! are decompressed on demand). [`copy_chunked`] is the one drive loop that
//! shuttles fixed-size chunks between whichever side is a plain byte
//! channel and whichever side is codec-owned, and is reused by every
//! codec capability in `crate::codec` — this is the "shared streaming
//! driver" of spec.md §4.D and §9.
//!
//! Bounded memory (spec.md §4.D.1): the only allocation this loop makes is
//! the single `buffer_size` chunk buffer; everything else is the codec
//! crate's own bounded internal state.

use std::io::{self, Read, Write};

use crate::error::{CodecPhase, Direction, InfrastructureError};

/// Byte counts observed by [`copy_chunked`]: how many bytes were read from
/// the plain (non-codec) side, and how many were written to the sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct DriveStats {
    pub bytes_read: u64,
    pub bytes_written: u64,
}

/// Shuttle bytes from `reader` to `writer` in `buffer_size` chunks until
/// `reader` reports end-of-stream.
///
/// `reader_is_codec` selects how a read failure is classified: when the
/// *reader* side is the codec-owned adapter (the decompress direction,
/// where decoding happens inside `read`), a read error is a codec-process
/// failure — distinguished into [`InfrastructureError::TruncatedInput`]
/// when the underlying cause looks like exhausted input, and a generic
/// [`InfrastructureError::CodecProcessError`] otherwise. When the reader is
/// the plain source (the compress direction), a read error is a
/// [`InfrastructureError::SourceRead`]. Write failures are always
/// [`InfrastructureError::SinkWrite`] — by construction the writer-side
/// codec adapters (the compress-direction encoders) only fail when their
/// underlying sink fails.
///
/// This is the single-pass, forward-only, bounded-memory drive loop of
/// spec.md §4.D.3: each iteration either drains the codec's pending output
/// or refills from the plain side — there is no seeking on either end.
pub fn copy_chunked(
    reader: &mut dyn Read,
    writer: &mut dyn Write,
    buffer_size: usize,
    algorithm: &'static str,
    direction: Direction,
    reader_is_codec: bool,
) -> Result<DriveStats, InfrastructureError> {
    let mut buf = vec![0u8; buffer_size];
    let mut stats = DriveStats::default();

    loop {
        let n = reader.read(&mut buf).map_err(|e| {
            classify_read_error(e, algorithm, direction, reader_is_codec)
        })?;
        if n == 0 {
            break;
        }
        log::trace!("{algorithm} {direction}: shuttling {n} byte chunk");
        stats.bytes_read += n as u64;
        writer
            .write_all(&buf[..n])
            .map_err(|source| InfrastructureError::SinkWrite { source })?;
        stats.bytes_written += n as u64;
    }

    Ok(stats)
}

fn classify_read_error(
    e: io::Error,
    algorithm: &'static str,
    direction: Direction,
    reader_is_codec: bool,
) -> InfrastructureError {
    if !reader_is_codec {
        return InfrastructureError::SourceRead { source: e };
    }
    if e.kind() == io::ErrorKind::UnexpectedEof {
        InfrastructureError::TruncatedInput { algorithm }
    } else {
        InfrastructureError::CodecProcessError {
            algorithm,
            direction,
            phase: CodecPhase::Process,
            cause: e.to_string(),
        }
    }
}

/// Maps a finalize-phase error (an encoder's `finish()` call) into the
/// codec-process failure taxonomy.
pub fn finalize_error(
    algorithm: &'static str,
    direction: Direction,
    cause: impl std::fmt::Display,
) -> InfrastructureError {
    InfrastructureError::CodecProcessError {
        algorithm,
        direction,
        phase: CodecPhase::Finalize,
        cause: cause.to_string(),
    }
}
