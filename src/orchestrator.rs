//! Orchestrator (spec.md §4.H).
//!
//! Composes the registry, path resolver, validation policy, byte
//! source/sink, progress tracker and streaming engine into one operation,
//! end to end, with the cleanup-on-failure discipline spec.md §4.H and §5
//! demand: "successful termination implies a complete output; any failure
//! implies the output does not exist."

use std::io::IsTerminal;
use std::path::PathBuf;

use crate::codec::Registry;
use crate::error::{CoreError, CoreResult, DomainError, Direction, InfrastructureError};
use crate::io::{ByteSink, ByteSource};
use crate::level::CompressionLevel;
use crate::path_resolver;
use crate::progress::{select_reporter, ProgressTracker};
use crate::validate;

/// A single compress-or-decompress request (spec.md §6, the CLI layer's
/// request object).
#[derive(Debug, Clone)]
pub struct Request {
    pub direction: Direction,
    pub input: ByteSource,
    pub output: Option<ByteSink>,
    pub algorithm: Option<String>,
    pub level: CompressionLevel,
    pub force: bool,
    pub progress_enabled: bool,
    /// Explicit opt-in to process a symlinked file input (spec.md §4.G).
    pub allow_symlink: bool,
}

/// Runs `request` to completion, dispatching on its direction.
pub fn run(registry: &Registry, request: Request) -> CoreResult<()> {
    let direction = request.direction;
    let mut cleanup_path: Option<PathBuf> = None;
    let result = execute(registry, &request, &mut cleanup_path);
    if result.is_err() {
        if let Some(path) = cleanup_path {
            log::debug!("removing partial output {}", path.display());
            let _ = std::fs::remove_file(path);
        }
    }
    result.map_err(|source| match source {
        Failure::Domain(source) => CoreError::Domain { direction, source },
        Failure::Infrastructure(source) => CoreError::Infrastructure { direction, source },
    })
}

enum Failure {
    Domain(DomainError),
    Infrastructure(InfrastructureError),
}

impl From<DomainError> for Failure {
    fn from(e: DomainError) -> Self {
        Failure::Domain(e)
    }
}

impl From<InfrastructureError> for Failure {
    fn from(e: InfrastructureError) -> Self {
        Failure::Infrastructure(e)
    }
}

fn execute(registry: &Registry, request: &Request, cleanup_path: &mut Option<PathBuf>) -> Result<(), Failure> {
    // Step 1: resolve algorithm.
    let algorithm = resolve_algorithm(request)?;
    log::debug!("resolved algorithm: {algorithm}");

    // Step 2: validate.
    if let Some(path) = request.input.path() {
        validate::validate_input_path(path)?;
        validate::check_input_readable(path)?;
        validate::check_symlink(path, request.allow_symlink)
            .inspect_err(|e| log::warn!("rejecting request: {e}"))?;
    }
    let canonical_algorithm = validate::validate_algorithm(&algorithm, &registry.supported())
        .inspect_err(|e| log::warn!("rejecting request: {e}"))?;
    let capability = registry
        .lookup(&canonical_algorithm)
        .expect("validate_algorithm already confirmed the name is registered");

    // Step 3: resolve output destination.
    let output = resolve_output(request, &canonical_algorithm)?;
    log::debug!("resolved output: {:?}", output.path());

    // Step 4: check output (overwrite, same-path).
    if let Some(output_path) = output.path() {
        if let Some(input_path) = request.input.path() {
            validate::check_same_path(input_path, output_path).inspect_err(|e| log::warn!("rejecting request: {e}"))?;
        }
        validate::check_overwrite(output_path, request.force)
            .inspect_err(|e| log::warn!("rejecting request: {e}"))?;
    }

    // Step 5: select reporter.
    let sink_is_stdout = matches!(output, ByteSink::Stdout);
    let stderr_is_terminal = std::io::stderr().is_terminal();
    let total = total_size_hint(&request.input);
    let reporter = select_reporter(request.progress_enabled, sink_is_stdout, stderr_is_terminal, total);

    // Step 6: open source and sink.
    let raw_source = request.input.clone().open()?;
    let mut sink = output.clone().open()?;
    *cleanup_path = output.path().map(|p| p.to_path_buf());
    let mut tracked_source = ProgressTracker::new(raw_source, reporter, total);

    // Step 7: drive the engine.
    let buffer_size = request.level.buffer_size();
    let drive_result = match request.direction {
        Direction::Compress => {
            capability.compress_stream(&mut tracked_source, &mut sink, buffer_size, request.level)
        }
        Direction::Decompress => {
            capability.decompress_stream(&mut tracked_source, &mut sink, buffer_size, request.level)
        }
    };

    // Step 8: finalise (reporter completion; source/sink close on drop).
    tracked_source.finish();
    drive_result?;
    drop(sink);
    drop(tracked_source);

    // Step 9: success — nothing to clean up.
    *cleanup_path = None;
    Ok(())
}

fn resolve_algorithm(request: &Request) -> Result<String, DomainError> {
    match request.direction {
        Direction::Compress => match &request.algorithm {
            Some(name) => Ok(name.clone()),
            None => {
                if request.input.path().is_none() {
                    // spec.md §3 invariant 5: stdin source, compress, no
                    // explicit algorithm — the level's recommendation does
                    // not satisfy the MUST-be-explicit rule.
                    return Err(DomainError::MissingAlgorithm);
                }
                Ok(request.level.recommended_algorithm().to_string())
            }
        },
        Direction::Decompress => match &request.algorithm {
            Some(name) => Ok(name.clone()),
            None => request
                .input
                .path()
                .and_then(path_resolver::algorithm_from_extension)
                .map(str::to_string)
                .ok_or(DomainError::MissingAlgorithm),
        },
    }
}

fn resolve_output(request: &Request, algorithm: &str) -> Result<ByteSink, DomainError> {
    if let Some(sink) = &request.output {
        if let Some(path) = sink.path() {
            validate::validate_output_path(path)?;
        }
        return Ok(sink.clone());
    }

    if !std::io::stdout().is_terminal() {
        return Ok(ByteSink::Stdout);
    }

    let input_path = request.input.path().ok_or(DomainError::UndefinedOutput)?;
    let default = match request.direction {
        Direction::Compress => path_resolver::compress_default_output(input_path, algorithm),
        Direction::Decompress => {
            path_resolver::decompress_default_output(input_path, |p| p.exists())
                .ok_or(DomainError::UndefinedOutput)?
        }
    };
    validate::validate_output_path(&default)?;
    Ok(ByteSink::File(default))
}

fn total_size_hint(input: &ByteSource) -> Option<u64> {
    input
        .path()
        .and_then(|path| std::fs::metadata(path).ok())
        .map(|meta| meta.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        Registry::with_defaults()
    }

    #[test]
    fn compresses_and_decompresses_a_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let input_path = dir.path().join("hello.txt");
        std::fs::write(&input_path, b"Hello, World!\n").unwrap();

        let registry = registry();
        let compress_request = Request {
            direction: Direction::Compress,
            input: ByteSource::File(input_path.clone()),
            output: None,
            algorithm: Some("lz4".to_string()),
            level: CompressionLevel::Balanced,
            force: false,
            progress_enabled: false,
            allow_symlink: false,
        };
        run(&registry, compress_request).unwrap();

        let compressed_path = dir.path().join("hello.txt.lz4");
        assert!(compressed_path.exists());

        let decompress_request = Request {
            direction: Direction::Decompress,
            input: ByteSource::File(compressed_path.clone()),
            output: None,
            algorithm: None,
            level: CompressionLevel::Balanced,
            force: false,
            progress_enabled: false,
            allow_symlink: false,
        };
        run(&registry, decompress_request).unwrap();

        let restored_path = dir.path().join("hello.txt");
        assert_eq!(std::fs::read(&restored_path).unwrap(), b"Hello, World!\n");
    }

    #[test]
    fn unknown_algorithm_is_rejected_before_any_file_is_touched() {
        let dir = tempfile::tempdir().unwrap();
        let input_path = dir.path().join("file.txt");
        std::fs::write(&input_path, b"data").unwrap();

        let registry = registry();
        let request = Request {
            direction: Direction::Compress,
            input: ByteSource::File(input_path),
            output: Some(ByteSink::File(dir.path().join("file.txt.xyz"))),
            algorithm: Some("xyz".to_string()),
            level: CompressionLevel::Balanced,
            force: false,
            progress_enabled: false,
            allow_symlink: false,
        };
        let err = run(&registry, request).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Domain { source: DomainError::UnknownAlgorithm { .. }, .. }
        ));
        assert!(!dir.path().join("file.txt.xyz").exists());
    }

    #[test]
    fn overwrite_without_force_leaves_existing_output_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let input_path = dir.path().join("file.txt");
        std::fs::write(&input_path, b"data").unwrap();
        let output_path = dir.path().join("file.txt.lzma");
        std::fs::write(&output_path, b"already here").unwrap();

        let registry = registry();
        let request = Request {
            direction: Direction::Compress,
            input: ByteSource::File(input_path),
            output: Some(ByteSink::File(output_path.clone())),
            algorithm: Some("lzma".to_string()),
            level: CompressionLevel::Balanced,
            force: false,
            progress_enabled: false,
            allow_symlink: false,
        };
        let err = run(&registry, request).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Domain { source: DomainError::OutputExists { .. }, .. }
        ));
        assert_eq!(std::fs::read(&output_path).unwrap(), b"already here");
    }

    #[test]
    fn truncated_input_fails_and_removes_partial_output() {
        let dir = tempfile::tempdir().unwrap();
        let input_path = dir.path().join("file.txt");
        std::fs::write(&input_path, vec![b'x'; 5000]).unwrap();

        let registry = registry();
        let compressed_path = dir.path().join("file.txt.zlib");
        run(
            &registry,
            Request {
                direction: Direction::Compress,
                input: ByteSource::File(input_path),
                output: Some(ByteSink::File(compressed_path.clone())),
                algorithm: Some("zlib".to_string()),
                level: CompressionLevel::Balanced,
                force: false,
                progress_enabled: false,
                allow_symlink: false,
            },
        )
        .unwrap();

        let mut bytes = std::fs::read(&compressed_path).unwrap();
        bytes.truncate(bytes.len() - 1);
        std::fs::write(&compressed_path, &bytes).unwrap();

        let output_path = dir.path().join("a.out");

        let err = run(
            &registry,
            Request {
                direction: Direction::Decompress,
                input: ByteSource::File(compressed_path),
                output: Some(ByteSink::File(output_path.clone())),
                algorithm: Some("zlib".to_string()),
                level: CompressionLevel::Balanced,
                force: false,
                progress_enabled: false,
                allow_symlink: false,
            },
        )
        .unwrap_err();

        assert!(matches!(err, CoreError::Infrastructure { .. }));
        assert!(!output_path.exists());
    }

    #[test]
    fn compress_from_stdin_without_algorithm_is_rejected() {
        let registry = registry();
        let request = Request {
            direction: Direction::Compress,
            input: ByteSource::Stdin,
            output: Some(ByteSink::Stdout),
            algorithm: None,
            level: CompressionLevel::Fast,
            force: false,
            progress_enabled: false,
            allow_symlink: false,
        };
        let err = run(&registry, request).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Domain { source: DomainError::MissingAlgorithm, .. }
        ));
    }

    #[test]
    fn same_path_is_rejected_before_any_codec_work() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.txt");
        std::fs::write(&path, b"data").unwrap();

        let registry = registry();
        let err = run(
            &registry,
            Request {
                direction: Direction::Compress,
                input: ByteSource::File(path.clone()),
                output: Some(ByteSink::File(path)),
                algorithm: Some("lz4".to_string()),
                level: CompressionLevel::Balanced,
                force: false,
                progress_enabled: false,
                allow_symlink: false,
            },
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Domain { source: DomainError::SamePath { .. }, .. }
        ));
    }
}
