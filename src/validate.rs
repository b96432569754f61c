//! Validation policy (spec.md §4.G).
//!
//! Side-effect-free checks invoked early in orchestration. A few of them
//! (existence, symlink type) necessarily read filesystem metadata, but
//! none of them mutate anything — the distinction spec.md draws is "no
//! writes, no codec work", not "no syscalls at all".

use std::path::{Component, Path, PathBuf};

use crate::error::DomainError;

/// Input path: non-empty, no embedded NUL, no `..` components once the
/// path is lexically normalised.
pub fn validate_input_path(path: &Path) -> Result<(), DomainError> {
    validate_path_sanity(path, "input")
}

/// Output path: same sanity rule as the input path. The same-path check
/// against the input is a separate step ([`check_same_path`]) because it
/// needs both paths at once.
pub fn validate_output_path(path: &Path) -> Result<(), DomainError> {
    validate_path_sanity(path, "output")
}

fn validate_path_sanity(path: &Path, which: &str) -> Result<(), DomainError> {
    let as_str = path.as_os_str();
    if as_str.is_empty() {
        let reason = "path is empty".to_string();
        return Err(domain_path_error(which, reason));
    }
    #[cfg(unix)]
    {
        use std::os::unix::ffi::OsStrExt;
        if as_str.as_bytes().contains(&0) {
            return Err(domain_path_error(which, "path contains a NUL byte".to_string()));
        }
    }
    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(domain_path_error(
            which,
            "path contains a parent-directory traversal segment".to_string(),
        ));
    }
    Ok(())
}

fn domain_path_error(which: &str, reason: String) -> DomainError {
    if which == "input" {
        DomainError::InvalidInputPath { reason }
    } else {
        DomainError::InvalidOutputPath { reason }
    }
}

/// Checks that the algorithm name is present in the registry's supported
/// set (case-insensitive), returning the canonical lowercase name.
pub fn validate_algorithm(given: &str, supported: &[&'static str]) -> Result<String, DomainError> {
    let lower = given.to_ascii_lowercase();
    if supported.contains(&lower.as_str()) {
        Ok(lower)
    } else {
        Err(DomainError::UnknownAlgorithm {
            given: given.to_string(),
            supported: supported.to_vec(),
        })
    }
}

/// Rejects an output file path that canonicalises to the same file as the
/// input path (spec.md §3 invariant 2; §9 Open Question: canonicalise both
/// sides before comparing). Only meaningful when both sides are files.
pub fn check_same_path(input: &Path, output: &Path) -> Result<(), DomainError> {
    let input_canonical = match canonicalize_best_effort(input) {
        Some(p) => p,
        None => return Ok(()),
    };
    let output_canonical = match canonicalize_best_effort(output) {
        Some(p) => p,
        None => return Ok(()),
    };
    if input_canonical == output_canonical {
        Err(DomainError::SamePath { path: output_canonical })
    } else {
        Ok(())
    }
}

/// Canonicalises `path`, falling back to canonicalising its parent
/// directory and rejoining the file name when `path` itself does not yet
/// exist (the common case for a not-yet-created output file).
fn canonicalize_best_effort(path: &Path) -> Option<PathBuf> {
    if let Ok(canonical) = path.canonicalize() {
        return Some(canonical);
    }
    let file_name = path.file_name()?;
    let parent = match path.parent() {
        Some(p) if p.as_os_str().is_empty() => Path::new("."),
        Some(p) => p,
        None => return None,
    };
    let parent_canonical = parent.canonicalize().ok()?;
    Some(parent_canonical.join(file_name))
}

/// Overwrite policy: a file output that already exists requires `force`
/// (spec.md §4.G). Standard-out is exempt at the call site (invariant 3).
pub fn check_overwrite(output: &Path, force: bool) -> Result<(), DomainError> {
    if output.exists() && !force {
        Err(DomainError::OutputExists {
            path: output.to_path_buf(),
        })
    } else {
        Ok(())
    }
}

/// Symlink policy: a symlinked file input is rejected unless explicitly
/// allowed (spec.md §4.G "recommended extension").
pub fn check_symlink(input: &Path, allow_symlink: bool) -> Result<(), DomainError> {
    if allow_symlink {
        return Ok(());
    }
    match std::fs::symlink_metadata(input) {
        Ok(meta) if meta.file_type().is_symlink() => Err(DomainError::SymlinkRejected {
            path: input.to_path_buf(),
        }),
        _ => Ok(()),
    }
}

/// Confirms a file input exists, is a regular file, and is readable by the
/// time the orchestrator is about to open it.
pub fn check_input_readable(input: &Path) -> Result<(), DomainError> {
    match std::fs::metadata(input) {
        Ok(meta) if meta.is_file() => Ok(()),
        _ => Err(DomainError::InputUnreadable {
            path: input.to_path_buf(),
        }),
    }
}
