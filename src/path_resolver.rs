//! Path resolver (spec.md §4.F).
//!
//! Pure string/path logic; no I/O. The "already exists" check needed by
//! the decompress default-path rule is supplied by the caller as a
//! predicate (spec.md §8, testable property 7: "outputs are a pure
//! function of inputs plus the exists-predicate callback supplied for the
//! decompress case"), so this module never touches the filesystem itself.

use std::path::{Path, PathBuf};

const ALGORITHM_NAMES: [&str; 4] = ["lzfse", "lz4", "zlib", "lzma"];

/// Default compressed-output path: `P` with `.{algorithm}` appended as the
/// final extension (spec.md §4.F, §6).
pub fn compress_default_output(input: &Path, algorithm: &str) -> PathBuf {
    let mut out = input.as_os_str().to_owned();
    out.push(".");
    out.push(algorithm);
    PathBuf::from(out)
}

/// Default decompressed-output path: strip the final extension if (and
/// only if) it names a registered algorithm. If the stripped path already
/// exists (per `exists`), append the literal suffix `.out`.
///
/// Returns `None` when the input's last extension is not an algorithm
/// name — the caller must supply an explicit output in that case.
pub fn decompress_default_output(input: &Path, exists: impl Fn(&Path) -> bool) -> Option<PathBuf> {
    let algorithm = algorithm_from_extension(input)?;
    let _ = algorithm;
    let stripped = strip_last_extension(input);
    if exists(&stripped) {
        let mut with_suffix = stripped.into_os_string();
        with_suffix.push(".out");
        Some(PathBuf::from(with_suffix))
    } else {
        Some(stripped)
    }
}

/// Infers the algorithm from the input path's last extension. `None` if
/// the extension is absent or not one of the closed algorithm names.
pub fn algorithm_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?;
    ALGORITHM_NAMES.iter().copied().find(|name| *name == ext)
}

fn strip_last_extension(path: &Path) -> PathBuf {
    match path.file_stem() {
        Some(stem) => match path.parent() {
            Some(parent) if parent.as_os_str().is_empty() => PathBuf::from(stem),
            Some(parent) => parent.join(stem),
            None => PathBuf::from(stem),
        },
        None => path.to_path_buf(),
    }
}
