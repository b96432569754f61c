//! Binary-level integration tests mirroring the seed scenarios in
//! spec.md §8.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

fn blockzip() -> Command {
    Command::cargo_bin("blockzip").unwrap()
}

#[test]
fn s1_compress_and_decompress_round_trip_with_default_path() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("hello.txt");
    fs::write(&input, b"Hello, World!\n").unwrap();

    blockzip()
        .current_dir(dir.path())
        .args(["compress", "hello.txt", "-m", "lzfse"])
        .assert()
        .success()
        .stdout("");

    let artifact = dir.path().join("hello.txt.lzfse");
    assert!(artifact.exists());

    blockzip()
        .current_dir(dir.path())
        .args(["decompress", "hello.txt.lzfse", "-m", "lzfse", "-o", "roundtrip.txt"])
        .assert()
        .success();

    assert_eq!(fs::read(dir.path().join("roundtrip.txt")).unwrap(), b"Hello, World!\n");
}

#[test]
fn s3_truncated_artifact_fails_and_leaves_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("file.txt");
    fs::write(&input, vec![b'z'; 20_000]).unwrap();

    blockzip()
        .current_dir(dir.path())
        .args(["compress", "file.txt", "-m", "lzfse", "-o", "a.lzfse"])
        .assert()
        .success();

    let artifact_path = dir.path().join("a.lzfse");
    let mut bytes = fs::read(&artifact_path).unwrap();
    bytes.truncate(bytes.len() - 1);
    fs::write(&artifact_path, bytes).unwrap();

    blockzip()
        .current_dir(dir.path())
        .args(["decompress", "a.lzfse", "-m", "lzfse", "-o", "a.out"])
        .assert()
        .failure();

    assert!(!dir.path().join("a.out").exists());
}

#[test]
fn s4_piped_stdin_to_piped_stdout_with_explicit_algorithm() {
    let input: String = (1..=1000).map(|n| format!("{n}\n")).collect();

    blockzip()
        .args(["compress", "-", "-m", "zlib"])
        .write_stdin(input)
        .assert()
        .success()
        .stderr("");
}

#[test]
fn s5_overwrite_without_force_fails_and_preserves_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("file.txt");
    fs::write(&input, b"payload").unwrap();
    let existing = dir.path().join("file.txt.lzma");
    fs::write(&existing, b"do not touch me").unwrap();

    blockzip()
        .current_dir(dir.path())
        .args(["compress", "file.txt", "-m", "lzma"])
        .assert()
        .failure()
        .stderr(contains("force"));

    assert_eq!(fs::read(&existing).unwrap(), b"do not touch me");
}

#[test]
fn s6_unknown_algorithm_reports_supported_set() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("file.txt");
    fs::write(&input, b"payload").unwrap();

    blockzip()
        .current_dir(dir.path())
        .args(["compress", "file.txt", "-m", "xyz"])
        .assert()
        .failure()
        .stderr(contains("lzfse").and(contains("lz4")).and(contains("lzma")).and(contains("zlib")));
}

#[test]
fn compress_from_stdin_without_algorithm_fails_before_any_file_is_created() {
    let dir = tempfile::tempdir().unwrap();

    blockzip()
        .current_dir(dir.path())
        .args(["compress", "-", "-o", "out.bin"])
        .write_stdin("payload")
        .assert()
        .failure();

    assert!(!dir.path().join("out.bin").exists());
}

#[test]
fn decompress_from_stdin_without_algorithm_fails_before_any_file_is_created() {
    let dir = tempfile::tempdir().unwrap();

    blockzip()
        .current_dir(dir.path())
        .args(["decompress", "-", "-o", "out.bin"])
        .write_stdin("")
        .assert()
        .failure();

    assert!(!dir.path().join("out.bin").exists());
}

#[test]
fn empty_file_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.bin");
    fs::write(&input, b"").unwrap();

    blockzip()
        .current_dir(dir.path())
        .args(["compress", "empty.bin", "-m", "lz4", "-o", "empty.lz4"])
        .assert()
        .success();

    blockzip()
        .current_dir(dir.path())
        .args(["decompress", "empty.lz4", "-m", "lz4", "-o", "empty.restored"])
        .assert()
        .success();

    assert_eq!(fs::read(dir.path().join("empty.restored")).unwrap(), Vec::<u8>::new());
}
