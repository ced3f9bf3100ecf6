use clap::Parser;
use deduplicate::cli::Cli;
use deduplicate::error::ExitCode;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn run(args: &[&str]) -> anyhow::Result<ExitCode> {
    let mut argv = vec!["deduplicate", "-q", "--no-color"];
    argv.extend_from_slice(args);
    deduplicate::run_app(Cli::try_parse_from(argv)?)
}

fn write(root: &Path, relative: &str, content: &[u8]) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn test_search_with_duplicates_exits_success() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.txt", b"hello");
    write(dir.path(), "b/a.txt", b"hello");
    let root = dir.path().to_str().unwrap();

    let code = run(&["search", "-d", root, "--no-progress"]).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert!(dir.path().join("b/a.txt").exists());
}

#[test]
fn test_search_without_duplicates() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.txt", b"hello");
    write(dir.path(), "c.txt", b"world");
    let root = dir.path().to_str().unwrap();

    let code = run(&["search", "-d", root, "--no-progress"]).unwrap();

    assert_eq!(code, ExitCode::NoDuplicates);
}

#[test]
fn test_search_missing_directory_is_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing");

    let result = run(&["search", "-d", missing.to_str().unwrap(), "--no-progress"]);

    assert!(result.is_err());
}

#[test]
fn test_forced_delete_keeps_priority_copy() {
    let dir = tempdir().unwrap();
    write(dir.path(), "archive/photo.jpg", b"pixels");
    write(dir.path(), "keep/photo.jpg", b"pixels");
    write(dir.path(), "unique.txt", b"only one");
    let root = dir.path().to_str().unwrap();

    let code = run(&[
        "search",
        "-d",
        root,
        "-p",
        "keep",
        "-x",
        "-f",
        "--no-progress",
    ])
    .unwrap();

    assert_eq!(code, ExitCode::Success);
    assert!(dir.path().join("keep/photo.jpg").exists());
    assert!(!dir.path().join("archive/photo.jpg").exists());
    assert!(dir.path().join("unique.txt").exists());
}

#[test]
fn test_forced_delete_with_dotted_priority_keeps_priority_copy() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a/f", b"same");
    write(dir.path(), "keep/f", b"same");
    let dotted_root = dir.path().join(".");
    let root = dotted_root.to_str().unwrap();

    let code = run(&[
        "search",
        "-d",
        root,
        "-p",
        "./keep",
        "-x",
        "-f",
        "--no-progress",
    ])
    .unwrap();

    assert_eq!(code, ExitCode::Success);
    assert!(dir.path().join("keep/f").exists());
    assert!(!dir.path().join("a/f").exists());
}

#[test]
fn test_json_output_without_force_deletes_nothing() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a", b"dup");
    write(dir.path(), "b", b"dup");
    let root = dir.path().to_str().unwrap();

    let code = run(&["search", "-d", root, "-x", "-o", "json"]).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert!(dir.path().join("a").exists());
    assert!(dir.path().join("b").exists());
}

#[test]
fn test_json_output_with_force_deletes_removals() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a", b"dup");
    write(dir.path(), "b", b"dup");
    let root = dir.path().to_str().unwrap();

    let code = run(&["search", "-d", root, "-x", "-f", "-o", "json"]).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert!(dir.path().join("a").exists());
    assert!(!dir.path().join("b").exists());
}

#[test]
fn test_parallel_search_via_cli() {
    let dir = tempdir().unwrap();
    for i in 0..8 {
        write(dir.path(), &format!("f{i}"), format!("{}", i % 2).as_bytes());
    }
    let root = dir.path().to_str().unwrap();

    let code = run(&[
        "search",
        "-d",
        root,
        "--io-threads",
        "3",
        "--algorithm",
        "blake3",
        "--no-progress",
    ])
    .unwrap();

    assert_eq!(code, ExitCode::Success);
}

#[test]
fn test_version_subcommand() {
    assert_eq!(run(&["version"]).unwrap(), ExitCode::Success);
}
