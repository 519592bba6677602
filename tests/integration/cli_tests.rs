use clap::Parser;
use file_catalog::cli::Cli;
use file_catalog::error::{ExitCode, StructuredError};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_run_app_hash_then_show() {
    let dir = tempdir().unwrap();
    let storage = dir.path().join("storage");
    fs::create_dir(&storage).unwrap();
    fs::write(storage.join("a.txt"), "hello").unwrap();
    let output = dir.path().join("catalog.json");

    let cli = Cli::try_parse_from([
        "file-catalog",
        "-q",
        "hash",
        "--storage",
        storage.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
        "--jobs",
        "2",
    ])
    .unwrap();
    assert_eq!(file_catalog::run_app(cli).unwrap(), ExitCode::Success);
    assert!(output.exists());

    let cli = Cli::try_parse_from([
        "file-catalog",
        "-q",
        "--no-color",
        "dupes",
        "-i",
        output.to_str().unwrap(),
    ])
    .unwrap();
    assert_eq!(file_catalog::run_app(cli).unwrap(), ExitCode::Success);
}

#[test]
fn test_run_app_missing_catalog_fails() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nothing.json");

    let cli = Cli::try_parse_from([
        "file-catalog",
        "-q",
        "show",
        "--input",
        missing.to_str().unwrap(),
    ])
    .unwrap();
    let err = file_catalog::run_app(cli).unwrap_err();

    let structured = StructuredError::new(&err, ExitCode::GeneralError);
    assert_eq!(structured.code, "FC001");
    assert_eq!(structured.exit_code, 1);
    assert!(structured.message.contains("nothing.json"));
}
