use file_catalog::catalog::Catalog;
use file_catalog::cli::ReportFormat;
use file_catalog::duplicates::find_duplicates;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

/// a.txt and b.txt share content, c.txt differs.
fn hashed_storage() -> (TempDir, std::path::PathBuf) {
    let dir = tempdir().unwrap();
    let storage = dir.path().join("storage");
    fs::create_dir(&storage).unwrap();
    fs::write(storage.join("a.txt"), "hello").unwrap();
    fs::write(storage.join("b.txt"), "hello").unwrap();
    fs::write(storage.join("c.txt"), "world").unwrap();
    let output = dir.path().join("file_metadata.json");
    file_catalog::run_hash(&storage, &output, 4, None).unwrap();
    (dir, output)
}

fn file_name(path: &Path) -> &str {
    path.file_name().unwrap().to_str().unwrap()
}

#[test]
fn test_end_to_end_single_pair() {
    let (_dir, output) = hashed_storage();

    let catalog = Catalog::load(&output).unwrap();
    let pairs = find_duplicates(&catalog);

    assert_eq!(catalog.len(), 3);
    assert_eq!(pairs.len(), 1);
    let mut names = [file_name(&pairs[0].first.path), file_name(&pairs[0].second.path)];
    names.sort_unstable();
    assert_eq!(names, ["a.txt", "b.txt"]);
    #[cfg(not(feature = "blake3"))]
    assert_eq!(
        pairs[0].fingerprint.as_str(),
        "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
    );
}

#[test]
fn test_dupes_table() {
    let (_dir, output) = hashed_storage();
    let mut out = Vec::new();

    let summary = file_catalog::run_dupes(&output, ReportFormat::Table, false, &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("Hash"));
    assert!(lines[1].contains("a.txt"));
    assert!(lines[1].contains("b.txt"));
    assert!(!lines[1].contains("c.txt"));
    assert_eq!(summary.duplicate_pairs, 1);
    assert_eq!(summary.reclaimable_bytes, 5);
}

#[test]
fn test_dupes_json() {
    let (_dir, output) = hashed_storage();
    let mut out = Vec::new();

    file_catalog::run_dupes(&output, ReportFormat::Json, false, &mut out).unwrap();

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["pairs"].as_array().unwrap().len(), 1);
    assert_eq!(value["summary"]["total_entries"], 3);
    assert_eq!(value["summary"]["duplicate_groups"], 1);
}

#[test]
fn test_dupes_csv() {
    let (_dir, output) = hashed_storage();
    let mut out = Vec::new();

    file_catalog::run_dupes(&output, ReportFormat::Csv, false, &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), 2);
    assert!(text.starts_with("hash,file_1,created_at_1,file_2,created_at_2\n"));
}

#[test]
fn test_dupes_without_duplicates() {
    let dir = tempdir().unwrap();
    let storage = dir.path().join("storage");
    fs::create_dir(&storage).unwrap();
    for (i, content) in ["one", "two", "three"].iter().enumerate() {
        fs::write(storage.join(format!("{i}.txt")), content).unwrap();
    }
    let output = dir.path().join("catalog.json");
    file_catalog::run_hash(&storage, &output, 2, None).unwrap();
    let mut out = Vec::new();

    let summary = file_catalog::run_dupes(&output, ReportFormat::Table, false, &mut out).unwrap();

    assert!(!summary.has_duplicates());
    assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
}

#[test]
fn test_dupes_missing_catalog_writes_nothing() {
    let dir = tempdir().unwrap();
    let mut out = Vec::new();

    let err = file_catalog::run_dupes(
        &dir.path().join("missing.json"),
        ReportFormat::Table,
        false,
        &mut out,
    )
    .unwrap_err();

    assert!(format!("{err:#}").contains("missing.json"));
    assert!(out.is_empty());
}

#[test]
fn test_show_lists_every_entry() {
    let (_dir, output) = hashed_storage();
    let mut out = Vec::new();

    let count = file_catalog::run_show(&output, &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(count, 3);
    assert_eq!(text.lines().count(), 3);
    for line in text.lines() {
        assert!(line.starts_with("File: "));
        assert!(line.contains("Created By: unknown"));
        assert!(line.ends_with("Accessed By: unknown"));
    }
}

#[test]
fn test_show_malformed_catalog_writes_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, "not json").unwrap();
    let mut out = Vec::new();

    assert!(file_catalog::run_show(&path, &mut out).is_err());
    assert!(out.is_empty());
}
