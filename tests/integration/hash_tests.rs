use file_catalog::catalog::Catalog;
use file_catalog::logging::MemorySink;
use file_catalog::pipeline::HashingPipeline;
use file_catalog::scanner::{ContentHasher, FileEnumerator};
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::tempdir;

fn fingerprints(catalog: &Catalog) -> BTreeSet<(PathBuf, String)> {
    catalog
        .iter()
        .map(|e| (e.path.clone(), e.fingerprint.to_string()))
        .collect()
}

#[test]
fn test_hash_empty_directory() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("catalog.json");
    let storage = dir.path().join("storage");
    fs::create_dir(&storage).unwrap();

    let report = file_catalog::run_hash(&storage, &output, 4, None).unwrap();

    assert!(report.catalog.is_empty());
    assert_eq!(fs::read_to_string(&output).unwrap(), "[]");
}

#[test]
fn test_hash_writes_every_file() {
    let dir = tempdir().unwrap();
    let storage = dir.path().join("storage");
    fs::create_dir_all(storage.join("nested/deeper")).unwrap();
    File::create(storage.join("a.txt"))
        .unwrap()
        .write_all(b"alpha")
        .unwrap();
    File::create(storage.join("nested/b.txt"))
        .unwrap()
        .write_all(b"beta")
        .unwrap();
    File::create(storage.join("nested/deeper/c.txt"))
        .unwrap()
        .write_all(b"")
        .unwrap();
    let output = dir.path().join("catalog.json");

    let report = file_catalog::run_hash(&storage, &output, 2, None).unwrap();
    let loaded = Catalog::load(&output).unwrap();

    assert_eq!(report.catalog.len(), 3);
    assert_eq!(loaded, report.catalog);
    let empty = loaded
        .iter()
        .find(|e| e.path.ends_with("c.txt"))
        .unwrap();
    assert_eq!(empty.size, 0);
    assert_eq!(
        empty.fingerprint,
        ContentHasher::new().hash_reader(&b""[..]).unwrap()
    );
}

#[test]
fn test_hash_missing_storage_writes_nothing() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("catalog.json");

    let err = file_catalog::run_hash(&dir.path().join("absent"), &output, 2, None).unwrap_err();

    assert!(format!("{err:#}").contains("absent"));
    assert!(!output.exists());
}

#[test]
fn test_hash_keeps_previous_catalog_on_enumeration_failure() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("catalog.json");
    fs::write(&output, "[]").unwrap();
    let not_a_dir = dir.path().join("file.txt");
    fs::write(&not_a_dir, "x").unwrap();

    assert!(file_catalog::run_hash(&not_a_dir, &output, 2, None).is_err());
    assert_eq!(fs::read_to_string(&output).unwrap(), "[]");
}

#[test]
fn test_hash_overwrites_existing_catalog() {
    let dir = tempdir().unwrap();
    let storage = dir.path().join("storage");
    fs::create_dir(&storage).unwrap();
    fs::write(storage.join("one.txt"), "1").unwrap();
    let output = dir.path().join("catalog.json");
    fs::write(&output, "stale contents").unwrap();

    file_catalog::run_hash(&storage, &output, 1, None).unwrap();

    assert_eq!(Catalog::load(&output).unwrap().len(), 1);
}

#[test]
fn test_deleted_after_enumeration_is_skipped() {
    let dir = tempdir().unwrap();
    for i in 0..6 {
        fs::write(dir.path().join(format!("f{i}.txt")), format!("{i}")).unwrap();
    }
    let files = FileEnumerator::new(dir.path()).enumerate().unwrap();
    fs::remove_file(dir.path().join("f3.txt")).unwrap();
    let sink = Arc::new(MemorySink::new());

    let report = HashingPipeline::new(4)
        .with_log_sink(sink.clone())
        .run(files)
        .unwrap();

    assert_eq!(report.total, 6);
    assert_eq!(report.catalog.len(), 5);
    assert_eq!(report.failures.len(), 1);
    assert!(sink.contains(log::Level::Warn, "f3.txt"));
}

#[test]
fn test_repeated_runs_are_set_equal() {
    let dir = tempdir().unwrap();
    for i in 0..25 {
        fs::write(dir.path().join(format!("f{i:02}.bin")), vec![i as u8; 1000 + i]).unwrap();
    }
    let files = FileEnumerator::new(dir.path()).enumerate().unwrap();

    let first = HashingPipeline::new(1).run(files.clone()).unwrap();
    let second = HashingPipeline::new(4).run(files.clone()).unwrap();
    let third = HashingPipeline::new(64).run(files).unwrap();

    assert_eq!(fingerprints(&first.catalog), fingerprints(&second.catalog));
    assert_eq!(fingerprints(&second.catalog), fingerprints(&third.catalog));
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_is_contained() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let storage = dir.path().join("storage");
    fs::create_dir(&storage).unwrap();
    fs::write(storage.join("ok.txt"), "fine").unwrap();
    let locked = storage.join("locked.txt");
    fs::write(&locked, "secret").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Root can read anything; nothing to check then.
    if fs::read(&locked).is_ok() {
        return;
    }

    let output = dir.path().join("catalog.json");
    let report = file_catalog::run_hash(&storage, &output, 2, None).unwrap();

    assert_eq!(report.catalog.len(), 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].path(), locked.as_path());

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();
}
