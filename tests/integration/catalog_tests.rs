use file_catalog::catalog::{Catalog, CatalogError, UNKNOWN_OWNER};
use std::fs;
use tempfile::tempdir;

const LEGACY_FORMAT: &str = r#"[
  {
    "file_name": "/storage/a.txt",
    "hash": "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824",
    "file_size": 5,
    "created_at": "2023-04-05T06:07:08-07:00",
    "created_by": "unknown",
    "last_modified": "2023-04-05T06:07:08-07:00",
    "modified_by": "unknown",
    "last_accessed": "2023-04-05T06:07:08-07:00",
    "accessed_by": "unknown"
  },
  {
    "file_name": "/storage/b.txt",
    "hash": "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824",
    "file_size": 5,
    "created_at": "2023-04-05T13:07:08Z",
    "created_by": "unknown",
    "last_modified": "2023-04-05T13:07:08Z",
    "modified_by": "bob",
    "last_accessed": "2023-04-05T13:07:08Z",
    "accessed_by": "unknown"
  }
]"#;

#[test]
fn test_reads_existing_catalog_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("file_metadata.json");
    fs::write(&path, LEGACY_FORMAT).unwrap();

    let catalog = Catalog::load(&path).unwrap();

    assert_eq!(catalog.len(), 2);
    let entries = catalog.entries();
    assert!(entries[0].path.ends_with("a.txt"));
    assert_eq!(entries[0].created_at, entries[1].created_at);
    assert_eq!(entries[1].modified_by.as_deref(), Some("bob"));
}

#[test]
fn test_rewrite_is_byte_identical() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("file_metadata.json");
    fs::write(&path, LEGACY_FORMAT).unwrap();

    let catalog = Catalog::load(&path).unwrap();
    catalog.save(&path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), LEGACY_FORMAT);
}

#[test]
fn test_saved_entries_have_nine_keys() {
    let dir = tempdir().unwrap();
    let storage = dir.path().join("storage");
    fs::create_dir(&storage).unwrap();
    fs::write(storage.join("x.txt"), "x").unwrap();
    let output = dir.path().join("catalog.json");

    file_catalog::run_hash(&storage, &output, 1, None).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let object = value[0].as_object().unwrap();
    let keys: Vec<&str> = object.keys().map(String::as_str).collect();
    let mut expected = vec![
        "file_name",
        "hash",
        "file_size",
        "created_at",
        "created_by",
        "last_modified",
        "modified_by",
        "last_accessed",
        "accessed_by",
    ];
    let mut sorted = keys.clone();
    sorted.sort_unstable();
    expected.sort_unstable();
    assert_eq!(sorted, expected);
    assert_eq!(object["created_by"], UNKNOWN_OWNER);
    assert_eq!(object["file_size"], 1);
    assert_eq!(object["last_accessed"], object["last_modified"]);
}

#[test]
fn test_round_trip_after_hash() {
    let dir = tempdir().unwrap();
    let storage = dir.path().join("storage");
    fs::create_dir(&storage).unwrap();
    for name in ["a", "b", "c", "d"] {
        fs::write(storage.join(name), name.repeat(100)).unwrap();
    }
    let output = dir.path().join("catalog.json");

    let report = file_catalog::run_hash(&storage, &output, 3, None).unwrap();
    let loaded = Catalog::load(&output).unwrap();

    assert_eq!(loaded.entries(), report.catalog.entries());
}

#[test]
fn test_null_catalog_reads_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("file_metadata.json");
    fs::write(&path, "null").unwrap();

    assert!(Catalog::load(&path).unwrap().is_empty());
}

#[test]
fn test_truncated_catalog_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("file_metadata.json");
    fs::write(&path, &LEGACY_FORMAT[..LEGACY_FORMAT.len() / 2]).unwrap();

    let err = Catalog::load(&path).unwrap_err();

    assert!(matches!(err, CatalogError::Parse { .. }));
}
