use std::fs;

use tempfile::TempDir;

use dirscope_scan::{Descend, Scanner};

#[test]
fn test_flat_listing_has_no_grandchildren() {
    let temp = TempDir::new().unwrap();
    let nested = temp.path().join("outer/inner");
    fs::create_dir_all(&nested).unwrap();
    fs::write(nested.join("deep.txt"), "deep").unwrap();
    fs::write(temp.path().join("shallow.txt"), "shallow").unwrap();

    let mut scanner = Scanner::new();
    let entries = scanner.list_directory(temp.path(), Descend::Flat).unwrap();

    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| e.path.parent() == Some(temp.path())));
}

#[test]
fn test_aggregate_mixed_children() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("top.txt"), vec![0u8; 100]).unwrap();
    let docs = temp.path().join("docs");
    fs::create_dir(&docs).unwrap();
    fs::write(docs.join("a.txt"), vec![0u8; 10]).unwrap();
    fs::write(docs.join("b.txt"), vec![0u8; 20]).unwrap();
    let empty = temp.path().join("empty");
    fs::create_dir(&empty).unwrap();

    let mut scanner = Scanner::new();
    let index = scanner.aggregate_sizes(temp.path()).unwrap();

    assert_eq!(index.len(), 3);
    assert_eq!(index.get(&temp.path().join("top.txt")).unwrap().size, 100);

    let docs_row = index.get(&docs).unwrap();
    assert!(docs_row.is_directory);
    assert_eq!(docs_row.size, 30);
    assert_eq!(docs_row.count, 2);

    let empty_row = index.get(&empty).unwrap();
    assert!(empty_row.is_directory);
    assert_eq!(empty_row.size, 0);
    assert_eq!(empty_row.count, 0);

    assert_eq!(index.total_size(), 130);
}

#[test]
fn test_sorted_view_is_largest_first() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("small.txt"), vec![0u8; 5]).unwrap();
    fs::write(temp.path().join("large.txt"), vec![0u8; 500]).unwrap();
    fs::write(temp.path().join("medium.txt"), vec![0u8; 50]).unwrap();

    let mut scanner = Scanner::new();
    let index = scanner.aggregate_sizes(temp.path()).unwrap();

    let sizes: Vec<u64> = index.sorted_by_size().iter().map(|(_, s)| s.size).collect();
    assert_eq!(sizes, vec![500, 50, 5]);
}

#[cfg(unix)]
#[test]
fn test_unreadable_subdirectory_is_tolerated() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("visible.txt"), vec![0u8; 7]).unwrap();
    let locked = temp.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::write(locked.join("hidden.txt"), vec![0u8; 1000]).unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // A privileged process can read the directory anyway; nothing to test.
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let mut scanner = Scanner::new();

    // Mid-recursion the unreadable directory is excluded, not an error.
    let entries = scanner
        .list_directory(temp.path(), Descend::Recursive)
        .unwrap();
    assert!(entries.iter().any(|e| e.name() == "locked"));
    assert!(!entries.iter().any(|e| e.name() == "hidden.txt"));

    // Aggregation gives the unreadable child a zero row.
    let index = scanner.aggregate_sizes(temp.path()).unwrap();
    let row = index.get(&locked).unwrap();
    assert!(row.is_directory);
    assert_eq!(row.size, 0);
    assert_eq!(row.count, 0);
    assert_eq!(index.total_size(), 7);

    // As the top-level target, the denial is surfaced.
    let err = scanner.list_directory(&locked, Descend::Flat).unwrap_err();
    assert_eq!(err.class(), dirscope_scan::ErrorClass::PermissionDenied);
    assert!(scanner.last_error().is_error());

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
}

#[test]
fn test_space_info_for_temp_volume() {
    let temp = TempDir::new().unwrap();
    let mut scanner = Scanner::new();

    let info = scanner.space_info(temp.path()).unwrap();
    assert!(info.capacity > 0);
    assert!(info.available <= info.capacity);
    assert!((0.0..=1.0).contains(&info.used_ratio()));
}

#[test]
fn test_space_info_missing_path_fails() {
    let temp = TempDir::new().unwrap();
    let mut scanner = Scanner::new();

    let gone = temp.path().join("no-such-dir");
    assert!(scanner.space_info(&gone).is_err());
    assert!(scanner.last_error().is_error());
}
