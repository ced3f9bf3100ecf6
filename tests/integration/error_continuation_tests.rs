use deduplicate::duplicates::{DuplicateFinder, FinderConfig, FinderError};
use deduplicate::scanner::{HashError, ScanError};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_find_duplicates_in_paths_continues_on_error() {
    let finder = DuplicateFinder::with_defaults();
    let paths = vec![
        PathBuf::from("nonexistent_1.txt"),
        PathBuf::from("nonexistent_2.txt"),
    ];

    let (groups, summary) = finder.find_duplicates_in_paths(paths, "").unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.scan_errors.len(), 2);
    assert_eq!(summary.failed_files, 2);

    for err in &summary.scan_errors {
        match err {
            ScanError::HashError(HashError::NotFound(_)) => {}
            _ => panic!("Expected NotFound HashError, got: {:?}", err),
        }
    }
}

#[test]
fn test_find_duplicates_in_paths_strict_fails() {
    let finder = DuplicateFinder::new(FinderConfig::default().with_strict(true));
    let paths = vec![
        PathBuf::from("nonexistent_1.txt"),
        PathBuf::from("nonexistent_2.txt"),
    ];

    match finder.find_duplicates_in_paths(paths, "").unwrap_err() {
        FinderError::ScanError(ScanError::HashError(HashError::NotFound(path))) => {
            assert_eq!(path, PathBuf::from("nonexistent_1.txt"));
        }
        other => panic!("Expected NotFound ScanError, got: {:?}", other),
    }
}

#[test]
fn test_skip_policy_still_groups_readable_files() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a");
    let b = dir.path().join("b");
    fs::write(&a, "dup").unwrap();
    fs::write(&b, "dup").unwrap();

    let paths = vec![a, dir.path().join("gone"), b];
    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates_in_paths(paths, "")
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 2);
    assert_eq!(summary.scan_errors.len(), 1);
    assert_eq!(summary.scan_errors[0].path(), dir.path().join("gone"));
}

#[test]
fn test_missing_root_is_rejected() {
    let dir = tempdir().unwrap();
    let err = DuplicateFinder::with_defaults()
        .find_duplicates(&dir.path().join("missing"), "")
        .unwrap_err();

    assert!(matches!(err, FinderError::PathNotFound(_)));
}

/// Make a directory unreadable; returns false when permissions are not
/// enforced (e.g. running as root).
#[cfg(unix)]
fn lock_dir(path: &std::path::Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o000)).unwrap();
    fs::read_dir(path).is_err()
}

#[cfg(unix)]
fn unlock_dir(path: &std::path::Path) {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_skip_and_strict() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), "dup").unwrap();
    fs::write(dir.path().join("b"), "dup").unwrap();
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::write(locked.join("hidden"), "dup").unwrap();

    if !lock_dir(&locked) {
        unlock_dir(&locked);
        return;
    }

    let lenient = DuplicateFinder::with_defaults().find_duplicates(dir.path(), "");
    let strict = DuplicateFinder::new(FinderConfig::default().with_strict(true))
        .find_duplicates(dir.path(), "");
    unlock_dir(&locked);

    let (groups, summary) = lenient.unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 2);
    assert_eq!(summary.scan_errors.len(), 1);
    assert_eq!(summary.scan_errors[0].path(), locked.as_path());
    assert!(matches!(
        summary.scan_errors[0],
        ScanError::PermissionDenied(_)
    ));

    match strict.unwrap_err() {
        FinderError::ScanError(e) => assert_eq!(e.path(), locked.as_path()),
        other => panic!("Expected ScanError, got: {:?}", other),
    }
}
