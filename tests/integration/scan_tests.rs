use deduplicate::duplicates::{Action, DuplicateFinder, FinderConfig};
use deduplicate::scanner::HashAlgorithm;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write(root: &Path, relative: &str, content: &[u8]) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn path_str(root: &Path, relative: &str) -> String {
    root.join(relative).to_string_lossy().into_owned()
}

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();
    let finder = DuplicateFinder::with_defaults();

    let (groups, summary) = finder.find_duplicates(dir.path(), "").unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.total_files, 0);
    assert_eq!(summary.duplicate_groups, 0);
}

#[test]
fn test_scan_unique_files() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.txt", b"content a");
    write(dir.path(), "b.txt", b"content b");
    write(dir.path(), "c.txt", b"content c");

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path(), "")
        .unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.total_files, 3);
    assert_eq!(summary.hashed_files, 3);
}

#[test]
fn test_hello_world_scenario() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.txt", b"hello");
    write(dir.path(), "b/a.txt", b"hello");
    write(dir.path(), "c.txt", b"world");

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path(), "")
        .unwrap();

    assert_eq!(groups.len(), 1);
    let group = &groups[0];
    assert_eq!(
        group.digest_hex(),
        "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
    );
    assert_eq!(group.keep(), path_str(dir.path(), "a.txt"));
    assert_eq!(group.removals(), [path_str(dir.path(), "b/a.txt")]);
    assert_eq!(summary.duplicate_files, 1);
}

#[test]
fn test_multiple_groups_in_discovery_order() {
    let dir = tempdir().unwrap();
    write(dir.path(), "1_second_digest", b"beta");
    write(dir.path(), "2_first_digest", b"alpha");
    write(dir.path(), "3_second_digest", b"beta");
    write(dir.path(), "4_first_digest", b"alpha");

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path(), "")
        .unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].keep(), path_str(dir.path(), "1_second_digest"));
    assert_eq!(groups[1].keep(), path_str(dir.path(), "2_first_digest"));
    assert_eq!(summary.duplicate_groups, 2);
    assert_eq!(summary.duplicate_files, 2);
}

#[test]
fn test_three_way_duplicate() {
    let dir = tempdir().unwrap();
    write(dir.path(), "x/1", b"same");
    write(dir.path(), "y/2", b"same");
    write(dir.path(), "z/3", b"same");

    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path(), "")
        .unwrap();

    let decisions = groups[0].decisions();
    assert_eq!(decisions.len(), 3);
    assert_eq!(decisions[0].action, Action::Keep);
    assert!(decisions[1..].iter().all(|d| d.action == Action::Remove));
}

#[test]
fn test_empty_files_form_a_group() {
    let dir = tempdir().unwrap();
    write(dir.path(), "empty_a", b"");
    write(dir.path(), "sub/empty_b", b"");
    write(dir.path(), "full", b"x");

    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path(), "")
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(
        groups[0].digest_hex(),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn test_blake3_finds_same_groups() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a", b"one");
    write(dir.path(), "b", b"one");
    write(dir.path(), "c", b"two");

    let sha = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path(), "")
        .unwrap()
        .0;
    let blake = DuplicateFinder::new(FinderConfig::default().with_algorithm(HashAlgorithm::Blake3))
        .find_duplicates(dir.path(), "")
        .unwrap()
        .0;

    assert_eq!(sha.len(), 1);
    assert_eq!(blake.len(), 1);
    assert_eq!(sha[0].members, blake[0].members);
    assert_ne!(sha[0].digest, blake[0].digest);
}

#[test]
fn test_parallel_hashing_matches_sequential() {
    let dir = tempdir().unwrap();
    for i in 0..20 {
        write(dir.path(), &format!("d{}/f{:02}", i % 4, i), format!("{}", i % 5).as_bytes());
    }

    let sequential = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path(), "")
        .unwrap()
        .0;
    let parallel = DuplicateFinder::new(FinderConfig::default().with_io_threads(4))
        .find_duplicates(dir.path(), "")
        .unwrap()
        .0;

    assert_eq!(sequential, parallel);
}

#[cfg(unix)]
#[test]
fn test_symlinks_are_not_followed() {
    let dir = tempdir().unwrap();
    write(dir.path(), "real.txt", b"data");
    std::os::unix::fs::symlink(dir.path().join("real.txt"), dir.path().join("link.txt")).unwrap();

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path(), "")
        .unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.total_files, 1);
}
