use deduplicate::duplicates::DuplicateFinder;
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

fn reference(root: &Path, relative: &str) -> String {
    root.join(relative).to_string_lossy().into_owned()
}

#[test]
fn test_priority_directory_wins() {
    let dir = tempdir().unwrap();
    write(dir.path(), "archive/photo.jpg", b"pixels");
    write(dir.path(), "keep/photo.jpg", b"pixels");

    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path(), &reference(dir.path(), "keep"))
        .unwrap();

    assert_eq!(groups[0].keep(), path_str(dir.path(), "keep/photo.jpg"));
    assert_eq!(
        groups[0].removals(),
        [path_str(dir.path(), "archive/photo.jpg")]
    );
}

#[test]
fn test_deeper_match_ranks_higher() {
    let dir = tempdir().unwrap();
    write(dir.path(), "keep/a/x", b"same");
    write(dir.path(), "keep/me/here/x", b"same");
    write(dir.path(), "other/x", b"same");

    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path(), &reference(dir.path(), "keep/me/here"))
        .unwrap();

    assert_eq!(
        groups[0].members,
        vec![
            path_str(dir.path(), "keep/me/here/x"),
            path_str(dir.path(), "keep/a/x"),
            path_str(dir.path(), "other/x"),
        ]
    );
}

#[test]
fn test_ties_keep_discovery_order() {
    let dir = tempdir().unwrap();
    write(dir.path(), "zzz/b", b"same");
    write(dir.path(), "zzz/a", b"same");
    write(dir.path(), "aaa/c", b"same");

    // Every path shares only the root with this reference.
    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path(), &reference(dir.path(), "mmm"))
        .unwrap();

    assert_eq!(
        groups[0].members,
        vec![
            path_str(dir.path(), "aaa/c"),
            path_str(dir.path(), "zzz/a"),
            path_str(dir.path(), "zzz/b"),
        ]
    );
}

#[test]
fn test_prefix_is_character_based() {
    let dir = tempdir().unwrap();
    write(dir.path(), "photo/x", b"same");
    write(dir.path(), "photos-old/x", b"same");

    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path(), &reference(dir.path(), "photos"))
        .unwrap();

    assert_eq!(groups[0].keep(), path_str(dir.path(), "photos-old/x"));
}

#[test]
fn test_reference_is_reusable_across_runs() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a/f", b"same");
    write(dir.path(), "b/f", b"same");
    let finder = DuplicateFinder::with_defaults();

    let first = finder
        .find_duplicates(dir.path(), &reference(dir.path(), "b"))
        .unwrap()
        .0;
    let second = finder
        .find_duplicates(dir.path(), &reference(dir.path(), "b"))
        .unwrap()
        .0;

    assert_eq!(first, second);
    assert_eq!(first[0].keep(), path_str(dir.path(), "b/f"));
}
