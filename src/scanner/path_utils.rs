//! Lexical path cleaning.
//!
//! Ranking compares paths as strings, so the priority reference and every
//! walked path must be spelled the same way. A root given as `photos/.` or a
//! priority given as `./keep` would otherwise share only a short prefix with
//! the files they name.
//!
//! Cleaning is purely lexical and never touches the filesystem:
//!
//! - `.` components are dropped
//! - `..` folds against the previous normal component
//! - `..` directly below the root is dropped (`/..` is `/`)
//! - repeated and trailing separators disappear
//! - an empty result becomes `.`
//!
//! # Example
//!
//! ```
//! use deduplicate::scanner::path_utils::clean_path;
//! use std::path::{Path, PathBuf};
//!
//! assert_eq!(clean_path(Path::new("/data/./old/../keep/")), PathBuf::from("/data/keep"));
//! assert_eq!(clean_path(Path::new("./keep/f")), PathBuf::from("keep/f"));
//! ```

use std::path::{Component, Path, PathBuf};

/// Clean `path` lexically.
#[must_use]
pub fn clean_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                // Nothing above the root
                Some(Component::RootDir) => {}
                _ => parts.push(component),
            },
            _ => parts.push(component),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}
