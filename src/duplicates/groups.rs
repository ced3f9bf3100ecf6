//! Duplicate group and decision types.
//!
//! # Overview
//!
//! A [`DigestGroup`] collects every path recorded under one digest, in the
//! order the paths were discovered. Once a run's traversal is complete, the
//! resolver orders each multi-member group into a [`ResolvedGroup`], whose
//! first member is kept and whose remaining members are marked for removal.
//!
//! # Example
//!
//! ```
//! use deduplicate::duplicates::{Action, ResolvedGroup};
//!
//! let group = ResolvedGroup::new(
//!     [0u8; 32],
//!     vec!["/keep/a.txt".to_string(), "/other/a.txt".to_string()],
//! );
//!
//! assert_eq!(group.keep(), "/keep/a.txt");
//! assert_eq!(group.removals(), ["/other/a.txt".to_string()]);
//! assert_eq!(group.decisions()[0].action, Action::Keep);
//! ```

use serde::Serialize;

use crate::scanner::{hash_to_hex, Digest};

/// A path paired with its content digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path of the fingerprinted file
    pub path: String,
    /// Digest of the file's full content
    pub digest: Digest,
}

impl FileEntry {
    /// Create a new file entry.
    #[must_use]
    pub fn new(path: impl Into<String>, digest: Digest) -> Self {
        Self {
            path: path.into(),
            digest,
        }
    }
}

/// All paths recorded under one digest, in discovery order.
///
/// Never empty once created; only grows while the run is recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestGroup {
    /// Shared content digest
    pub digest: Digest,
    /// Paths in discovery order
    pub members: Vec<String>,
}

impl DigestGroup {
    /// Create a group seeded with its first member.
    #[must_use]
    pub fn new(digest: Digest, first: String) -> Self {
        Self {
            digest,
            members: vec![first],
        }
    }

    /// Append a newly discovered member.
    pub fn push(&mut self, path: String) {
        self.members.push(path);
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false for a group built through [`DigestGroup::new`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether this group holds duplicates (2+ members).
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        self.members.len() > 1
    }
}

/// What to do with one member of a duplicate group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// The surviving copy
    Keep,
    /// A redundant copy
    Remove,
}

/// A path and the action decided for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    /// Path of the file
    pub path: String,
    /// Keep or remove
    pub action: Action,
}

/// A duplicate group with its members ranked.
///
/// `members[0]` is the survivor; every other member is a removal, in rank order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedGroup {
    /// Shared content digest
    pub digest: Digest,
    /// Members in rank order
    pub members: Vec<String>,
}

impl ResolvedGroup {
    /// Create a resolved group from already-ranked members.
    ///
    /// # Panics
    ///
    /// Debug assertion fails if fewer than two members are given.
    #[must_use]
    pub fn new(digest: Digest, members: Vec<String>) -> Self {
        debug_assert!(
            members.len() > 1,
            "a resolved group needs at least two members, got {}",
            members.len()
        );
        Self { digest, members }
    }

    /// The path designated to remain.
    #[must_use]
    pub fn keep(&self) -> &str {
        &self.members[0]
    }

    /// The paths designated for removal, in rank order.
    #[must_use]
    pub fn removals(&self) -> &[String] {
        &self.members[1..]
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false for a group built through [`ResolvedGroup::new`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// One decision per member: the first is `Keep`, the rest `Remove`.
    #[must_use]
    pub fn decisions(&self) -> Vec<Decision> {
        self.members
            .iter()
            .enumerate()
            .map(|(i, path)| Decision {
                path: path.clone(),
                action: if i == 0 { Action::Keep } else { Action::Remove },
            })
            .collect()
    }

    /// Digest as hexadecimal string.
    #[must_use]
    pub fn digest_hex(&self) -> String {
        hash_to_hex(&self.digest)
    }
}
