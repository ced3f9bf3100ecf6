//! Digest grouping and survivor selection.
//!
//! # Overview
//!
//! [`DuplicateResolver`] accumulates `(path, digest)` pairs during a run and,
//! once recording is finished, turns every digest seen more than once into a
//! [`ResolvedGroup`] whose members are ranked against a priority reference.
//!
//! Groups live in an arena indexed by digest. Output follows the order in
//! which each digest was first seen, and members tied on score keep their
//! discovery order, so the same inputs always resolve the same way.
//!
//! # Example
//!
//! ```
//! use deduplicate::duplicates::DuplicateResolver;
//!
//! let mut resolver = DuplicateResolver::new();
//! resolver.record("/other/x.txt", [1u8; 32]);
//! resolver.record("/keep/me/here/copy.txt", [1u8; 32]);
//! resolver.record("/unique.txt", [2u8; 32]);
//!
//! let groups = resolver.resolve("/keep/me/here");
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].keep(), "/keep/me/here/copy.txt");
//! ```

use std::collections::HashMap;

use super::groups::{DigestGroup, FileEntry, ResolvedGroup};
use super::ranking::{CommonPrefix, RankStrategy};
use crate::scanner::Digest;

/// Accumulates digests for one run and ranks duplicate groups.
///
/// `record` and `resolve` must not interleave across threads; callers that
/// hash in parallel record results from a single thread once hashing joins.
#[derive(Debug, Clone)]
pub struct DuplicateResolver<R: RankStrategy = CommonPrefix> {
    /// Groups in order of first discovery
    groups: Vec<DigestGroup>,
    /// Digest to position in `groups`
    index: HashMap<Digest, usize>,
    /// Survivor ranking
    strategy: R,
}

impl DuplicateResolver {
    /// Create an empty resolver using common-prefix ranking.
    #[must_use]
    pub fn new() -> Self {
        Self::with_strategy(CommonPrefix)
    }
}

impl Default for DuplicateResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RankStrategy> DuplicateResolver<R> {
    /// Create an empty resolver with a custom ranking strategy.
    #[must_use]
    pub fn with_strategy(strategy: R) -> Self {
        Self {
            groups: Vec::new(),
            index: HashMap::new(),
            strategy,
        }
    }

    /// Append `path` to the group for `digest`, creating the group if absent.
    ///
    /// Paths are not deduplicated: recording the same path twice adds it twice.
    pub fn record(&mut self, path: impl Into<String>, digest: Digest) {
        let path = path.into();
        match self.index.get(&digest) {
            Some(&slot) => self.groups[slot].push(path),
            None => {
                self.index.insert(digest, self.groups.len());
                self.groups.push(DigestGroup::new(digest, path));
            }
        }
    }

    /// Record a [`FileEntry`].
    pub fn record_entry(&mut self, entry: FileEntry) {
        self.record(entry.path, entry.digest);
    }

    /// Rank every group with more than one member.
    ///
    /// Members are stably sorted by descending score against `reference`;
    /// with an empty reference every score ties and discovery order wins.
    /// Never fails, and does not modify recorded state, so repeated calls
    /// return identical results.
    #[must_use]
    pub fn resolve(&self, reference: &str) -> Vec<ResolvedGroup> {
        let resolved: Vec<ResolvedGroup> = self
            .groups
            .iter()
            .filter(|group| group.is_actionable())
            .map(|group| ResolvedGroup::new(group.digest, self.rank(reference, &group.members)))
            .collect();

        log::debug!(
            "Resolved {} duplicate groups from {} digests",
            resolved.len(),
            self.groups.len()
        );
        resolved
    }

    fn rank(&self, reference: &str, members: &[String]) -> Vec<String> {
        let mut scored: Vec<(R::Score, &String)> = members
            .iter()
            .map(|path| (self.strategy.rank(reference, path), path))
            .collect();

        // `sort_by` is stable: equal scores keep discovery order.
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        scored.into_iter().map(|(_, path)| path.clone()).collect()
    }

    /// Number of distinct digests recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of recorded paths.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.groups.iter().map(DigestGroup::len).sum()
    }
}
