//! Survivor ranking strategies.
//!
//! A [`RankStrategy`] scores a candidate path against the priority reference;
//! higher scores rank first. The default, [`CommonPrefix`], scores by the
//! number of leading bytes the two strings share. It is not aware of path
//! segments: `/data/photos-old` shares more with `/data/photos` than
//! `/data/photo/x` does, even though the latter is closer in the tree.

/// Scores candidates for survivor selection.
pub trait RankStrategy {
    /// Orderable score; larger ranks first.
    type Score: Ord;

    /// Score `candidate` against `reference`.
    fn rank(&self, reference: &str, candidate: &str) -> Self::Score;
}

/// Ranks by [`common_prefix_length`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CommonPrefix;

impl RankStrategy for CommonPrefix {
    type Score = usize;

    fn rank(&self, reference: &str, candidate: &str) -> usize {
        common_prefix_length(reference, candidate)
    }
}

/// Count of leading bytes at which `a` and `b` are identical.
///
/// Stops at the first mismatch or at the end of the shorter string.
///
/// ```
/// use deduplicate::duplicates::common_prefix_length;
///
/// assert_eq!(common_prefix_length("/keep/me", "/keep/you"), 6);
/// assert_eq!(common_prefix_length("", "/anything"), 0);
/// ```
#[must_use]
pub fn common_prefix_length(a: &str, b: &str) -> usize {
    a.bytes().zip(b.bytes()).take_while(|(x, y)| x == y).count()
}
