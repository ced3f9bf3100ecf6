use proptest::prelude::*;
use deduplicate::duplicates::{common_prefix_length, Action, DuplicateResolver};
use deduplicate::scanner::{HashAlgorithm, Hasher};
use std::collections::HashMap;

/// A small path alphabet so generated paths share prefixes often.
fn path_strategy() -> impl Strategy<Value = String> {
    "/[ab]{0,3}(/[ab]{1,3}){0,3}"
}

fn records_strategy() -> impl Strategy<Value = Vec<(String, u8)>> {
    prop::collection::vec((path_strategy(), 0u8..4), 0..40)
}

proptest! {
    #[test]
    fn test_fingerprint_determinism(content in prop::collection::vec(any::<u8>(), 0..4096)) {
        for algorithm in [HashAlgorithm::Sha256, HashAlgorithm::Blake3] {
            let hasher = Hasher::new(algorithm);
            let first = hasher.fingerprint(content.as_slice()).unwrap();
            let second = hasher.fingerprint(content.as_slice()).unwrap();
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn test_common_prefix_bounds(a in "\\PC{0,20}", b in "\\PC{0,20}") {
        let n = common_prefix_length(&a, &b);

        prop_assert!(n <= a.len().min(b.len()));
        prop_assert_eq!(n, common_prefix_length(&b, &a));
        prop_assert_eq!(&a.as_bytes()[..n], &b.as_bytes()[..n]);
        if n < a.len() && n < b.len() {
            prop_assert_ne!(a.as_bytes()[n], b.as_bytes()[n]);
        }
    }

    #[test]
    fn test_resolver_invariants(records in records_strategy(), reference in path_strategy()) {
        let mut resolver = DuplicateResolver::new();
        let mut expected: HashMap<[u8; 32], Vec<String>> = HashMap::new();
        for (path, tag) in &records {
            let digest = [*tag; 32];
            resolver.record(path.clone(), digest);
            expected.entry(digest).or_default().push(path.clone());
        }

        let groups = resolver.resolve(&reference);

        // Exactly the digests seen more than once, each exactly once.
        let actionable = expected.values().filter(|paths| paths.len() > 1).count();
        prop_assert_eq!(groups.len(), actionable);

        for group in &groups {
            let discovered = &expected[&group.digest];

            // Members are a permutation of the discovered paths.
            let mut sorted_members = group.members.clone();
            let mut sorted_discovered = discovered.clone();
            sorted_members.sort();
            sorted_discovered.sort();
            prop_assert_eq!(sorted_members, sorted_discovered);

            // One keep, the rest removals.
            let decisions = group.decisions();
            prop_assert_eq!(decisions.iter().filter(|d| d.action == Action::Keep).count(), 1);
            prop_assert_eq!(decisions[0].path.as_str(), group.keep());

            // Scores never increase along the ranked order.
            let scores: Vec<usize> = group
                .members
                .iter()
                .map(|p| common_prefix_length(&reference, p))
                .collect();
            prop_assert!(scores.windows(2).all(|w| w[0] >= w[1]));

            // The survivor has the maximum score, first discovered among ties.
            let best = scores[0];
            let first_best = discovered
                .iter()
                .find(|p| common_prefix_length(&reference, p) == best)
                .unwrap();
            prop_assert_eq!(group.keep(), first_best.as_str());
        }
    }

    #[test]
    fn test_empty_reference_preserves_discovery_order(records in records_strategy()) {
        let mut resolver = DuplicateResolver::new();
        let mut expected: HashMap<[u8; 32], Vec<String>> = HashMap::new();
        for (path, tag) in &records {
            resolver.record(path.clone(), [*tag; 32]);
            expected.entry([*tag; 32]).or_default().push(path.clone());
        }

        for group in resolver.resolve("") {
            prop_assert_eq!(&group.members, &expected[&group.digest]);
        }
    }

    #[test]
    fn test_resolve_is_idempotent(records in records_strategy(), reference in path_strategy()) {
        let mut resolver = DuplicateResolver::new();
        for (path, tag) in &records {
            resolver.record(path.clone(), [*tag; 32]);
        }

        prop_assert_eq!(resolver.resolve(&reference), resolver.resolve(&reference));
    }
}
