//! Property tests for node id arithmetic.

use proptest::prelude::*;

use treenav::domain::value_objects::{
    ancestor_ids, compare_ids, id_level, is_self_or_descendant, valid_path, ROOT_ID,
};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: `valid_path` is idempotent on arbitrary input.
    #[test]
    fn property_valid_path_idempotent(s in "(?s).{0,64}") {
        let once = valid_path(&s);
        prop_assert_eq!(valid_path(&once), once);
    }

    /// PROPERTY: normalized ids have no doubled or trailing separators.
    #[test]
    fn property_valid_path_shape(s in "[ab/]{0,24}") {
        let id = valid_path(&s);
        prop_assert!(!id.contains("//"));
        prop_assert!(id == ROOT_ID || !id.ends_with('/'));
        prop_assert!(!id.is_empty());
    }

    /// PROPERTY: ancestor chains are cumulative prefixes ending at the id.
    #[test]
    fn property_ancestor_chain(segments in proptest::collection::vec("[a-z]{1,3}", 1..6)) {
        let id = format!("/{}", segments.join("/"));
        let chain = ancestor_ids(&id);

        prop_assert_eq!(chain.len(), id_level(&id));
        prop_assert_eq!(chain.last(), Some(&id));
        for (i, ancestor) in chain.iter().enumerate() {
            prop_assert_eq!(id_level(ancestor), i + 1);
            prop_assert!(is_self_or_descendant(&id, ancestor));
        }
    }

    /// PROPERTY: sorting keeps each subtree contiguous behind its root.
    #[test]
    fn property_sort_keeps_subtrees_contiguous(ids in crate::strategies::tree_ids()) {
        let mut sorted: Vec<String> = ids.into_iter().collect();
        sorted.sort_by(|a, b| compare_ids(a, b));

        for (i, parent) in sorted.iter().enumerate() {
            let subtree = sorted[i + 1..]
                .iter()
                .take_while(|id| is_self_or_descendant(id, parent))
                .count();
            let total = sorted
                .iter()
                .filter(|id| *id != parent && is_self_or_descendant(id, parent))
                .count();
            prop_assert_eq!(subtree, total, "subtree of {} is split", parent);
        }
    }
}
