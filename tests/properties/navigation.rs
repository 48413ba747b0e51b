//! Property tests for directional navigation.

use std::collections::BTreeSet;

use proptest::prelude::*;
use serde_json::Value;

use treenav::domain::services::{
    collapse, flatten_records, is_navigable, move_down, move_up, CollapseOutcome,
};
use treenav::domain::value_objects::is_self_or_descendant;
use treenav::{ChildHint, TreeDataConfig, TreeNode, TreeState};

use crate::strategies::{records, tree_ids};

type Case = (Vec<TreeNode<Value>>, BTreeSet<String>, usize);

/// A flat list, an arbitrary expanded subset and a cursor seed
fn navigation_case() -> impl Strategy<Value = Case> {
    tree_ids().prop_flat_map(|ids| {
        let list = flatten_records(TreeDataConfig::new(records(&ids), "path", "name"), &ChildHint::None);
        let all: Vec<String> = ids.into_iter().collect();
        let count = all.len();
        (
            Just(list),
            proptest::sample::subsequence(all, 0..=count).prop_map(|v| v.into_iter().collect()),
            any::<usize>(),
        )
    })
}

fn state(cursor: &str, expanded: &BTreeSet<String>) -> TreeState {
    TreeState {
        selected: None,
        half_selected: Some(cursor.to_string()),
        expanded: expanded.clone(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: moving down then up from a navigable node returns to it.
    #[test]
    fn property_down_then_up_returns((list, expanded, seed) in navigation_case()) {
        let view_state = TreeState { expanded: expanded.clone(), ..TreeState::default() };
        let navigable: Vec<&TreeNode<Value>> = list
            .iter()
            .filter(|n| !n.is_root() && is_navigable(n, &view_state))
            .collect();
        prop_assume!(!navigable.is_empty());
        let start = &navigable[seed % navigable.len()].id;

        if let Some(next) = move_down(&list, &state(start, &expanded)) {
            let back = move_up(&list, &state(&next.id, &expanded));
            prop_assert_eq!(back.map(|n| n.id.as_str()), Some(start.as_str()));
        }
    }

    /// PROPERTY: collapse only removes the node's own subtree from the
    /// expanded set, and removes all of it.
    #[test]
    fn property_collapse_is_subtree_scoped((list, expanded, seed) in navigation_case()) {
        let target = &list[1 + seed % (list.len() - 1)].id;
        let before = state(target, &expanded);

        if let CollapseOutcome::Collapsed(removed) = collapse(&list, &before) {
            let remaining: BTreeSet<&String> =
                expanded.iter().filter(|id| !removed.contains(id)).collect();
            for id in &removed {
                prop_assert!(is_self_or_descendant(id, target));
            }
            for id in remaining {
                prop_assert!(!is_self_or_descendant(id, target));
            }
        }
    }
}
