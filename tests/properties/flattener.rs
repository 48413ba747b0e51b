//! Property tests for flattening and child resolution.

use std::cmp::Ordering;

use proptest::prelude::*;
use serde_json::Value;

use treenav::domain::services::{find_node, flatten_records, get_children, position_of};
use treenav::domain::value_objects::{compare_ids, ROOT_ID};
use treenav::{ChildHint, TreeDataConfig, TreeNode};

use crate::strategies::{records, tree_ids};

fn flatten(records: Vec<Value>) -> Vec<TreeNode<Value>> {
    flatten_records(TreeDataConfig::new(records, "path", "name"), &ChildHint::None)
}

fn depth_first<'a>(node: &TreeNode<Value>, list: &'a [TreeNode<Value>], out: &mut Vec<&'a str>) {
    for child in get_children(node, list) {
        out.push(&child.id);
        depth_first(child, list, out);
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: output is sorted, has exactly one root first, and every
    /// parent path resolves to a node in the list.
    #[test]
    fn property_flatten_shape(ids in tree_ids()) {
        let list = flatten(records(&ids));

        prop_assert_eq!(list.len(), ids.len() + 1);
        prop_assert_eq!(list[0].id.as_str(), ROOT_ID);
        prop_assert_eq!(list.iter().filter(|n| n.is_root()).count(), 1);
        for pair in list.windows(2) {
            prop_assert_eq!(compare_ids(&pair[0].id, &pair[1].id), Ordering::Less);
        }
        for node in list.iter().skip(1) {
            let parent = if node.path.is_empty() { ROOT_ID } else { node.path.as_str() };
            let index = position_of(parent, &list);
            prop_assert!(index.is_some(), "{} has no parent", node.id);
            prop_assert!(index < position_of(&node.id, &list));
        }
    }

    /// PROPERTY: walking `get_children` from the root reproduces the list.
    #[test]
    fn property_children_walk_matches_list(ids in tree_ids()) {
        let list = flatten(records(&ids));
        let mut walked = Vec::new();
        depth_first(&list[0], &list, &mut walked);

        let expected: Vec<&str> = list.iter().skip(1).map(|n| n.id.as_str()).collect();
        prop_assert_eq!(walked, expected);
    }

    /// PROPERTY: each node's `children` field lists exactly its direct children.
    #[test]
    fn property_children_field_consistent(ids in tree_ids()) {
        let list = flatten(records(&ids));
        for node in &list {
            let direct: Vec<&str> = get_children(node, &list).iter().map(|c| c.id.as_str()).collect();
            let stored: Vec<&str> = node.children.iter().map(String::as_str).collect();
            prop_assert_eq!(direct, stored);
            for child in &node.children {
                prop_assert!(find_node(child, &list).is_some());
            }
        }
    }
}
