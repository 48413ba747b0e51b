//! Tree flattener.
//!
//! Turns domain records into the flat, sorted node list the navigator works
//! on, with the synthetic root at index 0.

use std::collections::HashMap;

use crate::domain::entities::TreeNode;
use crate::domain::ports::{ChildHint, TreeDataConfig, TreeRecord};
use crate::domain::value_objects::{compare_ids, ROOT_ID};

/// Flatten records into a sorted node list with a root prepended.
///
/// Missing path or name fields read as empty strings.
pub fn flatten_records<T: TreeRecord>(
    config: TreeDataConfig<T>,
    hint: &ChildHint<T>,
) -> Vec<TreeNode<T>> {
    let TreeDataConfig { data, path, name } = config;
    let nodes = data
        .into_iter()
        .map(|record| {
            let parent = record.field(&path).unwrap_or_default();
            let label = record.field(&name).unwrap_or_default();
            let has_hint = hint.hint_for(&record);
            TreeNode::new(parent, label, record).with_hint(has_hint)
        })
        .collect();
    with_root(nodes)
}

/// Sort nodes, fill in their `children` and prepend the root.
///
/// Any root already present in `nodes` is replaced.
pub fn with_root<T>(nodes: Vec<TreeNode<T>>) -> Vec<TreeNode<T>> {
    let mut nodes: Vec<TreeNode<T>> = nodes.into_iter().filter(|n| !n.is_root()).collect();
    nodes.sort_by(|a, b| compare_ids(&a.id, &b.id));

    let mut by_parent: HashMap<String, Vec<String>> = HashMap::new();
    for node in &nodes {
        let parent = if node.path.is_empty() {
            ROOT_ID.to_string()
        } else {
            node.path.clone()
        };
        by_parent.entry(parent).or_default().push(node.id.clone());
    }

    for node in &mut nodes {
        node.children = by_parent.remove(&node.id).unwrap_or_default();
    }

    let top_level = by_parent.remove(ROOT_ID).unwrap_or_default();
    let mut list = Vec::with_capacity(nodes.len() + 1);
    list.push(TreeNode::root(top_level));
    list.extend(nodes);
    list
}
