//! Child resolver.
//!
//! Children are found by matching each node's `path` against the parent's
//! id. Splicing replaces a parent's children and restores the list order.

use crate::domain::entities::TreeNode;
use crate::domain::value_objects::compare_ids;
use crate::error::{TreeError, TreeResult};

/// Direct children of `node`, in list order
pub fn get_children<'a, T>(node: &TreeNode<T>, list: &'a [TreeNode<T>]) -> Vec<&'a TreeNode<T>> {
    list.iter().filter(|n| n.is_child_of(node)).collect()
}

/// Index of the node with `id`
pub fn position_of<T>(id: &str, list: &[TreeNode<T>]) -> Option<usize> {
    list.iter().position(|n| n.id == id)
}

pub fn find_node<'a, T>(id: &str, list: &'a [TreeNode<T>]) -> Option<&'a TreeNode<T>> {
    list.iter().find(|n| n.id == id)
}

/// Replace the children of `parent_id` with `children`.
///
/// Existing direct children are removed, the new ones inserted after the
/// parent, the parent's `children` ids rewritten, and the whole list
/// re-sorted. Fails if the parent is not in the list.
pub fn splice_children<T>(
    parent_id: &str,
    children: Vec<TreeNode<T>>,
    list: &mut Vec<TreeNode<T>>,
) -> TreeResult<()> {
    if position_of(parent_id, list).is_none() {
        return Err(TreeError::ParentNotFound {
            id: parent_id.to_string(),
        });
    }

    list.retain(|n| !n.is_child_of_id(parent_id));
    // Removing children never shifts the parent itself.
    let parent_index = position_of(parent_id, list).ok_or_else(|| TreeError::ParentNotFound {
        id: parent_id.to_string(),
    })?;

    list[parent_index].children = children.iter().map(|c| c.id.clone()).collect();
    let tail = list.split_off(parent_index + 1);
    list.extend(children);
    list.extend(tail);
    list.sort_by(|a, b| compare_ids(&a.id, &b.id));
    Ok(())
}
