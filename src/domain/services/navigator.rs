//! Directional navigation over the flat node list.
//!
//! Visibility is recomputed on every call from `TreeState::expanded`: a node
//! is navigable when it is top-level or its parent id is expanded. Every
//! function here only decides; the store applies the result.

use crate::domain::entities::{TreeNode, TreeState};
use crate::domain::services::child_resolver::{find_node, position_of};
use crate::domain::value_objects::is_self_or_descendant;

/// Result of a collapse request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollapseOutcome {
    /// Nothing to do
    Unchanged,
    /// These ids (the node and its expanded descendants) are no longer expanded
    Collapsed(Vec<String>),
    /// Cursor moves to this parent id
    MovedToParent(String),
}

/// What an expand does once children are known
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpandDecision {
    /// Add the node to the expanded set
    Expand,
    /// Move the cursor to this child id
    MoveCursor(String),
    /// Node stays as is
    Stay,
    /// Node is no longer in the list
    Vanished,
}

pub fn is_navigable<T>(node: &TreeNode<T>, state: &TreeState) -> bool {
    node.is_top_level() || state.is_expanded(&node.path)
}

/// Next navigable node after the cursor
pub fn move_down<'a, T>(list: &'a [TreeNode<T>], state: &TreeState) -> Option<&'a TreeNode<T>> {
    let cursor = state.half_selected.as_deref()?;
    let index = position_of(cursor, list)?;
    list.get(index + 1..)?
        .iter()
        .find(|n| is_navigable(n, state))
}

/// Nearest navigable node before the cursor
pub fn move_up<'a, T>(list: &'a [TreeNode<T>], state: &TreeState) -> Option<&'a TreeNode<T>> {
    let cursor = state.half_selected.as_deref()?;
    let index = position_of(cursor, list)?;
    if index < 1 {
        return None;
    }
    list[..index].iter().rev().find(|n| is_navigable(n, state))
}

/// Collapse the cursor node, or step to its parent.
///
/// An expanded node with children collapses together with every expanded
/// descendant. The root never collapses. Otherwise a node below the top
/// level moves the cursor to its parent.
pub fn collapse<T>(list: &[TreeNode<T>], state: &TreeState) -> CollapseOutcome {
    let Some(node) = state
        .half_selected
        .as_deref()
        .and_then(|id| find_node(id, list))
    else {
        return CollapseOutcome::Unchanged;
    };

    let level = node.level();
    if state.is_expanded(&node.id) && node.may_have_children() {
        if level == 0 {
            return CollapseOutcome::Unchanged;
        }
        let removed = state
            .expanded
            .iter()
            .filter(|id| is_self_or_descendant(id, &node.id))
            .cloned()
            .collect();
        return CollapseOutcome::Collapsed(removed);
    }

    if level > 1 {
        if let Some(parent) = find_node(&node.path, list) {
            return CollapseOutcome::MovedToParent(parent.id.clone());
        }
    }
    CollapseOutcome::Unchanged
}

/// Decide the effect of expanding `target_id` against the refreshed list.
///
/// `was_expanded` is the expansion state before any children were loaded.
pub fn expand_decision<T>(list: &[TreeNode<T>], target_id: &str, was_expanded: bool) -> ExpandDecision {
    let Some(node) = find_node(target_id, list) else {
        return ExpandDecision::Vanished;
    };

    if !was_expanded && node.may_have_children() {
        return ExpandDecision::Expand;
    }

    match list.iter().find(|n| n.is_child_of(node)) {
        Some(child) => ExpandDecision::MoveCursor(child.id.clone()),
        None => ExpandDecision::Stay,
    }
}
