//! TreeNode and TreeState entities.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{id_level, join_id, parent_path, ROOT_ID};

/// One entry in the flattened tree.
///
/// `id` is the node's own normalized path, `path` is the id of its parent
/// (empty for direct children of the root). `data` is `None` only for the
/// synthetic root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode<T> {
    pub id: String,
    pub path: String,
    pub name: String,
    pub data: Option<T>,
    /// Ids of the known direct children (informational)
    #[serde(default)]
    pub children: Vec<String>,
    /// Children may exist but have not been loaded yet
    #[serde(default)]
    pub has_children_hint: bool,
}

impl<T> TreeNode<T> {
    /// Create a node from its parent path, name and record
    pub fn new(path: impl AsRef<str>, name: impl Into<String>, data: T) -> Self {
        let name = name.into();
        let path = parent_path(path.as_ref());
        Self {
            id: join_id(&path, &name),
            path,
            name,
            data: Some(data),
            children: Vec::new(),
            has_children_hint: false,
        }
    }

    /// Create a direct child of `parent`
    pub fn child_of(parent: &TreeNode<T>, name: impl Into<String>, data: T) -> Self {
        let path = if parent.is_root() { "" } else { parent.id.as_str() };
        Self::new(path, name, data)
    }

    /// The synthetic root with the given top-level children
    pub fn root(children: Vec<String>) -> Self {
        Self {
            id: ROOT_ID.to_string(),
            path: String::new(),
            name: String::new(),
            data: None,
            children,
            has_children_hint: false,
        }
    }

    /// Mark this node as possibly having unloaded children
    pub fn with_hint(mut self, hint: bool) -> Self {
        self.has_children_hint = hint;
        self
    }

    pub fn is_root(&self) -> bool {
        self.id == ROOT_ID
    }

    /// 0 for the root, 1 for top-level nodes, and so on
    pub fn level(&self) -> usize {
        id_level(&self.id)
    }

    pub fn is_top_level(&self) -> bool {
        self.level() == 1
    }

    /// Whether this node is a direct child of `parent`
    pub fn is_child_of(&self, parent: &TreeNode<T>) -> bool {
        self.is_child_of_id(&parent.id)
    }

    pub(crate) fn is_child_of_id(&self, parent_id: &str) -> bool {
        if self.is_root() {
            return false;
        }
        if parent_id == ROOT_ID {
            self.path.is_empty() || self.path == ROOT_ID
        } else {
            self.path == parent_id
        }
    }

    /// Known children or a hint that some may exist
    pub fn may_have_children(&self) -> bool {
        !self.children.is_empty() || self.has_children_hint
    }
}

/// Navigation and selection state of one tree.
///
/// `half_selected` is the keyboard/pointer cursor, `selected` is the
/// committed selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeState {
    pub selected: Option<String>,
    pub half_selected: Option<String>,
    pub expanded: BTreeSet<String>,
}

impl TreeState {
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    pub fn is_half_selected(&self, id: &str) -> bool {
        self.half_selected.as_deref() == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_derives_id_from_path_and_name() {
        let node = TreeNode::new("/a", "b", ());
        assert_eq!(node.id, "/a/b");
        assert_eq!(node.path, "/a");
        assert_eq!(node.level(), 2);
    }

    #[test]
    fn top_level_node_has_empty_path() {
        let node = TreeNode::new("/", "a", ());
        assert_eq!(node.id, "/a");
        assert_eq!(node.path, "");
        assert!(node.is_top_level());
    }

    #[test]
    fn child_of_root_and_of_node() {
        let root = TreeNode::<()>::root(vec![]);
        let a = TreeNode::child_of(&root, "a", ());
        let b = TreeNode::child_of(&a, "b", ());
        assert!(a.is_child_of(&root));
        assert!(b.is_child_of(&a));
        assert!(!b.is_child_of(&root));
        assert!(!root.is_child_of(&root));
    }

    #[test]
    fn may_have_children_uses_hint() {
        let node = TreeNode::new("", "a", ());
        assert!(!node.may_have_children());
        assert!(node.with_hint(true).may_have_children());
    }

    #[test]
    fn state_queries() {
        let mut state = TreeState::default();
        state.expanded.insert("/a".to_string());
        state.half_selected = Some("/a/b".to_string());
        assert!(state.is_expanded("/a"));
        assert!(state.is_half_selected("/a/b"));
        assert!(!state.is_selected("/a/b"));
    }
}
