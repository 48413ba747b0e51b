//! ChildLoader port
//!
//! Fetches the current direct children of a node. The result replaces the
//! previous children wholesale; nothing is merged.

use async_trait::async_trait;

use crate::domain::entities::TreeNode;

#[async_trait]
pub trait ChildLoader<T: Send + Sync>: Send + Sync {
    /// Load the complete set of direct children of `node`.
    ///
    /// `previous` holds the children currently in the list. Returned nodes
    /// must be direct children, e.g. built with `TreeNode::child_of`.
    async fn load_children(
        &self,
        node: &TreeNode<T>,
        previous: &[TreeNode<T>],
    ) -> Result<Vec<TreeNode<T>>, LoadError>;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("node not found: {id}")]
    NotFound { id: String },

    #[error("permission denied reading {id}")]
    PermissionDenied { id: String },

    #[error("children unavailable: {message}")]
    Unavailable { message: String },
}
