//! Domain Entities
//!
//! - `TreeNode` - One entry of the flattened tree
//! - `TreeState` - Cursor, committed selection and expansion of one tree

mod tree_node;

pub use tree_node::{TreeNode, TreeState};
