//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

pub mod node_id;

pub use node_id::{
    ancestor_ids, compare_ids, id_level, is_self_or_descendant, join_id, parent_path, valid_path,
    ROOT_ID, SEPARATOR,
};
