//! Domain Services
//!
//! Stateless algorithms over the flat node list.

pub mod child_resolver;
pub mod flattener;
pub mod navigator;

pub use child_resolver::{find_node, get_children, position_of, splice_children};
pub use flattener::{flatten_records, with_root};
pub use navigator::{
    collapse, expand_decision, is_navigable, move_down, move_up, CollapseOutcome, ExpandDecision,
};
