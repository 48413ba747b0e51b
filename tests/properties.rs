//! Property tests for treenav.
//!
//! Properties use randomized trees and paths to protect the invariants of
//! the flat node list: ordering, parent links and navigation symmetry.
//!
//! Run with: `cargo test --test properties`

#[path = "properties/strategies.rs"]
mod strategies;

#[path = "properties/node_ids.rs"]
mod node_ids;

#[path = "properties/flattener.rs"]
mod flattener;

#[path = "properties/navigation.rs"]
mod navigation;
