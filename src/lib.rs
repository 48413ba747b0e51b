//! treenav - hierarchical navigation engine for tree widgets
//!
//! Keeps a tree as one flat, sorted list of nodes whose ids are
//! slash-separated paths, loads children on demand through a pluggable
//! loader, and drives cursor, selection and expansion from keyboard and
//! pointer input. Tree state can be published to a shared registry so other
//! parts of an application can read it by key.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod ui;

// Re-exports for convenience
pub use application::{
    ExpandOutcome, ExpandStep, SelectionEvent, TreeAction, TreeRegistry, TreeSnapshot, TreeStore,
    ViewOptions,
};
pub use domain::entities::{TreeNode, TreeState};
pub use domain::ports::{ChildHint, ChildLoader, LoadError, TreeDataConfig, TreeRecord};
pub use domain::services::{flatten_records, get_children, with_root, CollapseOutcome};
pub use error::{TreeError, TreeResult};
