//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod child_loader;
pub mod record;

pub use child_loader::{ChildLoader, LoadError};
pub use record::{ChildHint, TreeDataConfig, TreeRecord};
