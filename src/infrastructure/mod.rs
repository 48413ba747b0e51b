//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `loaders/` - Child loader implementations (local file system)

pub mod loaders;

// Re-export for convenience
pub use loaders::{FsChildLoader, FsEntry};
