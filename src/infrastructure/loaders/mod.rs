//! Child loader implementations

mod fs;

pub use fs::{FsChildLoader, FsEntry};
