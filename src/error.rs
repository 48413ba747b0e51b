//! Error types for treenav
//!
//! Uses `thiserror` for library errors. Navigation edge cases are not errors:
//! they come back as outcome values and leave state untouched.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::LoadError;

/// Result type alias for treenav operations
pub type TreeResult<T> = Result<T, TreeError>;

/// Main error type for treenav operations
#[derive(Error, Debug)]
pub enum TreeError {
    /// Neither a pre-built node list nor a record config was supplied
    #[error("tree data or a tree data config must be provided")]
    MissingTreeSource,

    /// Children were spliced for a parent that is not in the list
    #[error("parent node '{id}' not found in tree")]
    ParentNotFound { id: String },

    /// The child loader failed for a node
    #[error("failed to load children of '{id}': {message}")]
    LoadFailed { id: String, message: String },

    /// Another tree instance already owns this cache key
    #[error("cache key '{key}' is already registered by another tree")]
    CacheKeyInUse { key: String },

    /// Invalid configuration file
    #[error("invalid config in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TreeError {
    pub(crate) fn load_failed(id: &str, err: LoadError) -> Self {
        TreeError::LoadFailed {
            id: id.to_string(),
            message: err.to_string(),
        }
    }
}
