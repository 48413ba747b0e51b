//! Record access port
//!
//! Domain records are arbitrary caller types. The flattener only needs to
//! read two fields from each one, named by the caller through
//! `TreeDataConfig`.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;

use serde_json::Value;

/// Field access on a domain record
pub trait TreeRecord {
    /// Read a field as text, `None` if the record has no such field
    fn field(&self, key: &str) -> Option<String>;
}

impl TreeRecord for Value {
    fn field(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl<S: BuildHasher> TreeRecord for HashMap<String, String, S> {
    fn field(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl TreeRecord for BTreeMap<String, String> {
    fn field(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Records plus the names of their parent-path and name fields
#[derive(Debug, Clone)]
pub struct TreeDataConfig<T> {
    pub data: Vec<T>,
    pub path: String,
    pub name: String,
}

impl<T> TreeDataConfig<T> {
    pub fn new(data: Vec<T>, path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            data,
            path: path.into(),
            name: name.into(),
        }
    }
}

/// Whether a record may have children that are loaded on demand
pub enum ChildHint<T> {
    /// No lazy loading, nodes are leaves until children are known
    None,
    /// Every record may have children
    All,
    /// Ask per record
    PerRecord(Box<dyn Fn(&T) -> bool + Send + Sync>),
}

impl<T> ChildHint<T> {
    pub fn per_record(predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        ChildHint::PerRecord(Box::new(predicate))
    }

    pub fn hint_for(&self, record: &T) -> bool {
        match self {
            ChildHint::None => false,
            ChildHint::All => true,
            ChildHint::PerRecord(predicate) => predicate(record),
        }
    }
}

impl<T> Default for ChildHint<T> {
    fn default() -> Self {
        ChildHint::None
    }
}

impl<T> fmt::Debug for ChildHint<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildHint::None => f.write_str("ChildHint::None"),
            ChildHint::All => f.write_str("ChildHint::All"),
            ChildHint::PerRecord(_) => f.write_str("ChildHint::PerRecord(..)"),
        }
    }
}
