//! External tree-state registry.
//!
//! Lets code outside a tree's owner read its latest state by key. Each key
//! has a single writer: the owner that registered it first keeps it until it
//! unregisters. Readers get an immutable `Arc` snapshot; changes must go
//! through the owning store, which republishes.
//!
//! Contents live only in memory and only for the life of the process.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;
use tracing::debug;

use crate::domain::entities::{TreeNode, TreeState};
use crate::domain::services::find_node;
use crate::error::{TreeError, TreeResult};

/// Published state of one tree
#[derive(Debug, Clone, Serialize)]
pub struct TreeSnapshot<T> {
    pub nodes: Vec<TreeNode<T>>,
    pub state: TreeState,
    pub multi_select: bool,
    pub multi_selected: Vec<String>,
}

impl<T> TreeSnapshot<T> {
    pub fn node(&self, id: &str) -> Option<&TreeNode<T>> {
        find_node(id, &self.nodes)
    }

    pub fn selected_node(&self) -> Option<&TreeNode<T>> {
        self.node(self.state.selected.as_deref()?)
    }

    pub fn half_selected_node(&self) -> Option<&TreeNode<T>> {
        self.node(self.state.half_selected.as_deref()?)
    }
}

/// Identity of a registry writer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OwnerId(u64);

struct Entry<T> {
    owner: OwnerId,
    snapshot: Arc<TreeSnapshot<T>>,
}

/// Keyed registry of tree snapshots, shared by `Arc`
pub struct TreeRegistry<T> {
    entries: RwLock<HashMap<String, Entry<T>>>,
    next_owner: AtomicU64,
}

impl<T> Default for TreeRegistry<T> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            next_owner: AtomicU64::new(1),
        }
    }
}

impl<T> TreeRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a writer identity
    pub fn owner(&self) -> OwnerId {
        OwnerId(self.next_owner.fetch_add(1, Ordering::Relaxed))
    }

    /// Publish `snapshot` under `key`.
    ///
    /// The first owner to register a key keeps it; later calls from the same
    /// owner replace the snapshot, calls from any other owner fail.
    pub fn register(&self, key: &str, owner: OwnerId, snapshot: TreeSnapshot<T>) -> TreeResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        match entries.get_mut(key) {
            Some(entry) if entry.owner != owner => Err(TreeError::CacheKeyInUse {
                key: key.to_string(),
            }),
            Some(entry) => {
                entry.snapshot = Arc::new(snapshot);
                Ok(())
            }
            None => {
                debug!(key, "registered tree state");
                entries.insert(
                    key.to_string(),
                    Entry {
                        owner,
                        snapshot: Arc::new(snapshot),
                    },
                );
                Ok(())
            }
        }
    }

    /// Withdraw `key` if `owner` holds it
    pub fn unregister(&self, key: &str, owner: OwnerId) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.get(key).is_some_and(|e| e.owner == owner) {
            entries.remove(key);
            debug!(key, "withdrew tree state");
            true
        } else {
            false
        }
    }

    /// Latest snapshot for `key`
    pub fn lookup(&self, key: &str) -> Option<Arc<TreeSnapshot<T>>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).map(|e| Arc::clone(&e.snapshot))
    }

    pub fn contains(&self, key: &str) -> bool {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
