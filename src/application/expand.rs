//! Expansion state machine.
//!
//! Each node moves `Idle -> Loading -> Resolved | Failed` while its children
//! are fetched. A second expand on a node that is still loading is coalesced,
//! and a load that finishes after a newer one started for the same node is
//! discarded.

use std::collections::HashMap;

use crate::domain::entities::TreeNode;

/// Load phase of one node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpandPhase {
    #[default]
    Idle,
    Loading {
        generation: u64,
    },
    Resolved,
    Failed,
}

/// Result of an expand request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpandOutcome {
    /// The node was added to the expanded set
    Expanded(String),
    /// The cursor moved to the node's first child
    MovedToChild(String),
    /// Target unknown or nothing to change
    Unchanged,
    /// The node disappeared; cursor and selection were cleared
    Vanished,
    /// A load for this node is already in flight
    Coalesced,
    /// The load result arrived for a superseded request
    Discarded,
}

/// First half of an expand: either finished already or waiting on a load
#[derive(Debug)]
pub enum ExpandStep<T> {
    Done(ExpandOutcome),
    Load(LoadTicket<T>),
}

/// A pending child load handed to the host
#[derive(Debug, Clone)]
pub struct LoadTicket<T> {
    /// Snapshot of the node at the time the load began
    pub node: TreeNode<T>,
    /// Its children at the time the load began
    pub previous: Vec<TreeNode<T>>,
    pub(crate) was_expanded: bool,
    pub(crate) generation: u64,
}

impl<T> LoadTicket<T> {
    pub fn node_id(&self) -> &str {
        &self.node.id
    }
}

/// Per-node phases of one tree
#[derive(Debug, Default)]
pub struct ExpandTracker {
    phases: HashMap<String, ExpandPhase>,
    next_generation: u64,
}

impl ExpandTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self, id: &str) -> ExpandPhase {
        self.phases.get(id).copied().unwrap_or_default()
    }

    pub fn is_loading(&self, id: &str) -> bool {
        matches!(self.phase(id), ExpandPhase::Loading { .. })
    }

    /// Enter `Loading` for `id`, `None` if a load is already in flight
    pub fn begin(&mut self, id: &str) -> Option<u64> {
        if self.is_loading(id) {
            return None;
        }
        self.next_generation += 1;
        let generation = self.next_generation;
        self.phases
            .insert(id.to_string(), ExpandPhase::Loading { generation });
        Some(generation)
    }

    /// Leave `Loading` for `id`. Returns false for a stale generation.
    pub fn finish(&mut self, id: &str, generation: u64, succeeded: bool) -> bool {
        if self.phase(id) != (ExpandPhase::Loading { generation }) {
            return false;
        }
        let phase = if succeeded {
            ExpandPhase::Resolved
        } else {
            ExpandPhase::Failed
        };
        self.phases.insert(id.to_string(), phase);
        true
    }

    /// Drop settled phases of ids that `keep` rejects. In-flight loads stay.
    pub fn retain_settled(&mut self, keep: impl Fn(&str) -> bool) {
        self.phases
            .retain(|id, phase| matches!(phase, ExpandPhase::Loading { .. }) || keep(id));
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Abandon every in-flight load; their tickets become stale
    pub fn abandon_all(&mut self) {
        self.phases
            .retain(|_, phase| !matches!(phase, ExpandPhase::Loading { .. }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_and_finish() {
        let mut tracker = ExpandTracker::new();
        assert_eq!(tracker.phase("/a"), ExpandPhase::Idle);

        let generation = tracker.begin("/a").unwrap();
        assert!(tracker.is_loading("/a"));
        assert!(tracker.begin("/a").is_none());

        assert!(tracker.finish("/a", generation, true));
        assert_eq!(tracker.phase("/a"), ExpandPhase::Resolved);
    }

    #[test]
    fn failed_load_can_be_retried() {
        let mut tracker = ExpandTracker::new();
        let generation = tracker.begin("/a").unwrap();
        assert!(tracker.finish("/a", generation, false));
        assert_eq!(tracker.phase("/a"), ExpandPhase::Failed);
        assert!(tracker.begin("/a").is_some());
    }

    #[test]
    fn retain_settled_keeps_in_flight_loads() {
        let mut tracker = ExpandTracker::new();
        let a = tracker.begin("/a").unwrap();
        tracker.finish("/a", a, true);
        let b = tracker.begin("/b").unwrap();
        tracker.finish("/b", b, false);
        tracker.begin("/c").unwrap();

        tracker.retain_settled(|id| id == "/b");

        assert_eq!(tracker.phase("/a"), ExpandPhase::Idle);
        assert_eq!(tracker.phase("/b"), ExpandPhase::Failed);
        assert!(tracker.is_loading("/c"));
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn stale_generation_is_rejected() {
        let mut tracker = ExpandTracker::new();
        let first = tracker.begin("/a").unwrap();
        tracker.abandon_all();
        let second = tracker.begin("/a").unwrap();

        assert!(!tracker.finish("/a", first, true));
        assert!(tracker.is_loading("/a"));
        assert!(tracker.finish("/a", second, true));
    }
}
