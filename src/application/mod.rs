//! Application Layer
//!
//! Stateful coordination on top of the pure domain services.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain navigation rules (those are in Domain)
//! - Drives child loaders and publishes state for outside readers
//!
//! ## Components
//!
//! - `TreeStore` - Canonical cursor, selection and expansion of one tree
//! - `ExpandTracker` - Per-node load phases with stale-result detection
//! - `TreeRegistry` - Keyed, read-only access to published tree state

pub mod expand;
pub mod registry;
pub mod store;

pub use expand::{ExpandOutcome, ExpandPhase, ExpandStep, ExpandTracker, LoadTicket};
pub use registry::{OwnerId, TreeRegistry, TreeSnapshot};
pub use store::{SelectionEvent, TreeAction, TreeStore, TreeStoreBuilder, ViewOptions};
