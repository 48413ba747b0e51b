//! Domain Layer
//!
//! The tree model and its navigation algorithms, without I/O.
//!
//! ## Structure
//!
//! - `value_objects/` - Node ids and the path arithmetic over them
//! - `entities/` - `TreeNode` and the per-tree `TreeState`
//! - `services/` - Flattener, child resolver, navigator
//! - `ports/` - Record access and the child loader contract
//!
//! ## Design Principles
//!
//! 1. **No I/O** - Loading children goes through the `ChildLoader` port
//! 2. **Pure Functions** - Services read a list and a state and return decisions
//! 3. **Ids are the structure** - Parent/child is derived from ids, never stored as pointers

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
