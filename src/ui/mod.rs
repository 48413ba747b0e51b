//! Terminal presentation
//!
//! - `theme` - Icons and colors
//! - `terminal` - Capability detection
//! - `widgets::tree_view` - Rendering and the interactive loop

pub mod terminal;
pub mod theme;
pub mod widgets;
