//! Tree View Widget
//!
//! Draws the visible part of a [`TreeStore`] as text and drives it from the
//! keyboard and mouse in a raw-mode terminal.
//!
//! # Module Structure
//!
//! - `render` - Row rendering strategy (default or caller-supplied)
//! - `input` - Keyboard mapping and the interactive loop

mod input;
mod render;

pub use input::{is_quit_key, key_to_action, run_interactive, scroll_offset, InteractiveOutcome};
pub use render::{fit_width, render_help_bar, DefaultRenderer, NodeRenderer, RowContext};

use crate::application::TreeStore;
use crate::domain::entities::{TreeNode, TreeState};
use crate::domain::value_objects::ancestor_ids;
use crate::ui::theme::IconSet;

/// Nodes currently shown: the root is hidden and a node is shown only when
/// every one of its ancestors is expanded
pub fn visible_nodes<'a, T>(nodes: &'a [TreeNode<T>], state: &TreeState) -> Vec<&'a TreeNode<T>> {
    nodes
        .iter()
        .filter(|n| !n.is_root())
        .filter(|n| ancestor_ids(&n.path).iter().all(|id| state.is_expanded(id)))
        .collect()
}

/// One rendered line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRow {
    pub id: String,
    pub line: String,
    pub is_cursor: bool,
}

/// Renders a store through one [`NodeRenderer`], fixed at construction
pub struct TreeView<T> {
    renderer: Box<dyn NodeRenderer<T> + Send + Sync>,
    icons: IconSet,
    width: Option<usize>,
}

impl<T> TreeView<T> {
    /// View with the default renderer
    pub fn new(unicode: bool, indent: usize) -> Self {
        Self {
            renderer: Box::new(DefaultRenderer::new(unicode, indent)),
            icons: IconSet::new(unicode),
            width: None,
        }
    }

    /// Replace the default renderer
    pub fn renderer(mut self, renderer: impl NodeRenderer<T> + Send + Sync + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// Truncate lines to `width` columns
    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    pub fn icons(&self) -> IconSet {
        self.icons
    }
}

impl<T> TreeView<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn rows(&self, store: &TreeStore<T>) -> Vec<ViewRow> {
        let state = store.state();
        visible_nodes(store.nodes(), state)
            .into_iter()
            .map(|node| {
                let ctx = RowContext {
                    node,
                    is_selected: state.is_selected(&node.id) || store.is_multi_selected(&node.id),
                    is_half_selected: state.is_half_selected(&node.id),
                    is_expanded: state.is_expanded(&node.id),
                };
                let line = self.renderer.render(&ctx);
                let line = match self.width {
                    Some(width) => fit_width(&line, width, self.icons.ellipsis),
                    None => line,
                };
                ViewRow {
                    id: node.id.clone(),
                    line,
                    is_cursor: ctx.is_half_selected,
                }
            })
            .collect()
    }

    pub fn render(&self, store: &TreeStore<T>) -> String {
        self.rows(store)
            .into_iter()
            .map(|row| row.line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
