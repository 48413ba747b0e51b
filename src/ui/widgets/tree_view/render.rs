//! Row rendering for the tree view.
//!
//! A [`NodeRenderer`] turns one visible node into one line of text. The
//! default renderer indents by level and draws the expand and selection
//! markers; callers may supply their own renderer (or a closure) instead.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::domain::entities::TreeNode;
use crate::ui::theme::{icons, IconSet};

/// What a renderer knows about the row it draws
#[derive(Debug)]
pub struct RowContext<'a, T> {
    pub node: &'a TreeNode<T>,
    /// Committed selection (single or multi)
    pub is_selected: bool,
    /// Under the cursor
    pub is_half_selected: bool,
    pub is_expanded: bool,
}

/// Strategy for turning a node into a line
pub trait NodeRenderer<T> {
    fn render(&self, row: &RowContext<'_, T>) -> String;
}

impl<T, F> NodeRenderer<T> for F
where
    F: Fn(&RowContext<'_, T>) -> String,
{
    fn render(&self, row: &RowContext<'_, T>) -> String {
        self(row)
    }
}

/// Level-indented rows with expand and selection markers
#[derive(Debug, Clone, Copy)]
pub struct DefaultRenderer {
    icons: IconSet,
    indent: usize,
}

impl DefaultRenderer {
    pub fn new(unicode: bool, indent: usize) -> Self {
        Self {
            icons: IconSet::new(unicode),
            indent,
        }
    }
}

impl<T> NodeRenderer<T> for DefaultRenderer {
    fn render(&self, row: &RowContext<'_, T>) -> String {
        let cursor = if row.is_half_selected {
            icons::CURSOR.to_string()
        } else {
            " ".repeat(icons::CURSOR.len())
        };
        let indent = " ".repeat(self.indent * row.node.level().saturating_sub(1));

        let expand_icon = if !row.node.may_have_children() {
            // Keep leaves aligned with their expandable siblings.
            " ".repeat(self.icons.collapse.width() + 1)
        } else if row.is_expanded {
            format!("{} ", self.icons.expand)
        } else {
            format!("{} ", self.icons.collapse)
        };

        let state_icon = if row.is_selected {
            self.icons.selected
        } else {
            self.icons.unselected
        };

        format!(
            "{}{}{}{} {}",
            cursor, indent, expand_icon, state_icon, row.node.name
        )
    }
}

/// Cut `line` to at most `max` columns, marking the cut with `ellipsis`
pub fn fit_width(line: &str, max: usize, ellipsis: &str) -> String {
    if line.width() <= max {
        return line.to_string();
    }
    let budget = max.saturating_sub(ellipsis.width());
    let mut used = 0;
    let mut out = String::new();
    for ch in line.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push_str(ellipsis);
    out
}

/// Render the help bar showing keyboard shortcuts
pub fn render_help_bar() -> String {
    String::from(
        "[↑↓/jk] Move    [→/l] Expand    [←/h] Collapse    [Enter/Space] Select    [q] Quit",
    )
}
