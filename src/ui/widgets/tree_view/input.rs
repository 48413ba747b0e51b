//! Keyboard and mouse input handling and the interactive loop.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use crossterm::style::{Print, ResetColor, SetForegroundColor};
use crossterm::{cursor, execute, queue, terminal};
use tracing::debug;

use crate::application::{TreeAction, TreeStore};
use crate::error::{TreeError, TreeResult};
use crate::ui::theme::colors;

use super::{visible_nodes, TreeView};

const DOUBLE_CLICK: Duration = Duration::from_millis(400);
/// Title line plus a blank line
const HEADER_LINES: u16 = 2;
/// Rule, status and help lines
const FOOTER_LINES: u16 = 3;

/// How an interactive session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractiveOutcome {
    /// Committed ids (several in multi-select mode)
    Selected(Vec<String>),
    Cancelled,
}

/// Convert a keyboard event to a TreeAction
pub fn key_to_action(key: KeyEvent) -> Option<TreeAction> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(TreeAction::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(TreeAction::Down),
        KeyCode::Right | KeyCode::Char('l') => Some(TreeAction::Expand),
        KeyCode::Left | KeyCode::Char('h') => Some(TreeAction::Collapse),
        KeyCode::Enter | KeyCode::Char(' ') => Some(TreeAction::Commit),
        _ => None,
    }
}

pub fn is_quit_key(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// First row to draw so that the cursor row stays inside a body of `height`
/// rows
pub fn scroll_offset(cursor: Option<usize>, offset: usize, height: usize) -> usize {
    let Some(cursor) = cursor else {
        return offset;
    };
    if height == 0 {
        return cursor;
    }
    if cursor < offset {
        cursor
    } else if cursor >= offset + height {
        cursor + 1 - height
    } else {
        offset
    }
}

/// Raw mode, alternate screen and mouse capture for the life of the value
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            event::EnableMouseCapture,
            cursor::Hide
        )?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(
            io::stdout(),
            cursor::Show,
            event::DisableMouseCapture,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

struct Screen<'a> {
    title: &'a str,
    color: bool,
    status: Option<String>,
    offset: usize,
}

impl Screen<'_> {
    fn body_height() -> usize {
        let (_, rows) = terminal::size().unwrap_or((80, 24));
        rows.saturating_sub(HEADER_LINES + FOOTER_LINES).max(1) as usize
    }

    fn draw<T>(
        &mut self,
        out: &mut impl Write,
        store: &TreeStore<T>,
        view: &TreeView<T>,
    ) -> io::Result<()>
    where
        T: Clone + Send + Sync + 'static,
    {
        let rows = view.rows(store);
        let height = Self::body_height();
        self.offset = scroll_offset(rows.iter().position(|r| r.is_cursor), self.offset, height);

        queue!(
            out,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0),
            Print(self.title),
            Print("\r\n\r\n")
        )?;

        for row in rows.iter().skip(self.offset).take(height) {
            if row.is_cursor && self.color {
                queue!(out, SetForegroundColor(colors::ACTIVE), Print(&row.line), ResetColor)?;
            } else {
                queue!(out, Print(&row.line))?;
            }
            queue!(out, Print("\r\n"))?;
        }

        let rule = view.icons().rule.repeat(40);
        queue!(out, Print(rule), Print("\r\n"))?;
        if let Some(status) = &self.status {
            if self.color {
                queue!(out, SetForegroundColor(colors::ERROR), Print(status), ResetColor)?;
            } else {
                queue!(out, Print(status))?;
            }
        }
        queue!(out, Print("\r\n"))?;
        if self.color {
            queue!(out, SetForegroundColor(colors::DIM))?;
        }
        queue!(out, Print(super::render_help_bar()), ResetColor)?;
        out.flush()
    }

    /// Id drawn on terminal row `y`
    fn row_at<T>(&self, y: u16, store: &TreeStore<T>) -> Option<String>
    where
        T: Clone + Send + Sync + 'static,
    {
        let index = y.checked_sub(HEADER_LINES)? as usize;
        if index >= Self::body_height() {
            return None;
        }
        visible_nodes(store.nodes(), store.state())
            .get(self.offset + index)
            .map(|n| n.id.clone())
    }

    /// Show load failures on the status line, propagate anything else
    fn report<R>(&mut self, result: TreeResult<R>) -> TreeResult<()> {
        match result {
            Ok(_) => {
                self.status = None;
                Ok(())
            }
            Err(err @ TreeError::LoadFailed { .. }) => {
                self.status = Some(err.to_string());
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}

/// Run the tree view interactively until a selection is committed or the
/// user quits.
///
/// In multi-select mode commits accumulate and quitting returns them.
pub async fn run_interactive<T>(
    store: &mut TreeStore<T>,
    view: &TreeView<T>,
    title: &str,
    color: bool,
) -> TreeResult<InteractiveOutcome>
where
    T: Clone + Send + Sync + 'static,
{
    let _guard = TerminalGuard::enter()?;
    let mut stdout = io::stdout();
    let mut screen = Screen {
        title,
        color,
        status: None,
        offset: 0,
    };

    store.focus();
    if store.half_selected_node().is_none() {
        let first = visible_nodes(store.nodes(), store.state())
            .first()
            .map(|n| n.id.clone());
        store.set_cursor(first.as_deref());
    }

    let mut last_click: Option<(String, Instant)> = None;
    let outcome = loop {
        screen.draw(&mut stdout, store, view)?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if is_quit_key(key) {
                    break if store.is_multi_select() {
                        InteractiveOutcome::Selected(
                            store
                                .multi_selected_nodes()
                                .iter()
                                .map(|n| n.id.clone())
                                .collect(),
                        )
                    } else {
                        InteractiveOutcome::Cancelled
                    };
                }
                let Some(action) = key_to_action(key) else {
                    continue;
                };
                let result = store.handle_action(action).await;
                screen.report(result)?;
                if action == TreeAction::Commit && !store.is_multi_select() {
                    if let Some(node) = store.selected_node() {
                        break InteractiveOutcome::Selected(vec![node.id.clone()]);
                    }
                }
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let Some(id) = screen.row_at(mouse.row, store) else {
                    continue;
                };
                let is_double = matches!(
                    &last_click,
                    Some((prev, at)) if *prev == id && at.elapsed() < DOUBLE_CLICK
                );
                let result = if is_double {
                    last_click = None;
                    store.double_click(&id).await
                } else {
                    last_click = Some((id.clone(), Instant::now()));
                    store.click(&id).await
                };
                screen.report(result)?;
            }
            _ => {}
        }
    };

    store.blur();
    debug!(?outcome, "interactive session ended");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn key_to_action_arrow_keys() {
        assert_eq!(key_to_action(key(KeyCode::Up)), Some(TreeAction::Up));
        assert_eq!(key_to_action(key(KeyCode::Down)), Some(TreeAction::Down));
        assert_eq!(key_to_action(key(KeyCode::Left)), Some(TreeAction::Collapse));
        assert_eq!(key_to_action(key(KeyCode::Right)), Some(TreeAction::Expand));
    }

    #[test]
    fn key_to_action_vim_keys() {
        assert_eq!(key_to_action(key(KeyCode::Char('k'))), Some(TreeAction::Up));
        assert_eq!(key_to_action(key(KeyCode::Char('j'))), Some(TreeAction::Down));
        assert_eq!(key_to_action(key(KeyCode::Char('h'))), Some(TreeAction::Collapse));
        assert_eq!(key_to_action(key(KeyCode::Char('l'))), Some(TreeAction::Expand));
    }

    #[test]
    fn key_to_action_commit_keys() {
        assert_eq!(key_to_action(key(KeyCode::Enter)), Some(TreeAction::Commit));
        assert_eq!(key_to_action(key(KeyCode::Char(' '))), Some(TreeAction::Commit));
    }

    #[test]
    fn key_to_action_unknown_key() {
        assert_eq!(key_to_action(key(KeyCode::Char('z'))), None);
        assert_eq!(key_to_action(key(KeyCode::F(1))), None);
        assert_eq!(key_to_action(key(KeyCode::Tab)), None);
    }

    #[test]
    fn quit_keys() {
        assert!(is_quit_key(key(KeyCode::Char('q'))));
        assert!(is_quit_key(key(KeyCode::Esc)));
        assert!(is_quit_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_quit_key(key(KeyCode::Char('c'))));
    }

    #[test]
    fn scroll_offset_keeps_cursor_visible() {
        assert_eq!(scroll_offset(None, 3, 10), 3);
        assert_eq!(scroll_offset(Some(5), 0, 10), 0);
        assert_eq!(scroll_offset(Some(12), 0, 10), 3);
        assert_eq!(scroll_offset(Some(2), 5, 10), 2);
        assert_eq!(scroll_offset(Some(4), 0, 0), 4);
    }
}
