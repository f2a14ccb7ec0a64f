//! Interactive list of navigation items

use std::io::{self, IsTerminal, Stderr, Write};
use std::time::Duration;

use crossterm::cursor::Show;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph};
use ratatui::{Frame, Terminal};

use crate::error::{CtxError, Result};
use crate::nav::Item;

/// What the operator chose
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Enter the item at this index
    Enter(usize),
    Back,
    /// Make the current node the canonical context
    Accept,
    Quit,
}

/// One screen of the picker
#[derive(Debug, Clone, Copy)]
pub struct ListView<'a> {
    pub title: &'a str,
    pub items: &'a [Item],
    pub can_accept: bool,
    pub status: Option<&'a str>,
}

/// Front-end the interactive loop drives
pub trait Picker {
    /// Show that `title` is loading; keys pressed meanwhile are dropped
    fn busy(&mut self, title: &str) -> Result<()>;

    /// Show the listing and block until the operator decides
    fn pick(&mut self, view: &ListView<'_>) -> Result<Selection>;
}

/// Cursor over a listing, independent of any terminal
#[derive(Debug, Default)]
pub struct PickerState {
    pub selected: usize,
}

impl PickerState {
    /// Cursor on the first real child, else the first selectable item
    pub fn reset(&mut self, items: &[Item]) {
        self.selected = items
            .iter()
            .position(|i| !i.back && !i.not_selectable)
            .or_else(|| items.iter().position(|i| !i.not_selectable))
            .unwrap_or(0);
    }

    fn step(&mut self, items: &[Item], forward: bool) {
        let mut i = self.selected;
        loop {
            i = match (forward, i) {
                (true, i) if i + 1 < items.len() => i + 1,
                (false, i) if i > 0 => i - 1,
                _ => return,
            };
            if !items[i].not_selectable {
                self.selected = i;
                return;
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, view: &ListView<'_>) -> Option<Selection> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Selection::Quit)
            }
            KeyCode::Char('q') | KeyCode::Esc => Some(Selection::Quit),
            KeyCode::Up | KeyCode::Char('k') => {
                self.step(view.items, false);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.step(view.items, true);
                None
            }
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => view
                .items
                .get(self.selected)
                .filter(|item| !item.not_selectable)
                .map(|_| Selection::Enter(self.selected)),
            KeyCode::Left | KeyCode::Backspace | KeyCode::Char('h') => Some(Selection::Back),
            KeyCode::Char('s') if view.can_accept => Some(Selection::Accept),
            _ => None,
        }
    }
}

fn terminal_error(e: io::Error) -> CtxError {
    CtxError::Terminal(e.to_string())
}

/// Leave raw mode and the alternate screen drawn on `out`
fn restore_terminal<W: Write>(out: &mut W) {
    disable_raw_mode().ok();
    execute!(out, LeaveAlternateScreen, Show).ok();
}

/// Full-screen picker drawn on stderr, so stdout stays free for `--file -`.
/// The terminal is restored when the picker is dropped.
pub struct TerminalPicker {
    terminal: Terminal<CrosstermBackend<Stderr>>,
    state: PickerState,
    title: String,
    drain: bool,
}

impl TerminalPicker {
    pub fn enter() -> Result<Self> {
        if !io::stdin().is_terminal() || !io::stderr().is_terminal() {
            return Err(CtxError::Terminal(
                "interactive mode requires a terminal on stdin and stderr; pass a path instead"
                    .to_string(),
            ));
        }

        enable_raw_mode().map_err(terminal_error)?;
        let mut stderr = io::stderr();
        if let Err(e) = execute!(stderr, EnterAlternateScreen) {
            restore_terminal(&mut stderr);
            return Err(terminal_error(e));
        }

        let terminal = match Terminal::new(CrosstermBackend::new(io::stderr())) {
            Ok(terminal) => terminal,
            Err(e) => {
                restore_terminal(&mut stderr);
                return Err(terminal_error(e));
            }
        };
        Ok(Self {
            terminal,
            state: PickerState::default(),
            title: String::new(),
            drain: false,
        })
    }

    /// Drop key presses buffered while a call was outstanding
    fn drain_events(&mut self) -> Result<()> {
        while event::poll(Duration::ZERO).map_err(terminal_error)? {
            event::read().map_err(terminal_error)?;
        }
        self.drain = false;
        Ok(())
    }
}

impl Drop for TerminalPicker {
    fn drop(&mut self) {
        restore_terminal(self.terminal.backend_mut());
    }
}

impl Picker for TerminalPicker {
    fn busy(&mut self, title: &str) -> Result<()> {
        self.drain = true;
        self.terminal
            .draw(|f| draw_busy(f, title))
            .map_err(terminal_error)?;
        Ok(())
    }

    fn pick(&mut self, view: &ListView<'_>) -> Result<Selection> {
        if self.drain {
            self.drain_events()?;
        }
        if self.title != view.title {
            self.title = view.title.to_string();
            self.state.reset(view.items);
        }

        loop {
            let selected = self.state.selected;
            self.terminal
                .draw(|f| draw_list(f, view, selected))
                .map_err(terminal_error)?;

            if let Event::Key(key) = event::read().map_err(terminal_error)? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(selection) = self.state.handle_key(key, view) {
                    return Ok(selection);
                }
            }
        }
    }
}

fn help_line(can_accept: bool) -> String {
    let mut help = "↑/↓ move · enter open · ← back".to_string();
    if can_accept {
        help.push_str(" · s switch context");
    }
    help.push_str(" · q quit");
    help
}

fn draw_list(f: &mut Frame, view: &ListView<'_>, selected: usize) {
    let chunks = Layout::vertical([
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(f.area());

    let items: Vec<ListItem> = view
        .items
        .iter()
        .map(|item| {
            let style = if item.not_selectable {
                Style::new().fg(Color::DarkGray).add_modifier(Modifier::ITALIC)
            } else {
                Style::new()
            };
            ListItem::new(item.text.clone()).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(Block::bordered().title(view.title.to_string()))
        .highlight_style(Style::new().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    f.render_stateful_widget(
        list,
        chunks[0],
        &mut ListState::default().with_selected(Some(selected)),
    );

    if let Some(status) = view.status {
        f.render_widget(
            Paragraph::new(Line::from(status.to_string())).style(Style::new().fg(Color::Red)),
            chunks[1],
        );
    }
    f.render_widget(
        Paragraph::new(Line::from(help_line(view.can_accept))).style(Style::new().fg(Color::DarkGray)),
        chunks[2],
    );
}

fn draw_busy(f: &mut Frame, title: &str) {
    let block = Block::bordered().title(title.to_string());
    f.render_widget(
        Paragraph::new(Line::from("Loading...")).block(block),
        f.area(),
    );
}
