//! Inspector application state and event loop

use crate::parser::outline::{outline, OutlineRow};
use crate::parser::ParseError;
use crate::runtime::Session;
use crate::symbols::SymbolIndex;
use crate::ui::panes::{self, SourceScrollState, StatusRenderData};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Outline,
    Symbols,
}

impl FocusedPane {
    /// Move focus to the next pane (source -> outline -> symbols)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Outline,
            FocusedPane::Outline => FocusedPane::Symbols,
            FocusedPane::Symbols => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Symbols,
            FocusedPane::Outline => FocusedPane::Source,
            FocusedPane::Symbols => FocusedPane::Outline,
        }
    }
}

/// The main application state
pub struct App {
    /// The source being inspected
    pub source_code: String,

    /// Parse failure, if any; the outline and symbols are empty then
    pub error: Option<ParseError>,

    pub rows: Vec<OutlineRow>,
    pub symbols: SymbolIndex,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Index into `rows` of the outline cursor
    pub selected: usize,

    /// Per-pane scroll offsets
    pub source_scroll: SourceScrollState,
    pub outline_scroll: usize,
    pub symbols_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Parse the session's source (if not already cached) and build the views
    pub fn new(session: &mut Session, name: &str) -> Self {
        let source_code = session.source().to_string();

        let (rows, symbols, error, status_message) = match session.parse() {
            Ok(program) => {
                let rows = outline(&program);
                let symbols = SymbolIndex::build(&program);
                let message = format!("{}: {} statement(s)", name, program.len());
                (rows, symbols, None, message)
            }
            Err(e) => {
                let location = e.location();
                let message = format!("{}:{}:{}: {}", name, location.line, location.column, e.message());
                (Vec::new(), SymbolIndex::default(), Some(e), message)
            }
        };

        App {
            source_code,
            error,
            rows,
            symbols,
            focused_pane: FocusedPane::Outline,
            selected: 0,
            source_scroll: SourceScrollState::default(),
            outline_scroll: 0,
            symbols_scroll: 0,
            should_quit: false,
            status_message,
        }
    }

    /// Line shown highlighted in the source pane
    pub fn current_line(&self) -> usize {
        match &self.error {
            Some(e) => e.location().line,
            None => self.rows.get(self.selected).map_or(0, |row| row.line),
        }
    }

    pub fn node_count(&self) -> usize {
        self.rows.iter().filter(|row| row.kind.is_some()).count()
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        // Source (left) | Outline over Symbols (right)
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(columns[1]);

        let current_line = self.current_line();

        panes::render_source_pane(
            frame,
            columns[0],
            &self.source_code,
            current_line,
            self.error.is_some(),
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        panes::render_outline_pane(
            frame,
            right_rows[0],
            &self.rows,
            self.selected,
            self.focused_pane == FocusedPane::Outline,
            &mut self.outline_scroll,
        );

        panes::render_symbols_pane(
            frame,
            right_rows[1],
            &self.symbols,
            self.focused_pane == FocusedPane::Symbols,
            &mut self.symbols_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &StatusRenderData {
                message: &self.status_message,
                node_count: self.node_count(),
                is_error: self.error.is_some(),
            },
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling up makes the current line move down visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Outline => {
                    self.selected = self.selected.saturating_sub(1);
                }
                FocusedPane::Symbols => {
                    self.symbols_scroll = self.symbols_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Outline => {
                    if self.selected + 1 < self.rows.len() {
                        self.selected += 1;
                    }
                }
                FocusedPane::Symbols => {
                    self.symbols_scroll = self.symbols_scroll.saturating_add(1);
                }
            },
            KeyCode::Home => match self.focused_pane {
                FocusedPane::Outline => self.selected = 0,
                FocusedPane::Symbols => self.symbols_scroll = 0,
                FocusedPane::Source => self.source_scroll.target_line_row = Some(usize::MAX),
            },
            KeyCode::End => match self.focused_pane {
                FocusedPane::Outline => self.selected = self.rows.len().saturating_sub(1),
                FocusedPane::Symbols => self.symbols_scroll = usize::MAX,
                FocusedPane::Source => self.source_scroll.target_line_row = Some(0),
            },
            _ => {}
        }
    }
}
