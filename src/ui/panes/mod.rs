//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source display with syntax highlighting and the selected line
//! - [`outline`]: AST outline with a cursor
//! - [`symbols`]: Case-insensitive symbol index
//! - [`status`]: Status bar with keybindings and parse state
//!
//! Each pane module exports a `render_*` function that draws from borrowed
//! data and updates only its own scroll offset.

pub mod outline;
pub mod source;
pub mod status;
pub mod symbols;

pub use outline::render_outline_pane;
pub use source::{render_source_pane, SourceScrollState};
pub use status::{render_status_bar, StatusRenderData};
pub use symbols::render_symbols_pane;

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

/// Bordered block whose border reflects focus
fn pane_block(title: &str, is_focused: bool) -> Block<'_> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Clamp `offset` so that `selected` stays within a window of `height` rows
fn follow_selection(offset: usize, selected: usize, height: usize, total: usize) -> usize {
    let height = height.max(1);
    let mut offset = offset;
    if selected < offset {
        offset = selected;
    } else if selected >= offset + height {
        offset = selected + 1 - height;
    }
    offset.min(total.saturating_sub(height))
}
