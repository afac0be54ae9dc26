//! Symbol index pane

use crate::symbols::{SymbolIndex, SymbolUse};
use crate::ui::panes::pane_block;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, Padding, Paragraph},
    Frame,
};

fn use_color(kind: SymbolUse) -> ratatui::style::Color {
    match kind {
        SymbolUse::Assigned => DEFAULT_THEME.secondary,
        SymbolUse::LoopVariable => DEFAULT_THEME.variable,
        SymbolUse::Called => DEFAULT_THEME.function,
        SymbolUse::Read => DEFAULT_THEME.fg,
    }
}

/// Render one row per symbol, sorted by folded name
pub fn render_symbols_pane(
    frame: &mut Frame,
    area: Rect,
    symbols: &SymbolIndex,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Symbols ", is_focused);

    if symbols.is_empty() {
        let paragraph = Paragraph::new("(no symbols)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let entries = symbols.sorted();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    if entries.len() > visible_height {
        *scroll_offset = (*scroll_offset).min(entries.len() - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let items: Vec<ListItem> = entries
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(_, entry)| {
            let mut spans = vec![Span::styled(
                entry.name().to_string(),
                Style::default().fg(DEFAULT_THEME.fg),
            )];
            for kind in entry.kinds() {
                spans.push(Span::raw(" "));
                spans.push(Span::styled(
                    format!("{}×{}", kind, entry.count(kind)),
                    Style::default().fg(use_color(kind)),
                ));
            }
            spans.push(Span::styled(
                format!("  line {}", entry.first_line),
                Style::default().fg(DEFAULT_THEME.comment),
            ));
            ListItem::new(Line::from(spans))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
