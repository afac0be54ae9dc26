//! AST outline pane

use crate::parser::ast::NodeKind;
use crate::parser::outline::OutlineRow;
use crate::ui::panes::{follow_selection, pane_block};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

fn row_style(kind: Option<NodeKind>) -> Style {
    let fg = match kind {
        None => DEFAULT_THEME.comment,
        Some(NodeKind::ForStatement) | Some(NodeKind::StatementList) => DEFAULT_THEME.keyword,
        Some(NodeKind::Call) | Some(NodeKind::CallExpression) => DEFAULT_THEME.function,
        Some(NodeKind::DigitLiteral) => DEFAULT_THEME.number,
        _ => DEFAULT_THEME.fg,
    };
    Style::default().fg(fg)
}

/// Render the outline with the row at `selected` highlighted
pub fn render_outline_pane(
    frame: &mut Frame,
    area: Rect,
    rows: &[OutlineRow],
    selected: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Outline ", is_focused);

    if rows.is_empty() {
        let paragraph = Paragraph::new("(no program)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    *scroll_offset = follow_selection(*scroll_offset, selected, visible_height, rows.len());

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, row)| {
            let mut style = row_style(row.kind);
            if idx == selected {
                style = style
                    .bg(DEFAULT_THEME.current_line_bg)
                    .add_modifier(Modifier::BOLD);
            }
            ListItem::new(Line::from(vec![
                Span::raw("  ".repeat(row.depth)),
                Span::styled(row.label.clone(), style),
                Span::styled(
                    format!("  {}", row.line),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
