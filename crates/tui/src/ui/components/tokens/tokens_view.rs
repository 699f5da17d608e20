//! List rendering for projected token rows.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use super::TokenListState;

/// Draws the token list: issuer and account name on the left, the live
/// password on the right, and an advance marker on counter-based rows.
pub fn render_token_list(frame: &mut Frame, area: Rect, state: &mut TokenListState) {
    let mut block = Block::default().borders(Borders::ALL).title("Tokens");
    if state.f_list.get() {
        block = block.border_style(Style::default().add_modifier(Modifier::BOLD));
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let items: Vec<ListItem> = state
        .rows()
        .iter()
        .map(|row| {
            let mut segments = vec![
                Span::styled(
                    format!("{:<16}", row.issuer),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("{:<24}", row.name)),
                Span::styled(
                    row.password.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ];
            if row.shows_button {
                segments.push(Span::styled(" ↻", Style::default().add_modifier(Modifier::DIM)));
            }
            ListItem::new(Line::from(segments))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, inner, state.list_state_mut());
}
