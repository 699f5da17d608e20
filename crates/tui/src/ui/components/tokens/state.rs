//! Selection and refresh bookkeeping for the token list.

use crossterm::event::{KeyCode, KeyEvent};
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use tocky_types::{DisplayTime, Effect, TokenRef};

use super::TokenRow;

/// Projected credential rows plus the selection that rides across
/// refreshes.
///
/// The list imposes no ordering of its own; rows appear in whatever order
/// the store hands tokens over. The refresh driver owns the tick cadence
/// and the sampled time.
#[derive(Debug)]
pub struct TokenListState {
    rows: Vec<TokenRow>,
    list_state: ListState,
    container_focus: FocusFlag,
    pub f_list: FocusFlag,
}

impl Default for TokenListState {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenListState {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            list_state: ListState::default(),
            container_focus: FocusFlag::named("tokens"),
            f_list: FocusFlag::named("tokens.list"),
        }
    }

    pub fn rows(&self) -> &[TokenRow] {
        &self.rows
    }

    pub fn list_state_mut(&mut self) -> &mut ListState {
        &mut self.list_state
    }

    pub fn selected_row(&self) -> Option<&TokenRow> {
        self.list_state.selected().and_then(|index| self.rows.get(index))
    }

    /// Rebuilds every row at `display_time`, keeping store order.
    ///
    /// Returns whether anything visible changed; an unchanged row set lets
    /// the driver skip the redraw entirely. Selection follows the
    /// credential across the refresh: the row with the same identity stays
    /// selected even when its password or position changed. A selected
    /// credential that vanished falls back to the nearest index.
    pub fn refresh(&mut self, tokens: &[TokenRef], display_time: DisplayTime) -> bool {
        let next: Vec<TokenRow> = tokens
            .iter()
            .map(|token| TokenRow::new(token, display_time))
            .collect();
        if next == self.rows {
            return false;
        }

        let remapped = self
            .selected_row()
            .and_then(|current| next.iter().position(|row| row.has_same_identity(current)));
        let fallback = self.list_state.selected();
        self.rows = next;

        let selection = remapped
            .or_else(|| fallback.map(|index| index.min(self.rows.len().saturating_sub(1))))
            .or(if self.rows.is_empty() { None } else { Some(0) })
            .filter(|_| !self.rows.is_empty());
        self.list_state.select(selection);
        true
    }

    /// Routes list keys into upward effects. Selection movement stays
    /// local; everything else is reported as a row action request.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Vec<Effect> {
        let mut effects = Vec::new();
        match key.code {
            KeyCode::Up => self.list_state.select_previous(),
            KeyCode::Down => self.list_state.select_next(),
            KeyCode::Enter => {
                if let Some(row) = self.selected_row() {
                    effects.push(Effect::ActionRequested(row.select_action.clone()));
                }
            }
            KeyCode::Char('r') => {
                // Only counter-based rows offer a manual advance.
                if let Some(row) = self.selected_row()
                    && row.shows_button
                {
                    effects.push(Effect::ActionRequested(row.button_action.clone()));
                }
            }
            KeyCode::Char('e') => {
                if let Some(row) = self.selected_row() {
                    effects.push(Effect::ActionRequested(row.edit_action.clone()));
                }
            }
            KeyCode::Char('d') => {
                if let Some(row) = self.selected_row() {
                    effects.push(Effect::ActionRequested(row.delete_action.clone()));
                }
            }
            _ => {}
        }
        effects
    }
}

impl HasFocus for TokenListState {
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        builder.leaf_widget(&self.f_list);
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}
