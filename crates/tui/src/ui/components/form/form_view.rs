//! Shared rendering for text field rows and the credential forms.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tocky_types::form::KeyboardKind;

use super::state::{PREFERRED_ROW_HEIGHT, TextFieldRowState};
use super::{AddTokenFormState, EditTokenFormState};

/// Draws one text field row: a label line above a bordered input line.
///
/// Secret rows render masked. The terminal cursor is placed only while the
/// row holds focus.
pub fn render_text_field_row(frame: &mut Frame, area: Rect, row: &TextFieldRowState) {
    let splits = Layout::vertical([
        Constraint::Length(1),                        // label
        Constraint::Length(PREFERRED_ROW_HEIGHT - 1), // bordered input
    ])
    .split(area);

    let label = Paragraph::new(Span::styled(
        row.label().to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(label, splits[0]);

    let focused = row.f_input.get();
    let mut block = Block::default().borders(Borders::ALL);
    if focused {
        block = block.border_style(Style::default().add_modifier(Modifier::BOLD));
    }
    let inner = block.inner(splits[1]);
    frame.render_widget(block, splits[1]);

    let (display, cursor_columns) = display_text(row);
    let content = if display.is_empty() {
        Paragraph::new(Span::styled(
            row.placeholder().to_string(),
            Style::default().add_modifier(Modifier::DIM),
        ))
    } else {
        Paragraph::new(display)
    };
    frame.render_widget(content, inner);

    if focused && inner.width > 0 {
        let max_x = inner.x.saturating_add(inner.width.saturating_sub(1));
        let cursor_x = inner.x.saturating_add(cursor_columns as u16).min(max_x);
        frame.set_cursor_position((cursor_x, inner.y));
    }
}

/// The row's visible text and the cursor column within it, after masking.
fn display_text(row: &TextFieldRowState) -> (String, usize) {
    match row.presentation().keyboard {
        KeyboardKind::Secret => {
            let masked: String = row.text().chars().map(|_| '•').collect();
            let columns = row.text()[..row.input().cursor()].chars().count();
            (masked, columns)
        }
        KeyboardKind::Text => (row.text().to_string(), row.input().cursor_columns()),
    }
}

/// Return-key hint for whichever row currently holds focus.
fn focused_hint(rows: &[&TextFieldRowState]) -> Line<'static> {
    let label = rows
        .iter()
        .find(|row| row.f_input.get())
        .map(|row| row.presentation().return_key.hint_label())
        .unwrap_or("Done");
    Line::from(vec![
        Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!(" {label}  ")),
        Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" Cancel"),
    ])
}

/// Draws the edit form: issuer and account name rows plus the hint line.
pub fn render_edit_token_form(frame: &mut Frame, area: Rect, form: &EditTokenFormState) {
    let block = Block::default().borders(Borders::ALL).title("Edit Token");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let splits = Layout::vertical([
        Constraint::Length(PREFERRED_ROW_HEIGHT),
        Constraint::Length(PREFERRED_ROW_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(1), // hint line
    ])
    .split(inner);

    render_text_field_row(frame, splits[0], &form.issuer_row);
    render_text_field_row(frame, splits[1], &form.name_row);
    frame.render_widget(
        Paragraph::new(focused_hint(&[&form.issuer_row, &form.name_row])),
        splits[3],
    );
}

/// Draws the entry form: issuer, account name, and secret rows, a status
/// line for the secret, and the hint line.
pub fn render_add_token_form(frame: &mut Frame, area: Rect, form: &AddTokenFormState) {
    let block = Block::default().borders(Borders::ALL).title("Add Token");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let splits = Layout::vertical([
        Constraint::Length(PREFERRED_ROW_HEIGHT),
        Constraint::Length(PREFERRED_ROW_HEIGHT),
        Constraint::Length(PREFERRED_ROW_HEIGHT),
        Constraint::Length(1), // secret status
        Constraint::Min(0),
        Constraint::Length(1), // hint line
    ])
    .split(inner);

    render_text_field_row(frame, splits[0], &form.issuer_row);
    render_text_field_row(frame, splits[1], &form.name_row);
    render_text_field_row(frame, splits[2], &form.secret_row);

    let status = match form.validate_secret_row() {
        Ok(message) => Span::styled(message, Style::default().add_modifier(Modifier::DIM)),
        Err(error) => Span::styled(error.to_string(), Style::default().add_modifier(Modifier::BOLD)),
    };
    frame.render_widget(Paragraph::new(status), splits[3]);

    frame.render_widget(
        Paragraph::new(focused_hint(&[
            &form.issuer_row,
            &form.name_row,
            &form.secret_row,
        ])),
        splits[5],
    );
}
