//! UTF-8 safe text buffer with cursor management for editable rows.
//!
//! Every editable field in the crate shares this primitive so cursor
//! motion and editing behave identically whether the buffer backs a form
//! row or some future inline editor. Mutating edits report whether they
//! changed the buffer, which lets callers suppress redundant change
//! notifications.

use unicode_width::UnicodeWidthStr;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextInputState {
    /// The underlying text buffer.
    text: String,
    /// Cursor byte offset into `text`, always on a UTF-8 boundary.
    cursor: usize,
}

impl TextInputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Terminal columns between the start of the buffer and the cursor.
    pub fn cursor_columns(&self) -> usize {
        self.text[..self.cursor].width()
    }

    /// Replaces the buffer and moves the cursor to the end.
    pub fn set_text<S: Into<String>>(&mut self, text: S) {
        self.text = text.into();
        self.cursor = self.text.len();
    }

    /// Replaces the buffer only when `value` differs from the current text.
    ///
    /// A redundant replace must leave the cursor where the user put it;
    /// overwriting the buffer mid-edit would snap the caret to the end.
    /// Returns whether the buffer changed.
    pub fn replace_if_changed(&mut self, value: &str) -> bool {
        if self.text == value {
            return false;
        }
        self.set_text(value);
        true
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Move the cursor one Unicode scalar to the left.
    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    /// Move the cursor one Unicode scalar to the right.
    pub fn move_right(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.cursor = next;
        }
    }

    pub fn move_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_to_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Inserts a char at the cursor.
    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Removes the scalar before the cursor. Returns whether anything was
    /// removed.
    pub fn backspace(&mut self) -> bool {
        let Some(prev) = self.prev_boundary() else {
            return false;
        };
        self.text.drain(prev..self.cursor);
        self.cursor = prev;
        true
    }

    /// Removes the scalar after the cursor. Returns whether anything was
    /// removed.
    pub fn delete(&mut self) -> bool {
        let Some(next) = self.next_boundary() else {
            return false;
        };
        self.text.drain(self.cursor..next);
        true
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(index, _)| index)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.text[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_move_insert_backspace() {
        let mut state = TextInputState::new();
        state.set_text("h🙂llo"); // emoji is 4 bytes
        state.move_to_start();
        state.move_right();
        state.insert_char('e');
        assert_eq!(state.text(), "he🙂llo");
        state.move_right(); // step over 🙂
        assert!(state.backspace()); // delete 🙂
        assert_eq!(state.text(), "hello");
        assert!(state.delete());
        assert_eq!(state.text(), "helo");
    }

    #[test]
    fn backspace_at_start_is_a_no_op() {
        let mut state = TextInputState::new();
        state.set_text("abc");
        state.move_to_start();
        assert!(!state.backspace());
        assert_eq!(state.text(), "abc");
    }

    #[test]
    fn redundant_replace_keeps_the_cursor() {
        let mut state = TextInputState::new();
        state.set_text("123456");
        state.move_left();
        state.move_left();
        let cursor = state.cursor();

        assert!(!state.replace_if_changed("123456"));
        assert_eq!(state.cursor(), cursor);

        assert!(state.replace_if_changed("654321"));
        assert_eq!(state.cursor(), state.text().len());
    }

    #[test]
    fn cursor_columns_count_wide_glyphs() {
        let mut state = TextInputState::new();
        state.set_text("字ab");
        state.move_to_start();
        state.move_right(); // past the double-width glyph
        assert_eq!(state.cursor_columns(), 2);
    }
}
