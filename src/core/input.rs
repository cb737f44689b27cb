use ratatui::crossterm::event::KeyEvent;
use ratatui::style::Style;
use tui_textarea::{CursorMove, Input, TextArea};

use crate::utils::input::sanitize_text_input;

/// The draft text in the entry field.
///
/// Backed by a [`TextArea`] so the terminal UI gets cursor movement and
/// editing for free. Pasted text may span several lines; [`text`](Self::text)
/// joins them with `\n`.
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    textarea: TextArea<'static>,
    style: Style,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(style: Style) -> Self {
        let mut buffer = Self {
            textarea: TextArea::default(),
            style,
        };
        buffer.configure_textarea();
        buffer
    }

    fn configure_textarea(&mut self) {
        self.textarea.set_style(self.style);
        self.textarea.set_cursor_line_style(Style::default());
    }

    pub fn text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.text().is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.textarea.lines().len()
    }

    pub fn set_text(&mut self, text: &str) {
        let lines: Vec<String> = if text.is_empty() {
            Vec::new()
        } else {
            text.split('\n').map(str::to_string).collect()
        };
        self.textarea = TextArea::from(lines);
        self.textarea.move_cursor(CursorMove::Bottom);
        self.textarea.move_cursor(CursorMove::End);
        self.configure_textarea();
    }

    pub fn clear(&mut self) {
        self.set_text("");
    }

    /// Applies an editing key. Returns whether the text changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.textarea.input(Input::from(key))
    }

    pub fn paste(&mut self, text: &str) {
        let sanitized = sanitize_text_input(text);
        self.textarea.insert_str(sanitized);
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.textarea.cursor()
    }

    pub fn textarea(&self) -> &TextArea<'static> {
        &self.textarea
    }
}

impl From<&str> for InputBuffer {
    fn from(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.set_text(text);
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn new_buffer_is_empty() {
        let buffer = InputBuffer::new();
        assert_eq!(buffer.text(), "");
        assert!(buffer.is_empty());
    }

    #[test]
    fn whitespace_only_draft_is_not_empty() {
        let buffer = InputBuffer::from("   ");
        assert_eq!(buffer.text(), "   ");
        assert!(!buffer.is_empty());
    }

    #[test]
    fn typing_appends_characters() {
        let mut buffer = InputBuffer::new();
        for ch in "hey".chars() {
            assert!(buffer.handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE)));
        }
        assert_eq!(buffer.text(), "hey");
        assert_eq!(buffer.cursor(), (0, 3));

        buffer.handle_key(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE));
        assert_eq!(buffer.text(), "he");
    }

    #[test]
    fn set_text_places_cursor_at_end() {
        let mut buffer = InputBuffer::new();
        buffer.set_text("one\ntwo");
        assert_eq!(buffer.line_count(), 2);
        assert_eq!(buffer.cursor(), (1, 3));
        assert_eq!(buffer.text(), "one\ntwo");
    }

    #[test]
    fn clear_resets_draft() {
        let mut buffer = InputBuffer::from("hello");
        buffer.clear();
        assert_eq!(buffer.text(), "");
        assert!(buffer.is_empty());
    }

    #[test]
    fn paste_keeps_newlines_and_expands_tabs() {
        let mut buffer = InputBuffer::new();
        buffer.paste("a\tb\r\nc");
        assert_eq!(buffer.text(), "a    b\nc");
    }
}
