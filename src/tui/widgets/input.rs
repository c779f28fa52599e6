//! Single-line text input
//!
//! The cursor counts characters, not bytes, so currency symbols and other
//! multi-byte input edit cleanly.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// An editable line of text with a cursor
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    content: String,
    /// Cursor position in characters
    cursor: usize,
    placeholder: String,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text shown while the input is empty and unfocused
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Insert a character at the cursor
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    /// Delete the character under the cursor
    pub fn delete(&mut self) {
        if self.cursor < self.len() {
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.len());
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }

    pub fn value(&self) -> &str {
        &self.content
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// A labelled line for a dialog, with a block cursor when focused
    pub fn to_line(&self, label: &str, focused: bool) -> Line<'static> {
        let label_style = if focused {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Yellow)
        };
        let value_style = Style::default().fg(Color::White);

        let mut spans = vec![Span::styled(format!("{}: ", label), label_style)];

        if !focused {
            let (text, style) = if self.content.is_empty() {
                (self.placeholder.clone(), Style::default().fg(Color::DarkGray))
            } else {
                (self.content.clone(), value_style)
            };
            spans.push(Span::styled(text, style));
            return Line::from(spans);
        }

        let before: String = self.content.chars().take(self.cursor).collect();
        let mut rest = self.content.chars().skip(self.cursor);
        let under = rest.next().unwrap_or(' ');
        let after: String = rest.collect();

        spans.push(Span::styled(before, value_style));
        spans.push(Span::styled(
            under.to_string(),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ));
        if !after.is_empty() {
            spans.push(Span::styled(after, value_style));
        }
        Line::from(spans)
    }

    fn len(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_index(&self, chars: usize) -> usize {
        self.content
            .char_indices()
            .nth(chars)
            .map_or(self.content.len(), |(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> TextInput {
        let mut input = TextInput::new();
        text.chars().for_each(|c| input.insert(c));
        input
    }

    #[test]
    fn test_insert_and_backspace() {
        let mut input = typed("12.5");
        assert_eq!(input.value(), "12.5");
        assert_eq!(input.cursor(), 4);

        input.backspace();
        input.insert('0');
        assert_eq!(input.value(), "12.0");
    }

    #[test]
    fn test_editing_in_the_middle() {
        let mut input = typed("15");
        input.move_left();
        input.insert('2');
        assert_eq!(input.value(), "125");

        input.move_start();
        input.delete();
        assert_eq!(input.value(), "25");

        input.move_end();
        input.move_right();
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn test_multibyte_characters() {
        let mut input = typed("€5");
        input.move_start();
        input.move_right();
        input.insert('1');
        assert_eq!(input.value(), "€15");

        input.move_start();
        input.delete();
        assert_eq!(input.value(), "15");
    }

    #[test]
    fn test_line_shows_placeholder_when_unfocused() {
        let input = TextInput::new().placeholder("0.00");
        let line = input.to_line("Amount", false);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "Amount: 0.00");

        let focused = typed("7").to_line("Amount", true);
        let text: String = focused.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "Amount: 7 ");
    }
}
