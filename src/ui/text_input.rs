//! Single-line name entry with a blinking cursor

use macroquad::prelude::*;
use crate::storage::MAX_NAME_LEN;

/// State for the run-complete name field
#[derive(Debug, Clone, Default)]
pub struct TextInputState {
    /// The text content
    pub text: String,
    /// Blink timer for cursor
    pub blink_timer: f32,
}

impl TextInputState {
    pub fn new(text: impl Into<String>) -> Self {
        let mut state = Self::default();
        for ch in text.into().chars() {
            state.insert_char(ch);
        }
        state
    }

    /// Append a printable character; ignored once the name is full
    pub fn insert_char(&mut self, ch: char) -> bool {
        if ch.is_control() || self.text.chars().count() >= MAX_NAME_LEN {
            return false;
        }
        if ch == ' ' && self.text.is_empty() {
            return false;
        }
        self.text.push(ch);
        true
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    pub fn cursor_visible(&self) -> bool {
        self.blink_timer % 1.0 < 0.5
    }

    /// Consume this frame's typed characters and backspace.
    /// Returns true when Enter confirms the entry.
    pub fn handle_keys(&mut self, dt: f32) -> bool {
        self.blink_timer += dt;

        if is_key_pressed(KeyCode::Backspace) {
            self.backspace();
        }
        while let Some(ch) = get_char_pressed() {
            self.insert_char(ch);
        }
        is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::KpEnter)
    }

    /// Text plus cursor glyph, for drawing
    pub fn display(&self) -> String {
        if self.cursor_visible() && self.text.chars().count() < MAX_NAME_LEN {
            format!("{}_", self.text)
        } else {
            self.text.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_capped() {
        let mut input = TextInputState::new("abcdefghijkl");
        assert_eq!(input.text.len(), MAX_NAME_LEN);
        assert!(!input.insert_char('z'));
        input.backspace();
        assert!(input.insert_char('z'));
        assert_eq!(input.text, "abcdefghijkz");
    }

    #[test]
    fn test_control_and_leading_space_ignored() {
        let mut input = TextInputState::default();
        assert!(!input.insert_char('\r'));
        assert!(!input.insert_char(' '));
        assert!(input.insert_char('a'));
        assert!(input.insert_char(' '));
        assert_eq!(input.text, "a ");
    }

    #[test]
    fn test_cursor_blinks() {
        let mut input = TextInputState::new("ab");
        assert_eq!(input.display(), "ab_");
        input.blink_timer = 0.75;
        assert_eq!(input.display(), "ab");
    }
}
