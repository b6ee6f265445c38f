//! Terminal-agnostic keyboard input and line editing.

/// Keyboard input abstraction.
///
/// Decouples application logic from terminal libraries (crossterm, termion,
/// etc.) enabling deterministic simulation testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character.
    Char(char),
    /// Character typed with Ctrl held (lowercase).
    Ctrl(char),
    /// Enter/Return key.
    Enter,
    /// Backspace key (delete character before cursor).
    Backspace,
    /// Delete key (delete character at cursor).
    Delete,
    /// Tab key (switch focus).
    Tab,
    /// Escape key (quit).
    Esc,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Page Up key.
    PageUp,
    /// Page Down key.
    PageDown,
    /// Home key (cursor to start).
    Home,
    /// End key (cursor to end).
    End,
}

/// Single-line text buffer with a cursor.
///
/// The cursor counts characters, not bytes, so multi-byte input such as
/// emoji edits correctly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    buffer: String,
    cursor: usize,
}

impl TextInput {
    /// Create an empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Apply an editing key. Returns `true` if the key was an editing key.
    ///
    /// Non-editing keys (Enter, Tab, arrows other than Left/Right, ...) are
    /// left for the caller.
    pub fn edit(&mut self, key: KeyInput) -> bool {
        match key {
            KeyInput::Char(c) => {
                let at = self.byte_offset(self.cursor);
                self.buffer.insert(at, c);
                self.cursor = self.cursor.saturating_add(1);
            },
            KeyInput::Backspace => {
                if self.cursor > 0 {
                    self.cursor = self.cursor.saturating_sub(1);
                    let at = self.byte_offset(self.cursor);
                    self.buffer.remove(at);
                }
            },
            KeyInput::Delete => {
                if self.cursor < self.len() {
                    let at = self.byte_offset(self.cursor);
                    self.buffer.remove(at);
                }
            },
            KeyInput::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyInput::Right => {
                if self.cursor < self.len() {
                    self.cursor = self.cursor.saturating_add(1);
                }
            },
            KeyInput::Home => self.cursor = 0,
            KeyInput::End => self.cursor = self.len(),
            _ => return false,
        }
        true
    }

    /// Take the text out, leaving the input empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.buffer)
    }

    fn len(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.buffer.char_indices().nth(chars).map_or(self.buffer.len(), |(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> TextInput {
        let mut input = TextInput::new();
        for c in text.chars() {
            input.edit(KeyInput::Char(c));
        }
        input
    }

    #[test]
    fn char_input_adds_to_buffer() {
        let input = typed("hi");

        assert_eq!(input.text(), "hi");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn backspace_removes_char() {
        let mut input = typed("ab");
        input.edit(KeyInput::Backspace);

        assert_eq!(input.text(), "a");
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn cursor_movement() {
        let mut input = typed("abc");

        input.edit(KeyInput::Home);
        assert_eq!(input.cursor(), 0);

        input.edit(KeyInput::End);
        assert_eq!(input.cursor(), 3);

        input.edit(KeyInput::Left);
        assert_eq!(input.cursor(), 2);

        input.edit(KeyInput::Right);
        input.edit(KeyInput::Right);
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn multibyte_edits_by_character() {
        let mut input = typed("a👍b");
        input.edit(KeyInput::Left);
        input.edit(KeyInput::Backspace);

        assert_eq!(input.text(), "ab");
        assert_eq!(input.cursor(), 1);

        input.edit(KeyInput::Char('é'));
        input.edit(KeyInput::Delete);
        assert_eq!(input.text(), "aé");
    }

    #[test]
    fn take_clears() {
        let mut input = typed("test");
        assert_eq!(input.take(), "test");
        assert!(input.is_empty());
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn non_editing_keys_are_passed_through() {
        let mut input = typed("x");
        assert!(!input.edit(KeyInput::Enter));
        assert!(!input.edit(KeyInput::Tab));
        assert!(!input.edit(KeyInput::Up));
        assert_eq!(input.text(), "x");
    }
}
