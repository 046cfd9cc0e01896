//! Editable single-buffer text with a character cursor.

/// Text buffer backing every form field.
///
/// The cursor is counted in characters, not bytes, so multi-byte input
/// (for example `…` or `×` in a word problem) never splits a code point.
///
/// # Examples
///
/// ```
/// use math2visual::domain::TextInput;
///
/// let mut input = TextInput::new("9+7");
/// input.insert('=');
/// assert_eq!(input.value(), "9+7=");
/// input.backspace();
/// assert_eq!(input.value(), "9+7");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    /// Creates a buffer holding `value` with the cursor at the end.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Cursor position in characters from the start of the buffer.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len_chars(&self) -> usize {
        self.value.chars().count()
    }

    /// True when the buffer is empty or contains only whitespace.
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// Replaces the whole buffer and moves the cursor to the end.
    pub fn set(&mut self, value: impl Into<String>) {
        *self = Self::new(value);
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let at = self.byte_index(self.cursor - 1);
            self.value.remove(at);
            self.cursor -= 1;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.len_chars() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.len_chars() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len_chars();
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_places_cursor_at_end() {
        let input = TextInput::new("apples");
        assert_eq!(input.cursor(), 6);
    }

    #[test]
    fn test_insert_in_middle() {
        let mut input = TextInput::new("9+16");
        input.move_home();
        input.move_right();
        input.move_right();
        input.insert('7');
        input.insert('=');
        assert_eq!(input.value(), "9+7=16");
        assert_eq!(input.cursor(), 4);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = TextInput::new("3×4");
        input.move_left();
        input.backspace();
        assert_eq!(input.value(), "34");
        input.insert('·');
        assert_eq!(input.value(), "3·4");
        input.delete();
        assert_eq!(input.value(), "3·");
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut input = TextInput::new("x");
        input.move_home();
        input.backspace();
        assert_eq!(input.value(), "x");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_delete_at_end_is_noop() {
        let mut input = TextInput::new("x");
        input.delete();
        assert_eq!(input.value(), "x");
    }

    #[test]
    fn test_blank_detection() {
        assert!(TextInput::default().is_blank());
        assert!(TextInput::new(" \t\n").is_blank());
        assert!(!TextInput::new(" a ").is_blank());
    }

    #[test]
    fn test_set_resets_cursor() {
        let mut input = TextInput::new("old");
        input.move_home();
        input.set("newer");
        assert_eq!(input.value(), "newer");
        assert_eq!(input.cursor(), 5);
    }
}
