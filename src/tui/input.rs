//! Text input handling for the terminal user interface.

/// A single-line text input with a cursor. Focus is tracked by whichever
/// form owns the field, not by the field itself.
#[derive(Clone, Default)]
pub struct InputField {
    pub value: String,
    pub cursor: usize,
}

impl InputField {
    /// Create an empty input field.
    pub fn new() -> Self {
        InputField::default()
    }

    /// Create an input field pre-filled with `value`, cursor at the end.
    pub fn with_value(value: &str) -> Self {
        InputField {
            value: value.to_string(),
            cursor: value.len(),
        }
    }

    /// Insert a character at the cursor.
    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = prev_boundary(&self.value, self.cursor);
            self.value.remove(prev);
            self.cursor = prev;
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = prev_boundary(&self.value, self.cursor);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor = next_boundary(&self.value, self.cursor);
        }
    }

    /// Empty the field and reset the cursor.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

fn prev_boundary(s: &str, from: usize) -> usize {
    let mut i = from - 1;
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn next_boundary(s: &str, from: usize) -> usize {
    let mut i = from + 1;
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_backspace_respect_multibyte_chars() {
        let mut field = InputField::new();
        field.insert('å');
        field.insert('b');
        assert_eq!(field.value, "åb");

        field.move_left();
        field.backspace();
        assert_eq!(field.value, "b");
        assert_eq!(field.cursor, 0);
    }
}
