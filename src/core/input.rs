//! # Input Buffer
//!
//! The text being composed, plus a byte-offset cursor that always sits on a
//! char boundary. Editing is expressed as [`InputEdit`] values so the reducer
//! can decide whether an edit is allowed (it isn't while a reply is pending).

/// A single editing operation on the input buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEdit {
    Insert(char),
    Paste(String),
    /// Literal line break (Shift+Enter / Ctrl+J), never a submission.
    Newline,
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
    cursor: usize,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Cursor position as a byte offset in `0..=len`.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The buffer with surrounding whitespace removed, or `None` if nothing remains.
    pub fn trimmed(&self) -> Option<&str> {
        let trimmed = self.text.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Applies an edit. Returns `true` if the buffer or cursor changed.
    pub fn apply(&mut self, edit: InputEdit) -> bool {
        match edit {
            InputEdit::Insert(c) => {
                self.insert_char(c);
                true
            }
            InputEdit::Newline => {
                self.insert_char('\n');
                true
            }
            InputEdit::Paste(text) => {
                if text.is_empty() {
                    return false;
                }
                self.insert_str(&text);
                true
            }
            InputEdit::Backspace => self.backspace(),
            InputEdit::Delete => self.delete(),
            InputEdit::Left => self.move_left(),
            InputEdit::Right => self.move_right(),
            InputEdit::Home => self.move_home(),
            InputEdit::End => self.move_end(),
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn insert_str(&mut self, s: &str) {
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = prev_char_boundary(&self.text, self.cursor);
        self.text.drain(prev..self.cursor);
        self.cursor = prev;
        true
    }

    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.text.len() {
            return false;
        }
        let next = next_char_boundary(&self.text, self.cursor);
        self.text.drain(self.cursor..next);
        true
    }

    pub fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor = prev_char_boundary(&self.text, self.cursor);
        true
    }

    pub fn move_right(&mut self) -> bool {
        if self.cursor >= self.text.len() {
            return false;
        }
        self.cursor = next_char_boundary(&self.text, self.cursor);
        true
    }

    /// Moves to the start of the current line.
    pub fn move_home(&mut self) -> bool {
        let line_start = self.text[..self.cursor]
            .rfind('\n')
            .map(|i| i + 1)
            .unwrap_or(0);
        let moved = self.cursor != line_start;
        self.cursor = line_start;
        moved
    }

    /// Moves to the end of the current line.
    pub fn move_end(&mut self) -> bool {
        let line_end = self.text[self.cursor..]
            .find('\n')
            .map(|i| self.cursor + i)
            .unwrap_or(self.text.len());
        let moved = self.cursor != line_end;
        self.cursor = line_end;
        moved
    }
}

/// Byte offset of the char boundary before `pos`.
pub(crate) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset of the char boundary after `pos`.
pub(crate) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}
