use ropey::Rope;

/// Cursor position as the renderer sees it: a line and a character column.
///
/// Derived from the buffer's rope position on demand; the buffer itself
/// does not store lines and columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column in characters.
    pub col: usize,
}

impl Cursor {
    /// A cursor at a specific position.
    pub const fn at(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A rope-backed text buffer for the editor pane.
///
/// The cursor is a single character index into the rope. Every edit is an
/// insert or removal at that index, so deleting across a line boundary is
/// the same one-character removal as any other and multibyte characters
/// need no byte arithmetic; the line/column view is derived when asked
/// for. The sticky column for vertical movement is the only extra state.
pub struct EditorBuffer {
    rope: Rope,
    /// Cursor as a character index into the rope, `0..=len_chars`.
    cursor: usize,
    /// Remembered column for vertical movement (sticky column).
    col_memory: usize,
}

impl EditorBuffer {
    /// Create a buffer holding the given text, cursor at the start.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: 0,
            col_memory: 0,
        }
    }

    /// The cursor as a line/column pair.
    pub fn cursor(&self) -> Cursor {
        let line = self.rope.char_to_line(self.cursor);
        Cursor {
            line,
            col: self.cursor - self.rope.line_to_char(line),
        }
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// The content of a line without its trailing newline.
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(line_idx).to_string();
        Some(
            line.trim_end_matches('\n')
                .trim_end_matches('\r')
                .to_string(),
        )
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Replace the entire buffer content and move the cursor to the start.
    ///
    /// Used by reset-to-default and file seeding.
    pub fn replace_all(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.cursor = 0;
        self.col_memory = 0;
    }

    /// Insert a character at the cursor position.
    pub fn insert_char(&mut self, ch: char) {
        self.rope.insert_char(self.cursor, ch);
        self.cursor += 1;
        self.remember_col();
    }

    /// Split the line at the cursor (Enter key).
    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    /// Delete the character before the cursor (Backspace).
    ///
    /// At column 0 the removed character is the previous line's newline,
    /// which joins the lines. Returns `true` if anything was deleted.
    pub fn delete_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.rope.remove(self.cursor - 1..self.cursor);
        self.cursor -= 1;
        self.remember_col();
        true
    }

    /// Delete the character at the cursor (Delete key).
    ///
    /// At end of line the removed character is this line's newline, which
    /// joins the lines. Returns `true` if anything was deleted.
    pub fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.rope.len_chars() {
            return false;
        }
        self.rope.remove(self.cursor..self.cursor + 1);
        true
    }

    /// Move the cursor one step in the given direction.
    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                self.remember_col();
            }
            Direction::Right => {
                self.cursor = (self.cursor + 1).min(self.rope.len_chars());
                self.remember_col();
            }
            Direction::Up => self.move_vertical(true),
            Direction::Down => self.move_vertical(false),
        }
    }

    /// Move cursor to the beginning of the line (Home).
    pub fn move_home(&mut self) {
        let line = self.rope.char_to_line(self.cursor);
        self.cursor = self.rope.line_to_char(line);
        self.remember_col();
    }

    /// Move cursor to the end of the line (End).
    pub fn move_end(&mut self) {
        let line = self.rope.char_to_line(self.cursor);
        self.cursor = self.rope.line_to_char(line) + self.line_cols(line);
        self.remember_col();
    }

    /// Move cursor to the start of the previous word (Ctrl+Left).
    pub fn move_word_left(&mut self) {
        let mut idx = self.cursor;
        while idx > 0 && !is_word_char(self.rope.char(idx - 1)) {
            idx -= 1;
        }
        while idx > 0 && is_word_char(self.rope.char(idx - 1)) {
            idx -= 1;
        }
        self.cursor = idx;
        self.remember_col();
    }

    /// Move cursor to the start of the next word (Ctrl+Right).
    pub fn move_word_right(&mut self) {
        let len = self.rope.len_chars();
        let mut idx = self.cursor;
        while idx < len && is_word_char(self.rope.char(idx)) {
            idx += 1;
        }
        while idx < len && !is_word_char(self.rope.char(idx)) {
            idx += 1;
        }
        self.cursor = idx;
        self.remember_col();
    }

    /// Move cursor to a specific line and character column, clamped to the
    /// buffer.
    pub fn move_to(&mut self, line: usize, col: usize) {
        let line = line.min(self.rope.len_lines().saturating_sub(1));
        self.cursor = self.rope.line_to_char(line) + col.min(self.line_cols(line));
        self.remember_col();
    }

    /// Move cursor to the start of the buffer (Ctrl+Home).
    pub fn move_to_start(&mut self) {
        self.cursor = 0;
        self.remember_col();
    }

    /// Move cursor to the end of the buffer (Ctrl+End).
    pub fn move_to_end(&mut self) {
        self.cursor = self.rope.len_chars();
        self.remember_col();
    }

    // --- Private helpers ---

    /// Character count of a line, excluding its line break.
    fn line_cols(&self, line: usize) -> usize {
        let slice = self.rope.line(line);
        let mut cols = slice.len_chars();
        if cols > 0 && slice.char(cols - 1) == '\n' {
            cols -= 1;
        }
        if cols > 0 && slice.char(cols - 1) == '\r' {
            cols -= 1;
        }
        cols
    }

    /// Step one line up or down, landing on the sticky column.
    fn move_vertical(&mut self, up: bool) {
        let line = self.rope.char_to_line(self.cursor);
        let target = if up {
            let Some(prev) = line.checked_sub(1) else {
                return;
            };
            prev
        } else {
            if line + 1 >= self.rope.len_lines() {
                return;
            }
            line + 1
        };
        let col = self.col_memory.min(self.line_cols(target));
        self.cursor = self.rope.line_to_char(target) + col;
        // col_memory stays put so a later longer line restores it.
    }

    fn remember_col(&mut self) {
        self.col_memory = self.cursor().col;
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field("lines", &self.rope.len_lines())
            .field("cursor", &self.cursor())
            .finish()
    }
}
