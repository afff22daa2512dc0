//! Logical line index over a document snapshot.
//!
//! Backed by a Rope for O(log N) line access. The index is a read-only snapshot of the
//! document text at the moment a highlight pass runs; the editor owns the live buffer.

use ropey::Rope;

/// Line index - rope-backed line/column ↔ char-offset conversion.
pub struct LineIndex {
    rope: Rope,
}

impl LineIndex {
    /// Create an empty line index.
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Build a line index from a document snapshot.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Total line count.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Total character count.
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Get the text of the specified line, excluding the trailing newline.
    ///
    /// Returns `None` when `line_number` is past the last line.
    pub fn get_line_text(&self, line_number: usize) -> Option<String> {
        if line_number >= self.rope.len_lines() {
            return None;
        }

        let mut text = self.rope.line(line_number).to_string();
        if text.ends_with('\n') {
            text.pop();
        }
        if text.ends_with('\r') {
            text.pop();
        }

        Some(text)
    }

    /// Character count of the specified line, excluding the trailing newline.
    pub fn line_char_len(&self, line_number: usize) -> Option<usize> {
        self.get_line_text(line_number)
            .map(|text| text.chars().count())
    }

    /// Get the character offset for a (line, column) position.
    ///
    /// `column` is a character offset within the line and is clamped to the line length.
    pub fn position_to_char_offset(&self, line: usize, column: usize) -> usize {
        if line >= self.rope.len_lines() {
            return self.rope.len_chars();
        }

        let line_start_char = self.rope.line_to_char(line);
        let line_len = if line + 1 < self.rope.len_lines() {
            // -1 for the newline
            self.rope.line_to_char(line + 1) - line_start_char - 1
        } else {
            self.rope.len_chars() - line_start_char
        };

        line_start_char + column.min(line_len)
    }

    /// Get (line, column-within-line) for a character offset.
    pub fn char_offset_to_position(&self, char_offset: usize) -> (usize, usize) {
        let char_offset = char_offset.min(self.rope.len_chars());

        let line_idx = self.rope.char_to_line(char_offset);
        let line_start_char = self.rope.line_to_char(line_idx);

        (line_idx, char_offset - line_start_char)
    }

    /// Get the complete snapshot text.
    pub fn get_text(&self) -> String {
        self.rope.to_string()
    }
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new()
    }
}
