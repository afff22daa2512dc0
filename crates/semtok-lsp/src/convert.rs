//! UTF-16 column conversion.
//!
//! LSP semantic token columns and lengths are UTF-16 code units, while `LineIndex` and
//! the overlay ranges work in characters. These helpers convert between the two within a
//! single line. Unlike plain clamping, out-of-range input yields `None` here: a column
//! past the end of the line means the response was computed against a different document
//! snapshot, and the caller skips that token.

use semtok_core::{LineIndex, OffsetLookup};

/// UTF-16 code unit count of a string.
pub fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

/// Convert a character offset into a UTF-16 code unit offset.
pub fn char_offset_to_utf16(text: &str, char_offset: usize) -> usize {
    text.chars().take(char_offset).map(char::len_utf16).sum()
}

/// Convert a UTF-16 code unit offset into a character offset.
///
/// Returns `None` when the offset is past the end of `text` or lands inside a
/// surrogate pair.
pub fn utf16_to_char_offset(text: &str, utf16_offset: usize) -> Option<usize> {
    let mut utf16 = 0usize;
    let mut chars = 0usize;

    for ch in text.chars() {
        if utf16 == utf16_offset {
            return Some(chars);
        }
        utf16 += ch.len_utf16();
        chars += 1;
        if utf16 > utf16_offset {
            // Inside a surrogate pair.
            return None;
        }
    }

    (utf16 == utf16_offset).then_some(chars)
}

/// [`OffsetLookup`] over a [`LineIndex`] taking UTF-16 wire columns.
///
/// This is the line/column→offset collaborator handed to the bucketer when the token
/// stream comes straight off the LSP wire.
pub struct DocumentOffsets<'a> {
    line_index: &'a LineIndex,
}

impl<'a> DocumentOffsets<'a> {
    /// Wrap a document snapshot.
    pub fn new(line_index: &'a LineIndex) -> Self {
        Self { line_index }
    }
}

impl OffsetLookup for DocumentOffsets<'_> {
    fn char_offset(&self, line: usize, column: usize) -> Option<usize> {
        let line_text = self.line_index.get_line_text(line)?;
        let char_col = utf16_to_char_offset(&line_text, column)?;
        Some(self.line_index.position_to_char_offset(line, char_col))
    }
}
