//! Character offset index over a source document
//!
//! Spans address the document in characters (Unicode scalar values) while
//! Rust strings and regex matches work in bytes. [`Document`] keeps the
//! byte position of every character so both directions are cheap.

use std::ops::Range;

/// A source document with a char-to-byte offset table
#[derive(Debug, Clone)]
pub struct Document<'a> {
    text: &'a str,
    /// Byte offset of each char, followed by `text.len()`
    offsets: Vec<usize>,
}

impl<'a> Document<'a> {
    /// Index the given text
    pub fn new(text: &'a str) -> Self {
        let mut offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        offsets.push(text.len());
        Self { text, offsets }
    }

    /// The underlying text
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.offsets.len() - 1
    }

    /// True for empty or whitespace-only text
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Byte offset of the char at `char_pos`; `char_len()` maps to the text end
    pub fn byte_offset(&self, char_pos: usize) -> Option<usize> {
        self.offsets.get(char_pos).copied()
    }

    /// Char offset of a byte position, if it falls on a char boundary
    pub fn char_offset(&self, byte_pos: usize) -> Option<usize> {
        self.offsets.binary_search(&byte_pos).ok()
    }

    /// Convert a byte range (as produced by regex) into a char range
    pub fn char_range(&self, bytes: Range<usize>) -> Option<Range<usize>> {
        Some(self.char_offset(bytes.start)?..self.char_offset(bytes.end)?)
    }

    /// Slice by char offsets, `None` when out of range or reversed
    pub fn slice(&self, start: usize, end: usize) -> Option<&'a str> {
        if start > end {
            return None;
        }
        let from = self.byte_offset(start)?;
        let to = self.byte_offset(end)?;
        Some(&self.text[from..to])
    }

    /// The char at `char_pos`
    pub fn char_at(&self, char_pos: usize) -> Option<char> {
        let from = self.byte_offset(char_pos)?;
        self.text[from..].chars().next()
    }
}
