//! Text chunking for bounded-length labeling
//!
//! Long documents are cut into contiguous pieces of at most `max_length`
//! chars, preferring to cut right after a sentence terminator. Chunks never
//! overlap and concatenate back to the original text.

use crate::{
    document::Document,
    error::{PipelineError, Result},
};

/// Sentence terminators used when no others are configured
pub const DEFAULT_TERMINATORS: [char; 3] = ['.', '!', '?'];

/// A chunk of text with its position in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextChunk<'a> {
    /// The text content
    pub text: &'a str,
    /// Char offset in the original text
    pub start: usize,
    /// Length in chars
    pub len: usize,
}

impl TextChunk<'_> {
    /// Char offset one past the chunk's last char
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Splits documents into chunks at sentence-like boundaries
#[derive(Debug, Clone)]
pub struct ChunkManager {
    max_length: usize,
    terminators: Vec<char>,
}

impl ChunkManager {
    /// Create a chunk manager with the default terminators
    pub fn new(max_length: usize) -> Result<Self> {
        Self::with_terminators(max_length, DEFAULT_TERMINATORS.to_vec())
    }

    /// Create a chunk manager with a custom terminator set
    pub fn with_terminators(max_length: usize, terminators: Vec<char>) -> Result<Self> {
        if max_length == 0 {
            return Err(PipelineError::InvalidConfig(
                "max_length must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            max_length,
            terminators,
        })
    }

    /// Maximum chunk length in chars
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Chunk a document; an empty document yields no chunks
    pub fn chunk_text<'a>(&self, doc: &Document<'a>) -> Vec<TextChunk<'a>> {
        let total = doc.char_len();
        let mut chunks = Vec::new();
        let mut start = 0;

        while start < total {
            let mut end = (start + self.max_length).min(total);

            if end < total {
                if let Some(terminator) = self.last_terminator(doc, start, end) {
                    end = terminator + 1;
                }
            }

            chunks.push(TextChunk {
                text: doc.slice(start, end).unwrap_or_default(),
                start,
                len: end - start,
            });

            start = end;
        }

        tracing::trace!(chunks = chunks.len(), total_chars = total, "chunked document");
        chunks
    }

    /// Nearest terminator in `(start, end)`; one at `start` itself would
    /// produce an empty chunk and is not eligible
    fn last_terminator(&self, doc: &Document<'_>, start: usize, end: usize) -> Option<usize> {
        (start + 1..end)
            .rev()
            .find(|&pos| doc.char_at(pos).is_some_and(|ch| self.is_terminator(ch)))
    }

    fn is_terminator(&self, ch: char) -> bool {
        self.terminators.contains(&ch)
    }
}

/// Split `text` into chunks of at most `max_length` chars
pub fn split(text: &str, max_length: usize) -> Result<Vec<&str>> {
    let manager = ChunkManager::new(max_length)?;
    let doc = Document::new(text);
    Ok(manager.chunk_text(&doc).into_iter().map(|c| c.text).collect())
}
