use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Half-open range of character offsets into a paragraph
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if this span contains the given offset
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Translate char offsets into a byte range of `text`.
    ///
    /// Offsets past the end of `text` clamp to its length.
    pub fn byte_range(&self, text: &str) -> Range<usize> {
        let to_byte = |offset: usize| {
            text.char_indices()
                .nth(offset)
                .map(|(i, _)| i)
                .unwrap_or(text.len())
        };
        to_byte(self.start)..to_byte(self.end)
    }

    /// Borrow the covered text
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.byte_range(text)]
    }
}
