//! Click-to-span resolution
//!
//! A click lands on a char offset inside a paragraph; the resolver grows it
//! into the surrounding token using a punctuation/whitespace classifier.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GlossError;
use crate::model::Span;

/// Punctuation that ends a word when scanning
const WORD_BOUNDARY: &[char] = &[
    '.', ',', '!', '?', ';', ':', '(', ')', '[', ']', '{', '}', '=', '+', '-', '*', '/',
];

/// Punctuation that ends a phrase and is kept in it
const TERMINAL: &[char] = &['.', '!', '?', ';'];

/// How far a click expands to the right
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Stop at whitespace or any boundary punctuation
    #[default]
    Word,
    /// Run to the end of the sentence, terminator included
    Phrase,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Word => "word",
            Granularity::Phrase => "phrase",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = GlossError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "word" => Ok(Granularity::Word),
            "phrase" => Ok(Granularity::Phrase),
            _ => Err(GlossError::UnknownGranularity(s.to_string())),
        }
    }
}

/// A resolved span and the text it covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub span: Span,
    pub text: String,
}

fn is_word_boundary(c: char) -> bool {
    c.is_whitespace() || WORD_BOUNDARY.contains(&c)
}

fn is_phrase_stop(c: char) -> bool {
    c == '\n' || TERMINAL.contains(&c)
}

/// Resolve a click at `click_offset` to the word under it
pub fn resolve(paragraph: &str, click_offset: usize) -> Option<Resolution> {
    resolve_with(paragraph, click_offset, Granularity::Word)
}

/// Resolve a click at `click_offset` with the given right-hand granularity.
///
/// Returns `None` when the trimmed candidate is a single char or less, or
/// when the offset lies past the end of the paragraph.
pub fn resolve_with(
    paragraph: &str,
    click_offset: usize,
    granularity: Granularity,
) -> Option<Resolution> {
    let chars: Vec<char> = paragraph.chars().collect();
    if click_offset > chars.len() {
        return None;
    }

    let mut start = click_offset;
    while start > 0 && !is_word_boundary(chars[start - 1]) {
        start -= 1;
    }

    let mut end = click_offset;
    match granularity {
        Granularity::Word => {
            while end < chars.len() && !is_word_boundary(chars[end]) {
                end += 1;
            }
        }
        Granularity::Phrase => {
            while end < chars.len() && !is_phrase_stop(chars[end]) {
                end += 1;
            }
            if end < chars.len() && TERMINAL.contains(&chars[end]) {
                end += 1;
            }
        }
    }

    while start < end && chars[start].is_whitespace() {
        start += 1;
    }
    while end > start && chars[end - 1].is_whitespace() {
        end -= 1;
    }

    if end - start <= 1 {
        return None;
    }

    Some(Resolution {
        span: Span::new(start, end),
        text: chars[start..end].iter().collect(),
    })
}
