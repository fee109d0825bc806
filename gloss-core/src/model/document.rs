use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Highlight, Span};
use crate::compose::{compose, marked_spans};

/// A document with highlights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filepath: Option<String>,
    pub highlights: Vec<Highlight>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    pub fn new(title: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            filename: None,
            filepath: None,
            highlights: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a document with filename metadata (used by CLI when loading from file)
    pub fn with_file_info(title: String, content: String, filepath: String, filename: String) -> Self {
        let mut doc = Self::new(title, content);
        doc.filepath = Some(filepath);
        doc.filename = Some(filename);
        doc
    }

    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }

    /// Paragraphs as rendered; offsets reset at each one
    pub fn paragraphs(&self) -> Vec<&str> {
        self.content.split('\n').collect()
    }

    pub fn paragraph(&self, index: usize) -> Option<&str> {
        self.content.split('\n').nth(index)
    }

    pub fn add_highlight(&mut self, highlight: Highlight) {
        tracing::debug!(id = %highlight.id, color = %highlight.color, "highlight added");
        self.highlights.push(highlight);
        self.updated_at = Utc::now();
    }

    pub fn remove_highlight(&mut self, id: Uuid) -> Option<Highlight> {
        let pos = self.highlights.iter().position(|h| h.id == id)?;
        tracing::debug!(%id, "highlight removed");
        self.updated_at = Utc::now();
        Some(self.highlights.remove(pos))
    }

    /// Replace the note of a highlight. A blank note clears it.
    pub fn set_note(&mut self, id: Uuid, note: &str) -> bool {
        let Some(hl) = self.highlights.iter_mut().find(|h| h.id == id) else {
            return false;
        };
        let note = note.trim();
        hl.note = (!note.is_empty()).then(|| note.to_string());
        self.updated_at = Utc::now();
        true
    }

    pub fn highlight(&self, id: Uuid) -> Option<&Highlight> {
        self.highlights.iter().find(|h| h.id == id)
    }

    /// First paragraph where the compositor actually marks the highlight,
    /// with the marked span. `None` when earlier highlights claimed every
    /// occurrence or the text is absent.
    pub fn placement_of(&self, id: Uuid) -> Option<(usize, Span)> {
        self.paragraphs()
            .iter()
            .enumerate()
            .find_map(|(index, paragraph)| {
                let segments = compose(paragraph, &self.highlights);
                marked_spans(&segments)
                    .into_iter()
                    .find(|(_, h)| h.id == id)
                    .map(|(span, _)| (index, span))
            })
    }

    pub fn paragraph_of(&self, highlight: &Highlight) -> Option<usize> {
        self.placement_of(highlight.id).map(|(index, _)| index)
    }
}
