use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::GlossError;

/// Display color tag of a highlight
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum HighlightColor {
    #[default]
    Yellow,
    Green,
    Blue,
    Pink,
    Purple,
}

impl HighlightColor {
    pub fn all() -> &'static [HighlightColor] {
        &[
            HighlightColor::Yellow,
            HighlightColor::Green,
            HighlightColor::Blue,
            HighlightColor::Pink,
            HighlightColor::Purple,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HighlightColor::Yellow => "yellow",
            HighlightColor::Green => "green",
            HighlightColor::Blue => "blue",
            HighlightColor::Pink => "pink",
            HighlightColor::Purple => "purple",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HighlightColor::Yellow => "Yellow",
            HighlightColor::Green => "Green",
            HighlightColor::Blue => "Blue",
            HighlightColor::Pink => "Pink",
            HighlightColor::Purple => "Purple",
        }
    }
}

impl fmt::Display for HighlightColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HighlightColor {
    type Err = GlossError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        HighlightColor::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == tag)
            .ok_or_else(|| GlossError::UnknownColor(s.to_string()))
    }
}

/// A saved highlight.
///
/// Placement is by literal text match against the paragraph, never by stored
/// offsets. `id` only lets the host pick out one record for deletion or
/// editing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub id: Uuid,
    pub text: String,
    pub color: HighlightColor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Highlight {
    pub fn new(text: impl Into<String>, color: HighlightColor) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            color,
            note: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Note text if present and not blank
    pub fn visible_note(&self) -> Option<&str> {
        self.note
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parse() {
        assert_eq!("Pink".parse::<HighlightColor>().unwrap(), HighlightColor::Pink);
        assert_eq!(" blue ".parse::<HighlightColor>().unwrap(), HighlightColor::Blue);
        assert!(matches!(
            "teal".parse::<HighlightColor>(),
            Err(GlossError::UnknownColor(tag)) if tag == "teal"
        ));
    }

    #[test]
    fn test_visible_note_skips_blank() {
        let plain = Highlight::new("cat", HighlightColor::Yellow);
        assert_eq!(plain.visible_note(), None);

        let blank = plain.clone().with_note("   ");
        assert_eq!(blank.visible_note(), None);

        let noted = plain.with_note(" feline ");
        assert_eq!(noted.visible_note(), Some("feline"));
    }

    #[test]
    fn test_highlight_json_shape() {
        let hl = Highlight::new("quick", HighlightColor::Green);
        let json = serde_json::to_string(&hl).unwrap();

        assert!(json.contains("\"color\":\"green\""));
        assert!(json.contains("\"createdAt\""));
        assert!(!json.contains("\"note\""));
    }
}
