use serde::{Deserialize, Serialize};

use crate::model::HighlightColor;
use crate::resolve::Granularity;

/// User-tunable behavior shared by all hosts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Color preselected in the picker
    pub default_color: HighlightColor,
    /// How far a plain click expands
    pub granularity: Granularity,
    /// Show notes when hovering a highlight
    pub show_notes: bool,
    /// `tracing` filter directive used when `GLOSS_LOG` is unset
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_color: HighlightColor::Yellow,
            granularity: Granularity::Word,
            show_notes: true,
            log_filter: "gloss=info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_input_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"granularity":"phrase"}"#).unwrap();
        assert_eq!(settings.granularity, Granularity::Phrase);
        assert_eq!(settings.default_color, HighlightColor::Yellow);
        assert!(settings.show_notes);
        assert_eq!(settings.log_filter, "gloss=info");
    }
}
