use serde::Serialize;

use crate::error::Result;
use crate::model::{Document, Highlight, HighlightColor};

/// Export format shared by the CLI and web builds
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub filepath: Option<String>,
    pub filename: Option<String>,
    pub title: String,
    pub content: String,
    pub word_count: usize,
    pub highlights: Vec<ExportHighlight>,
    pub summary: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportHighlight {
    pub id: String,
    pub text: String,
    pub color: String,
    pub note: Option<String>,
    /// First paragraph where the highlight is rendered, if any
    pub paragraph: Option<usize>,
    pub created_at: String,
}

impl ExportHighlight {
    fn new(doc: &Document, hl: &Highlight) -> Self {
        Self {
            id: hl.id.to_string(),
            text: hl.text.clone(),
            color: hl.color.as_str().to_string(),
            note: hl.visible_note().map(String::from),
            paragraph: doc.paragraph_of(hl),
            created_at: hl.created_at.to_rfc3339(),
        }
    }
}

impl From<&Document> for ExportDocument {
    fn from(doc: &Document) -> Self {
        Self {
            filepath: doc.filepath.clone(),
            filename: doc.filename.clone(),
            title: doc.title.clone(),
            content: doc.content.clone(),
            word_count: doc.word_count(),
            highlights: doc
                .highlights
                .iter()
                .map(|hl| ExportHighlight::new(doc, hl))
                .collect(),
            summary: render_summary(doc),
        }
    }
}

/// Serialize a document in export format
pub fn to_json(doc: &Document) -> Result<String> {
    Ok(serde_json::to_string_pretty(&ExportDocument::from(doc))?)
}

/// Markdown digest of a document's highlights, grouped by color
pub fn render_summary(doc: &Document) -> String {
    let mut out = String::new();

    out.push_str(&format!("## Highlights: {}\n\n", doc.title));

    if doc.highlights.is_empty() {
        out.push_str("No highlights yet.\n");
        return out;
    }

    out.push_str(&format!("{} highlights\n\n", doc.highlights.len()));

    for color in HighlightColor::all() {
        let items: Vec<_> = doc.highlights.iter().filter(|h| h.color == *color).collect();

        if items.is_empty() {
            continue;
        }

        out.push_str(&format!("### {} ({})\n\n", color.label(), items.len()));

        for hl in items {
            out.push_str(&format!("> {}\n", hl.text.replace('\n', "\n> ")));
            if let Some(note) = hl.visible_note() {
                out.push_str(&format!("\n- Note: {}\n", note));
            }
            out.push('\n');
        }
    }

    out
}
