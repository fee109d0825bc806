//! File I/O for native CLI

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use gloss_core::Document;

/// Load a text file and create a Document
pub fn load_file(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    let canonical = path
        .canonicalize()
        .with_context(|| format!("Failed to resolve path: {}", path.display()))?;

    let content = fs::read_to_string(&canonical)
        .with_context(|| format!("Failed to read file: {}", canonical.display()))?;
    // Paragraph offsets are per line; CRLF files would leave a stray '\r'
    let content = content.replace("\r\n", "\n");

    let filepath = canonical.to_string_lossy().to_string();
    let filename = canonical
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let title = canonical
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "Untitled".to_string());

    tracing::info!(path = %canonical.display(), bytes = content.len(), "file loaded");
    Ok(Document::with_file_info(title, content, filepath, filename))
}

/// Create `dir` if needed and return it
pub fn ensure_dir(dir: &Path) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    Ok(dir.to_path_buf())
}

fn export_path(doc: &Document, data_dir: &Path, extension: &str) -> Result<PathBuf> {
    let dir = ensure_dir(data_dir)?;
    let stem: String = doc
        .title
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    Ok(dir.join(format!("{}.highlights.{}", stem, extension)))
}

/// Export document and highlights as JSON into the data dir
pub fn export_document(doc: &Document, data_dir: &Path) -> Result<PathBuf> {
    let path = export_path(doc, data_dir, "json")?;

    let json = gloss_core::to_json(doc).context("Failed to serialize document")?;

    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), highlights = doc.highlights.len(), "document exported");
    Ok(path)
}

/// Write the Markdown highlight summary into the data dir
pub fn export_summary(doc: &Document, data_dir: &Path) -> Result<PathBuf> {
    let path = export_path(doc, data_dir, "md")?;

    fs::write(&path, gloss_core::render_summary(doc))
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), "summary exported");
    Ok(path)
}
