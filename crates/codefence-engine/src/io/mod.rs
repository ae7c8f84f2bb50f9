use crate::editing::Document;
use crate::settings::EditorSettings;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read a plain-text file as paragraphs, one per line.
///
/// A trailing newline does not add an empty paragraph; CRLF endings are
/// accepted.
pub fn read_paragraphs(path: &Path) -> Result<Vec<String>, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    Ok(content.lines().map(str::to_string).collect())
}

/// Load a plain-text file into a new document
pub fn read_document(path: &Path, settings: EditorSettings) -> Result<Document, IoError> {
    let paragraphs = read_paragraphs(path)?;
    log::info!(
        "Loaded {} paragraphs from {}",
        paragraphs.len(),
        path.display()
    );
    Ok(Document::from_paragraphs(paragraphs, settings))
}
