//! Saved page loading
//!
//! Reads one markup snapshot from disk and parses it into a `scraper` tree
//! before any extraction starts.

use crate::infrastructure::parsing_error::{ParsingError, ParsingResult};
use scraper::Html;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

/// A parsed document and where it was read from
#[derive(Debug)]
pub struct LoadedDocument {
    pub path: PathBuf,
    pub html: Html,
    pub bytes: usize,
}

/// Reads saved category pages
pub struct DocumentLoader;

impl DocumentLoader {
    /// Read and parse the document at `path`
    ///
    /// A missing file is reported as [`ParsingError::DocumentNotFound`];
    /// invalid UTF-8 sequences are replaced rather than rejected.
    pub async fn load(path: impl AsRef<Path>) -> ParsingResult<LoadedDocument> {
        let path = path.as_ref();
        info!("Reading HTML file: {}", path.display());

        let raw = fs::read(path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => ParsingError::document_not_found(path.display().to_string()),
            _ => ParsingError::HtmlParsingFailed {
                message: format!("Failed to read document: {e}"),
                path: Some(path.display().to_string()),
            },
        })?;

        let content = String::from_utf8_lossy(&raw);
        Ok(LoadedDocument {
            path: path.to_path_buf(),
            html: Self::parse_str(&content),
            bytes: raw.len(),
        })
    }

    /// Parse markup that is already in memory
    pub fn parse_str(content: &str) -> Html {
        Html::parse_document(content)
    }
}
