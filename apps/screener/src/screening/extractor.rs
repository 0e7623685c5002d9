//! Text extraction — turns a source document into plain text.
//!
//! Extraction is all-or-nothing: a document that cannot be opened or parsed
//! yields an `ExtractionError`, never partial text.

use std::path::Path;

use crate::errors::ExtractionError;

/// Converts a document on disk into plain text. Blocking; callers on the async
/// runtime should wrap it in `spawn_blocking`.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> Result<String, ExtractionError>;
}

/// PDF text extractor using the pdf-extract crate.
/// Handles digital PDFs with embedded text layers; scanned pages yield no text.
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        let bytes = std::fs::read(path).map_err(|source| ExtractionError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let pages = pdf_extract::extract_text_from_mem_by_pages(&bytes).map_err(|e| {
            ExtractionError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;

        Ok(join_pages(pages))
    }
}

/// Concatenates page texts, each followed by a newline, and trims the result.
/// Blank pages contribute nothing.
pub fn join_pages<I>(pages: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut text = String::new();
    for page in pages {
        let page = page.as_ref();
        if page.trim().is_empty() {
            continue;
        }
        text.push_str(page);
        text.push('\n');
    }
    text.trim().to_string()
}
