use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    Open(String),
    #[error("failed to extract text: {0}")]
    Extraction(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for PDF text extraction backends.
///
/// Implementors provide the raw per-page text; everything downstream
/// (markdown rendering, classification, backlink insertion) is
/// backend-agnostic, which lets tests substitute a canned backend.
pub trait PdfBackend: Send + Sync {
    /// Extract the text of every page of a PDF, in page order.
    ///
    /// Blank pages are returned as empty strings so callers can still
    /// report the document's true page count.
    fn page_texts(&self, path: &Path) -> Result<Vec<String>, BackendError>;
}
