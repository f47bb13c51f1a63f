pub mod backend;
pub mod config_file;
pub mod threads;

// Re-export for convenience
pub use backend::{BackendError, PdfBackend};
pub use config_file::{ConfigFile, config_path, load_config};
pub use threads::{ThreadDef, default_threads};

/// Default directory scanned for source PDF decks.
pub const DEFAULT_PDF_DIR: &str = "Presentations";

/// Default directory holding extracted markdown documents.
pub const DEFAULT_EXTRACT_DIR: &str = "Extracted_PyMuPDF";

/// Default path of the generated thread mapping report.
pub const DEFAULT_REPORT_PATH: &str = "Thread_Mapping.md";

/// Minimum keyword hits for a document to be associated with a thread.
pub const DEFAULT_THRESHOLD: usize = 2;

/// Byte cap when sampling document content for classification.
pub const DEFAULT_READ_CAP: usize = 50_000;

/// Filename prefix stripped to obtain a document identifier.
pub const DEFAULT_STEM_PREFIX: &str = "2026-WANDA-";
