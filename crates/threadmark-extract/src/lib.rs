use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use threadmark_core::PdfBackend;

pub mod markdown;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("failed to read PDF directory {}: {source}", dir.display())]
    ReadDir {
        dir: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to create output directory {}: {source}", dir.display())]
    CreateOutputDir {
        dir: PathBuf,
        source: std::io::Error,
    },
}

/// A successfully extracted document.
#[derive(Debug, Clone)]
pub struct ExtractedDoc {
    pub pdf_name: String,
    pub output_path: PathBuf,
    /// Total pages in the source PDF, blank pages included.
    pub page_count: usize,
}

/// A PDF that could not be extracted.
#[derive(Debug, Clone)]
pub struct ExtractFailure {
    pub pdf_name: String,
    pub reason: String,
}

/// Per-file outcome, streamed to the progress callback as the batch runs.
#[derive(Debug, Clone)]
pub enum FileOutcome {
    Extracted(ExtractedDoc),
    Failed(ExtractFailure),
}

/// Aggregate result of an extraction run.
#[derive(Debug, Default)]
pub struct ExtractReport {
    pub extracted: Vec<ExtractedDoc>,
    pub failures: Vec<ExtractFailure>,
}

impl ExtractReport {
    pub fn total(&self) -> usize {
        self.extracted.len() + self.failures.len()
    }
}

/// List the PDF files in `pdf_dir`, sorted by filename.
pub fn list_pdfs(pdf_dir: &Path) -> Result<Vec<PathBuf>, ExtractError> {
    let entries = fs::read_dir(pdf_dir).map_err(|source| ExtractError::ReadDir {
        dir: pdf_dir.to_path_buf(),
        source,
    })?;

    let mut pdfs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .map(|e| e.eq_ignore_ascii_case("pdf"))
                .unwrap_or(false)
        })
        .collect();
    pdfs.sort();
    Ok(pdfs)
}

/// Extract every PDF in `pdf_dir` into one markdown file per PDF in `out_dir`.
///
/// A failing PDF does not abort the batch: its error is recorded in the
/// report and the remaining files are still processed. Each per-file outcome
/// is handed to `progress` before the next file starts.
pub fn extract_directory(
    pdf_dir: &Path,
    out_dir: &Path,
    backend: &dyn PdfBackend,
    mut progress: impl FnMut(&FileOutcome),
) -> Result<ExtractReport, ExtractError> {
    let pdfs = list_pdfs(pdf_dir)?;

    fs::create_dir_all(out_dir).map_err(|source| ExtractError::CreateOutputDir {
        dir: out_dir.to_path_buf(),
        source,
    })?;

    let mut report = ExtractReport::default();

    for pdf_path in pdfs {
        let pdf_name = pdf_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| pdf_path.display().to_string());

        let outcome = match extract_one(&pdf_path, &pdf_name, out_dir, backend) {
            Ok(doc) => FileOutcome::Extracted(doc),
            Err(reason) => FileOutcome::Failed(ExtractFailure { pdf_name, reason }),
        };
        progress(&outcome);

        match outcome {
            FileOutcome::Extracted(doc) => report.extracted.push(doc),
            FileOutcome::Failed(failure) => report.failures.push(failure),
        }
    }

    Ok(report)
}

fn extract_one(
    pdf_path: &Path,
    pdf_name: &str,
    out_dir: &Path,
    backend: &dyn PdfBackend,
) -> Result<ExtractedDoc, String> {
    let stem = pdf_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| format!("no file stem: {}", pdf_path.display()))?;

    let pages = backend.page_texts(pdf_path).map_err(|e| e.to_string())?;
    tracing::debug!(pdf = %pdf_name, pages = pages.len(), "extracted text");

    let content = markdown::render_document(&stem, pdf_name, &pages);
    let output_path = out_dir.join(format!("{stem}.md"));
    fs::write(&output_path, content)
        .map_err(|e| format!("failed to write {}: {}", output_path.display(), e))?;

    Ok(ExtractedDoc {
        pdf_name: pdf_name.to_string(),
        output_path,
        page_count: pages.len(),
    })
}
