use std::fs;
use std::path::Path;

use threadmark_core::{BackendError, PdfBackend};
use threadmark_extract::{FileOutcome, extract_directory};

/// Canned backend keyed on the file stem, so tests run without real PDFs.
struct FakeBackend;

impl PdfBackend for FakeBackend {
    fn page_texts(&self, path: &Path) -> Result<Vec<String>, BackendError> {
        let stem = path.file_stem().unwrap().to_string_lossy();
        match stem.as_ref() {
            "corrupt" => Err(BackendError::Open("cannot parse xref".into())),
            "blanks" => Ok(vec![
                "cover\n".to_string(),
                "\n".to_string(),
                "closing\n".to_string(),
            ]),
            _ => Ok(vec![format!("{stem} page one\n"), format!("{stem} page two\n")]),
        }
    }
}

fn seed_pdfs(dir: &Path, names: &[&str]) {
    for name in names {
        fs::write(dir.join(name), b"%PDF-1.4 placeholder").unwrap();
    }
}

#[test]
fn batch_continues_past_failures() {
    let tmp = tempfile::tempdir().unwrap();
    let pdf_dir = tmp.path().join("Presentations");
    let out_dir = tmp.path().join("Extracted");
    fs::create_dir(&pdf_dir).unwrap();
    seed_pdfs(&pdf_dir, &["alpha.pdf", "corrupt.pdf", "zeta.pdf"]);

    let mut seen = Vec::new();
    let report = extract_directory(&pdf_dir, &out_dir, &FakeBackend, |outcome| {
        let name = match outcome {
            FileOutcome::Extracted(doc) => doc.pdf_name.clone(),
            FileOutcome::Failed(failure) => failure.pdf_name.clone(),
        };
        seen.push(name);
    })
    .unwrap();

    // Sorted order, every file visited exactly once
    assert_eq!(seen, ["alpha.pdf", "corrupt.pdf", "zeta.pdf"]);
    assert_eq!(report.total(), 3);
    assert_eq!(report.extracted.len(), 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].pdf_name, "corrupt.pdf");
    assert!(report.failures[0].reason.contains("cannot parse xref"));

    assert!(out_dir.join("alpha.md").exists());
    assert!(out_dir.join("zeta.md").exists());
    assert!(!out_dir.join("corrupt.md").exists());
}

#[test]
fn output_matches_document_layout() {
    let tmp = tempfile::tempdir().unwrap();
    let pdf_dir = tmp.path().join("Presentations");
    let out_dir = tmp.path().join("Extracted");
    fs::create_dir(&pdf_dir).unwrap();
    seed_pdfs(&pdf_dir, &["blanks.pdf"]);

    let report = extract_directory(&pdf_dir, &out_dir, &FakeBackend, |_| {}).unwrap();
    assert_eq!(report.extracted.len(), 1);
    assert_eq!(report.extracted[0].page_count, 3);

    let content = fs::read_to_string(out_dir.join("blanks.md")).unwrap();
    assert!(content.starts_with("# blanks\n\n**Source:** `blanks.pdf`\n\n**Pages:** 3\n\n---\n\n"));
    assert!(content.contains("# Page 1\n\ncover\n"));
    assert!(!content.contains("# Page 2"));
    assert!(content.contains("# Page 3\n\nclosing\n"));
}

#[test]
fn non_pdf_entries_are_ignored() {
    let tmp = tempfile::tempdir().unwrap();
    let pdf_dir = tmp.path().join("Presentations");
    let out_dir = tmp.path().join("Extracted");
    fs::create_dir(&pdf_dir).unwrap();
    seed_pdfs(&pdf_dir, &["alpha.pdf"]);
    fs::write(pdf_dir.join("notes.txt"), b"not a pdf").unwrap();

    let report = extract_directory(&pdf_dir, &out_dir, &FakeBackend, |_| {}).unwrap();
    assert_eq!(report.total(), 1);
}

#[test]
fn missing_pdf_dir_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let missing = tmp.path().join("nope");
    let out_dir = tmp.path().join("Extracted");

    let result = extract_directory(&missing, &out_dir, &FakeBackend, |_| {});
    assert!(result.is_err());
}
