use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use threadmark_core::{DEFAULT_STEM_PREFIX, ThreadDef};

/// Marker line fragment that guards against double insertion.
pub const RELATED_THREADS_MARKER: &str = "Related Threads:";

#[derive(Error, Debug)]
pub enum BacklinkError {
    #[error("failed to read extract directory {}: {source}", dir.display())]
    ReadDir {
        dir: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Options controlling a backlink run.
#[derive(Debug, Clone)]
pub struct BacklinkOptions {
    /// Filename prefix selecting which documents to annotate, also stripped
    /// to obtain the identifier looked up in the thread document lists.
    pub stem_prefix: String,
}

impl Default for BacklinkOptions {
    fn default() -> Self {
        Self {
            stem_prefix: DEFAULT_STEM_PREFIX.to_string(),
        }
    }
}

/// A document that received a backlink block.
#[derive(Debug, Clone)]
pub struct UpdatedFile {
    pub md_name: String,
    pub threads: Vec<String>,
}

/// Aggregate result of a backlink run.
#[derive(Debug, Default)]
pub struct BacklinkReport {
    pub updated: Vec<UpdatedFile>,
    /// Files skipped because they already carry the marker.
    pub already_annotated: usize,
    /// Files skipped because no thread lists their identifier.
    pub unmapped: usize,
}

/// Threads whose curated document list contains `identifier`, in
/// thread-definition order.
pub fn threads_for<'a>(threads: &'a [ThreadDef], identifier: &str) -> Vec<&'a str> {
    threads
        .iter()
        .filter(|t| t.contains_document(identifier))
        .map(|t| t.name.as_str())
        .collect()
}

/// Render the inserted backlink block.
pub fn render_block(threads: &[&str]) -> String {
    let mut block = String::from("\n**Related Threads:**\n");
    for thread in threads {
        block.push_str(&format!("- [[Threads/{thread}]]\n"));
    }
    block.push('\n');
    block
}

/// Insert the backlink block into `content`, immediately after the first
/// `---` line that follows the header. Falls back to the top of the file
/// when no separator exists.
///
/// Returns `None` when the content already carries the marker, making the
/// operation idempotent per document.
pub fn annotate(content: &str, threads: &[&str]) -> Option<String> {
    if content
        .lines()
        .any(|line| line.contains(RELATED_THREADS_MARKER))
    {
        return None;
    }

    let lines: Vec<&str> = content.split_inclusive('\n').collect();
    let mut insert_at = 0;
    for (i, line) in lines.iter().enumerate() {
        if i > 0 && line.starts_with("---") {
            insert_at = i + 1;
            break;
        }
    }

    let block = render_block(threads);
    let mut out = String::with_capacity(content.len() + block.len());
    for line in &lines[..insert_at] {
        out.push_str(line);
    }
    out.push_str(&block);
    for line in &lines[insert_at..] {
        out.push_str(line);
    }
    Some(out)
}

/// Insert Related Threads backlinks into every matching document in
/// `extract_dir`.
///
/// Only files whose name starts with the configured prefix are considered.
/// Already-annotated and unmapped documents are counted but left untouched,
/// so re-running is a no-op for every previously processed file.
pub fn insert_backlinks(
    extract_dir: &Path,
    threads: &[ThreadDef],
    options: &BacklinkOptions,
) -> Result<BacklinkReport, BacklinkError> {
    let entries = fs::read_dir(extract_dir).map_err(|source| BacklinkError::ReadDir {
        dir: extract_dir.to_path_buf(),
        source,
    })?;

    let mut md_files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                return false;
            };
            name.starts_with(&options.stem_prefix) && name.ends_with(".md")
        })
        .collect();
    md_files.sort();

    let mut report = BacklinkReport::default();

    for path in &md_files {
        let content = fs::read_to_string(path).map_err(|source| BacklinkError::ReadFile {
            path: path.clone(),
            source,
        })?;

        let md_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = md_name.trim_end_matches(".md");
        let identifier = stem.strip_prefix(&options.stem_prefix).unwrap_or(stem);
        let matched = threads_for(threads, identifier);

        match annotate(&content, &matched) {
            None => {
                tracing::debug!(doc = %md_name, "already annotated");
                report.already_annotated += 1;
            }
            Some(_) if matched.is_empty() => {
                tracing::debug!(doc = %md_name, "no thread mapping");
                report.unmapped += 1;
            }
            Some(annotated) => {
                fs::write(path, annotated).map_err(|source| BacklinkError::WriteFile {
                    path: path.clone(),
                    source,
                })?;
                report.updated.push(UpdatedFile {
                    md_name,
                    threads: matched.iter().map(|t| t.to_string()).collect(),
                });
            }
        }
    }

    Ok(report)
}
