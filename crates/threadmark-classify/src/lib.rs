use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use threadmark_core::{DEFAULT_READ_CAP, DEFAULT_STEM_PREFIX, DEFAULT_THRESHOLD, ThreadDef};

pub mod report;

// Re-export for convenience
pub use report::{ReportFormat, render_json, render_markdown, write_report};

#[derive(Error, Debug)]
pub enum ClassifyError {
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
}

/// Options controlling a classification run.
#[derive(Debug, Clone)]
pub struct ClassifyOptions {
    /// Minimum keyword hits for a document to join a thread.
    pub threshold: usize,
    /// Maximum number of bytes sampled from each document.
    pub read_cap: usize,
    /// Filename prefix stripped when deriving display titles.
    pub stem_prefix: String,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            read_cap: DEFAULT_READ_CAP,
            stem_prefix: DEFAULT_STEM_PREFIX.to_string(),
        }
    }
}

/// One document matched against a thread.
#[derive(Debug, Clone, Serialize)]
pub struct DocMatch {
    pub pdf_name: String,
    pub md_name: String,
    pub title: String,
    /// Number of distinct thread keywords found in the sampled content.
    pub hits: usize,
}

/// All matches for one thread, sorted by descending hit count.
#[derive(Debug, Clone, Serialize)]
pub struct ThreadReport {
    pub thread: String,
    pub matches: Vec<DocMatch>,
}

/// Count how many of `keywords` occur in `content_lower` as substrings.
///
/// `content_lower` must already be lowercased; keywords are lowercased here.
/// Matching is not word-boundary aware, so "EMU" also hits "emulator"; the
/// loose keyword lists are tuned with that in mind.
pub fn keyword_hits(content_lower: &str, keywords: &[String]) -> usize {
    keywords
        .iter()
        .filter(|kw| content_lower.contains(&kw.to_lowercase()))
        .count()
}

/// Display title for a document: stem minus prefix, underscores as spaces.
pub fn display_title(stem: &str, stem_prefix: &str) -> String {
    stem.strip_prefix(stem_prefix).unwrap_or(stem).replace('_', " ")
}

/// Read at most `cap` bytes of a file, lossily decoded as UTF-8.
fn read_prefix(path: &Path, cap: usize) -> std::io::Result<String> {
    let file = fs::File::open(path)?;
    let mut buf = Vec::with_capacity(cap.min(64 * 1024));
    file.take(cap as u64).read_to_end(&mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Score every markdown document in `extract_dir` against every thread.
///
/// Returns one report per thread, in thread-definition order, each listing
/// the documents whose keyword hit count met the threshold, sorted by
/// descending hit count (filename ascending as tiebreaker). Nothing is
/// persisted; the mapping is recomputed from scratch on every run.
pub fn classify_directory(
    extract_dir: &Path,
    threads: &[ThreadDef],
    options: &ClassifyOptions,
) -> Result<Vec<ThreadReport>, ClassifyError> {
    let entries = fs::read_dir(extract_dir).map_err(|source| ClassifyError::ReadDir {
        dir: extract_dir.to_path_buf(),
        source,
    })?;

    let mut md_files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().map(|e| e == "md").unwrap_or(false))
        .collect();
    md_files.sort();

    let mut reports: Vec<ThreadReport> = threads
        .iter()
        .map(|t| ThreadReport {
            thread: t.name.clone(),
            matches: Vec::new(),
        })
        .collect();

    for path in &md_files {
        let content = read_prefix(path, options.read_cap).map_err(|source| {
            ClassifyError::ReadFile {
                path: path.clone(),
                source,
            }
        })?;
        let content_lower = content.to_lowercase();

        let stem = match path.file_stem() {
            Some(s) => s.to_string_lossy().into_owned(),
            None => continue,
        };

        for (thread, report) in threads.iter().zip(reports.iter_mut()) {
            let hits = keyword_hits(&content_lower, &thread.keywords);
            if hits >= options.threshold {
                report.matches.push(DocMatch {
                    pdf_name: format!("{stem}.pdf"),
                    md_name: format!("{stem}.md"),
                    title: display_title(&stem, &options.stem_prefix),
                    hits,
                });
            } else {
                tracing::trace!(doc = %stem, thread = %thread.name, hits, "below threshold");
            }
        }
    }

    for report in &mut reports {
        report
            .matches
            .sort_by(|a, b| b.hits.cmp(&a.hits).then(a.md_name.cmp(&b.md_name)));
    }

    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use threadmark_core::default_threads;

    fn kw(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn hits_count_distinct_keywords_not_occurrences() {
        let content = "yield yield yield fragment".to_lowercase();
        assert_eq!(keyword_hits(&content, &kw(&["yield", "fragment"])), 2);
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        let content = "Large-scale EMULATOR training".to_lowercase();
        // "EMU" hits inside "emulator"; "AI" hits inside "training"
        assert_eq!(keyword_hits(&content, &kw(&["EMU", "AI", "FPY"])), 2);
    }

    #[test]
    fn ai_ml_example_scores_three() {
        let content = "This talk covers AI, machine learning and Bayesian methods".to_lowercase();
        let threads = default_threads();
        let hits = keyword_hits(&content, &threads[0].keywords);
        assert!(hits >= 3, "expected at least 3 hits, got {hits}");
    }

    #[test]
    fn display_title_strips_prefix_and_underscores() {
        assert_eq!(
            display_title("2026-WANDA-FPY_Modeling", "2026-WANDA-"),
            "FPY Modeling"
        );
        assert_eq!(display_title("Other_Deck", "2026-WANDA-"), "Other Deck");
    }
}
