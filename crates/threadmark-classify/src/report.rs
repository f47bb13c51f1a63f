use std::path::Path;

use chrono::Local;

use crate::ThreadReport;

/// Output format for the thread mapping report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Markdown,
    Json,
}

/// Write the thread mapping report to `path`.
///
/// `extract_dir_label` is the directory name echoed in the per-document
/// "Extracted:" lines of the markdown format.
pub fn write_report(
    reports: &[ThreadReport],
    extract_dir_label: &str,
    format: ReportFormat,
    path: &Path,
) -> std::io::Result<()> {
    let generated = Local::now().format("%B %-d, %Y").to_string();
    let content = match format {
        ReportFormat::Markdown => render_markdown(reports, extract_dir_label, &generated),
        ReportFormat::Json => render_json(reports),
    };
    std::fs::write(path, content)
}

/// Render the markdown mapping report: one section per thread, every match
/// listed with its keyword hit count, highest first.
pub fn render_markdown(
    reports: &[ThreadReport],
    extract_dir_label: &str,
    generated: &str,
) -> String {
    let mut out = String::new();
    out.push_str("# Presentation → Thread Mapping\n\n");
    out.push_str(&format!("Generated: {generated}\n\n"));

    for report in reports {
        out.push_str(&format!("## {}\n", report.thread));
        out.push_str(&format!(
            "**Total presentations:** {}\n\n",
            report.matches.len()
        ));

        for doc in &report.matches {
            out.push_str(&format!(
                "- `{}` ({} keyword matches)\n",
                doc.pdf_name, doc.hits
            ));
            out.push_str(&format!("  - {}\n", doc.title));
            out.push_str(&format!(
                "  - Extracted: `{}/{}`\n",
                extract_dir_label, doc.md_name
            ));
        }
        out.push('\n');
    }

    out
}

/// Render the report as pretty-printed JSON.
pub fn render_json(reports: &[ThreadReport]) -> String {
    // ThreadReport only holds strings and counts; serialization cannot fail.
    serde_json::to_string_pretty(reports).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DocMatch;

    fn sample() -> Vec<ThreadReport> {
        vec![
            ThreadReport {
                thread: "AI_ML".to_string(),
                matches: vec![DocMatch {
                    pdf_name: "2026-WANDA-AI_Program_Overview.pdf".to_string(),
                    md_name: "2026-WANDA-AI_Program_Overview.md".to_string(),
                    title: "AI Program Overview".to_string(),
                    hits: 5,
                }],
            },
            ThreadReport {
                thread: "Activation_Data".to_string(),
                matches: Vec::new(),
            },
        ]
    }

    #[test]
    fn markdown_lists_each_match_with_hit_count() {
        let out = render_markdown(&sample(), "Extracted_PyMuPDF", "August 7, 2026");
        assert!(out.starts_with("# Presentation → Thread Mapping\n\nGenerated: August 7, 2026\n\n"));
        assert!(out.contains("## AI_ML\n**Total presentations:** 1\n\n"));
        assert!(out.contains("- `2026-WANDA-AI_Program_Overview.pdf` (5 keyword matches)\n"));
        assert!(out.contains("  - AI Program Overview\n"));
        assert!(out.contains("  - Extracted: `Extracted_PyMuPDF/2026-WANDA-AI_Program_Overview.md`\n"));
    }

    #[test]
    fn markdown_keeps_empty_threads_visible() {
        let out = render_markdown(&sample(), "Extracted_PyMuPDF", "August 7, 2026");
        assert!(out.contains("## Activation_Data\n**Total presentations:** 0\n\n"));
    }

    #[test]
    fn json_round_trips_through_serde() {
        let out = render_json(&sample());
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["thread"], "AI_ML");
        assert_eq!(value[0]["matches"][0]["hits"], 5);
        assert_eq!(value[1]["matches"].as_array().unwrap().len(), 0);
    }
}
