use std::io::Write;

use owo_colors::OwoColorize;

use threadmark_backlink::BacklinkReport;
use threadmark_classify::ThreadReport;
use threadmark_extract::{ExtractReport, FileOutcome};

/// Maximum matches echoed to the console per thread (the report file always
/// lists all of them).
const MAX_THREAD_MATCHES: usize = 20;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// One-line outcome marker printed as each PDF finishes.
pub fn outcome_line(outcome: &FileOutcome, color: ColorMode) -> String {
    match outcome {
        FileOutcome::Extracted(doc) => {
            if color.enabled() {
                format!("{} {}", "✓".green(), doc.pdf_name)
            } else {
                format!("✓ {}", doc.pdf_name)
            }
        }
        FileOutcome::Failed(failure) => {
            if color.enabled() {
                format!("{} {}: {}", "✗".red(), failure.pdf_name, failure.reason)
            } else {
                format!("✗ {}: {}", failure.pdf_name, failure.reason)
            }
        }
    }
}

/// Print the end-of-run extraction summary with the aggregate failure list.
pub fn print_extract_summary(
    w: &mut dyn Write,
    report: &ExtractReport,
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w)?;
    writeln!(w, "=== Summary ===")?;
    writeln!(w, "Success: {}/{}", report.extracted.len(), report.total())?;
    writeln!(w, "Failed: {}", report.failures.len())?;

    if !report.failures.is_empty() {
        writeln!(w)?;
        writeln!(w, "Failed PDFs:")?;
        for failure in &report.failures {
            let line = format!("  - {}: {}", failure.pdf_name, failure.reason);
            if color.enabled() {
                writeln!(w, "{}", line.red())?;
            } else {
                writeln!(w, "{}", line)?;
            }
        }
    }
    Ok(())
}

/// Print the per-thread match listing, capped at the top matches.
pub fn print_thread_matches(
    w: &mut dyn Write,
    reports: &[ThreadReport],
    color: ColorMode,
) -> std::io::Result<()> {
    for report in reports {
        writeln!(w)?;
        if color.enabled() {
            writeln!(w, "=== {} ===", report.thread.bold().cyan())?;
        } else {
            writeln!(w, "=== {} ===", report.thread)?;
        }
        writeln!(w, "Found {} presentations", report.matches.len())?;

        for doc in report.matches.iter().take(MAX_THREAD_MATCHES) {
            writeln!(w, "  [{:>2}] {}", doc.hits, doc.pdf_name)?;
            if color.enabled() {
                writeln!(w, "      {}", doc.title.dimmed())?;
            } else {
                writeln!(w, "      {}", doc.title)?;
            }
        }
        if report.matches.len() > MAX_THREAD_MATCHES {
            writeln!(
                w,
                "  ... and {} more (see the report file)",
                report.matches.len() - MAX_THREAD_MATCHES
            )?;
        }
    }
    Ok(())
}

/// Print the per-file backlink updates and the final count.
pub fn print_backlink_summary(
    w: &mut dyn Write,
    report: &BacklinkReport,
    color: ColorMode,
) -> std::io::Result<()> {
    for updated in &report.updated {
        let threads = updated.threads.join(", ");
        if color.enabled() {
            writeln!(w, "{} {} → {}", "✓".green(), updated.md_name, threads)?;
        } else {
            writeln!(w, "✓ {} → {}", updated.md_name, threads)?;
        }
    }

    writeln!(w)?;
    writeln!(
        w,
        "✓ Updated {} files with thread backlinks",
        report.updated.len()
    )?;
    if report.already_annotated > 0 || report.unmapped > 0 {
        let line = format!(
            "(Skipped {} already annotated, {} unmapped)",
            report.already_annotated, report.unmapped
        );
        if color.enabled() {
            writeln!(w, "{}", line.dimmed())?;
        } else {
            writeln!(w, "{}", line)?;
        }
    }
    Ok(())
}
