use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};

mod output;

use output::ColorMode;
use threadmark_classify::{ClassifyOptions, ReportFormat};
use threadmark_core::{
    ConfigFile, DEFAULT_EXTRACT_DIR, DEFAULT_PDF_DIR, DEFAULT_READ_CAP, DEFAULT_REPORT_PATH,
    DEFAULT_STEM_PREFIX, DEFAULT_THRESHOLD, ThreadDef,
};

/// Presentation curation tools - extract PDF decks to markdown, map them to
/// topical threads, and insert thread backlinks
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract per-page text from every PDF in a directory into markdown files
    Extract {
        /// Directory of source PDFs
        #[arg(long)]
        pdf_dir: Option<PathBuf>,

        /// Output directory for the extracted markdown files
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Score extracted documents against thread keywords and write a mapping report
    Classify {
        /// Directory of extracted markdown documents
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Path of the generated mapping report
        #[arg(long)]
        report: Option<PathBuf>,

        /// Report format
        #[arg(long, value_enum, default_value = "markdown")]
        format: ReportFormatArg,

        /// Minimum keyword hits for a document to join a thread
        #[arg(long)]
        threshold: Option<usize>,

        /// Maximum bytes sampled from each document
        #[arg(long)]
        read_cap: Option<usize>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Insert Related Threads backlinks into extracted documents
    Backlinks {
        /// Directory of extracted markdown documents
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ReportFormatArg {
    Markdown,
    Json,
}

impl From<ReportFormatArg> for ReportFormat {
    fn from(arg: ReportFormatArg) -> Self {
        match arg {
            ReportFormatArg::Markdown => ReportFormat::Markdown,
            ReportFormatArg::Json => ReportFormat::Json,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = threadmark_core::load_config();

    match cli.command {
        Command::Extract {
            pdf_dir,
            out_dir,
            no_color,
        } => extract(pdf_dir, out_dir, no_color, &config),
        Command::Classify {
            dir,
            report,
            format,
            threshold,
            read_cap,
            no_color,
        } => classify(dir, report, format.into(), threshold, read_cap, no_color, &config),
        Command::Backlinks { dir, no_color } => backlinks(dir, no_color, &config),
    }
}

/// Thread set: config file `[[threads]]` entries, else the built-in defaults.
fn resolve_threads(config: &ConfigFile) -> Vec<ThreadDef> {
    config
        .threads
        .clone()
        .unwrap_or_else(threadmark_core::default_threads)
}

fn resolve_extract_dir(flag: Option<PathBuf>, config: &ConfigFile) -> PathBuf {
    flag.unwrap_or_else(|| {
        config
            .paths
            .as_ref()
            .and_then(|p| p.extract_dir.clone())
            .unwrap_or_else(|| DEFAULT_EXTRACT_DIR.to_string())
            .into()
    })
}

fn resolve_stem_prefix(config: &ConfigFile) -> String {
    config
        .documents
        .as_ref()
        .and_then(|d| d.stem_prefix.clone())
        .unwrap_or_else(|| DEFAULT_STEM_PREFIX.to_string())
}

fn extract(
    pdf_dir: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    no_color: bool,
    config: &ConfigFile,
) -> anyhow::Result<()> {
    let pdf_dir = pdf_dir.unwrap_or_else(|| {
        config
            .paths
            .as_ref()
            .and_then(|p| p.pdf_dir.clone())
            .unwrap_or_else(|| DEFAULT_PDF_DIR.to_string())
            .into()
    });
    let out_dir = resolve_extract_dir(out_dir, config);
    let color = ColorMode(!no_color);

    if !pdf_dir.exists() {
        anyhow::bail!("PDF directory not found: {}", pdf_dir.display());
    }

    let pdf_count = threadmark_extract::list_pdfs(&pdf_dir)?.len();
    println!("Found {} PDFs to process", pdf_count);

    let bar = ProgressBar::new(pdf_count as u64);
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} [{bar:40.cyan/dim}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=> "),
    );
    bar.enable_steady_tick(Duration::from_millis(120));

    let backend = threadmark_pdf_mupdf::MupdfBackend::new();
    let report =
        threadmark_extract::extract_directory(&pdf_dir, &out_dir, &backend, |outcome| {
            bar.println(output::outcome_line(outcome, color));
            bar.inc(1);
        })?;
    bar.finish_and_clear();

    let mut stdout = std::io::stdout();
    output::print_extract_summary(&mut stdout, &report, color)?;
    stdout.flush()?;

    Ok(())
}

fn classify(
    dir: Option<PathBuf>,
    report_path: Option<PathBuf>,
    format: ReportFormat,
    threshold: Option<usize>,
    read_cap: Option<usize>,
    no_color: bool,
    config: &ConfigFile,
) -> anyhow::Result<()> {
    let dir = resolve_extract_dir(dir, config);
    let report_path = report_path.unwrap_or_else(|| {
        config
            .paths
            .as_ref()
            .and_then(|p| p.report_path.clone())
            .unwrap_or_else(|| DEFAULT_REPORT_PATH.to_string())
            .into()
    });
    let color = ColorMode(!no_color);

    if !dir.exists() {
        anyhow::bail!("Extract directory not found: {}", dir.display());
    }

    // Resolve tuning knobs: CLI flags > config file > defaults
    let options = ClassifyOptions {
        threshold: threshold
            .or_else(|| config.classify.as_ref().and_then(|c| c.threshold))
            .unwrap_or(DEFAULT_THRESHOLD),
        read_cap: read_cap
            .or_else(|| config.classify.as_ref().and_then(|c| c.read_cap_bytes))
            .unwrap_or(DEFAULT_READ_CAP),
        stem_prefix: resolve_stem_prefix(config),
    };
    let threads = resolve_threads(config);

    let reports = threadmark_classify::classify_directory(&dir, &threads, &options)?;

    let mut stdout = std::io::stdout();
    output::print_thread_matches(&mut stdout, &reports, color)?;

    let dir_label = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string());
    threadmark_classify::write_report(&reports, &dir_label, format, &report_path)?;

    writeln!(stdout)?;
    writeln!(stdout, "✓ Wrote {}", report_path.display())?;
    stdout.flush()?;

    Ok(())
}

fn backlinks(dir: Option<PathBuf>, no_color: bool, config: &ConfigFile) -> anyhow::Result<()> {
    let dir = resolve_extract_dir(dir, config);
    let color = ColorMode(!no_color);

    if !dir.exists() {
        anyhow::bail!("Extract directory not found: {}", dir.display());
    }

    let threads = resolve_threads(config);
    let options = threadmark_backlink::BacklinkOptions {
        stem_prefix: resolve_stem_prefix(config),
    };

    let report = threadmark_backlink::insert_backlinks(&dir, &threads, &options)?;

    let mut stdout = std::io::stdout();
    output::print_backlink_summary(&mut stdout, &report, color)?;
    stdout.flush()?;

    Ok(())
}
