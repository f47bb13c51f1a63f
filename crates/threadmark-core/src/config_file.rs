use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::threads::ThreadDef;

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub paths: Option<PathsConfig>,
    pub classify: Option<ClassifyConfig>,
    pub documents: Option<DocumentsConfig>,
    /// Replaces the built-in thread set entirely when present.
    pub threads: Option<Vec<ThreadDef>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    pub pdf_dir: Option<String>,
    pub extract_dir: Option<String>,
    pub report_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifyConfig {
    pub threshold: Option<usize>,
    pub read_cap_bytes: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentsConfig {
    /// Filename prefix stripped to obtain a document identifier.
    pub stem_prefix: Option<String>,
}

/// Platform config directory path: `<config_dir>/threadmark/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("threadmark").join("config.toml"))
}

/// Load config by cascading CWD `.threadmark.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".threadmark.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        paths: Some(PathsConfig {
            pdf_dir: overlay
                .paths
                .as_ref()
                .and_then(|p| p.pdf_dir.clone())
                .or_else(|| base.paths.as_ref().and_then(|p| p.pdf_dir.clone())),
            extract_dir: overlay
                .paths
                .as_ref()
                .and_then(|p| p.extract_dir.clone())
                .or_else(|| base.paths.as_ref().and_then(|p| p.extract_dir.clone())),
            report_path: overlay
                .paths
                .as_ref()
                .and_then(|p| p.report_path.clone())
                .or_else(|| base.paths.as_ref().and_then(|p| p.report_path.clone())),
        }),
        classify: Some(ClassifyConfig {
            threshold: overlay
                .classify
                .as_ref()
                .and_then(|c| c.threshold)
                .or_else(|| base.classify.as_ref().and_then(|c| c.threshold)),
            read_cap_bytes: overlay
                .classify
                .as_ref()
                .and_then(|c| c.read_cap_bytes)
                .or_else(|| base.classify.as_ref().and_then(|c| c.read_cap_bytes)),
        }),
        documents: Some(DocumentsConfig {
            stem_prefix: overlay
                .documents
                .as_ref()
                .and_then(|d| d.stem_prefix.clone())
                .or_else(|| base.documents.as_ref().and_then(|d| d.stem_prefix.clone())),
        }),
        threads: overlay.threads.or(base.threads),
    }
}
