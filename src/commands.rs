//! Bodies of the dsctl subcommands
//!
//! Everything here returns data; printing and the exit status are left to
//! the binary.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::format::{encode, Format};
use crate::resource::{load_documents, select, DatasourceDocument};

/// Read and decode every datasource in one file
pub fn load_file(
    config: &Config,
    format: Option<Format>,
    path: &Path,
) -> Result<Vec<DatasourceDocument>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    let format = config.effective_format(format, path);
    tracing::debug!("Decoding {:?} as {:?}", path, format);
    let documents = load_documents(format, &content)?;
    Ok(documents)
}

/// Outcome of loading one file
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: Result<Vec<DatasourceDocument>>,
}

/// Outcome of `dsctl validate`
pub struct ValidationReport {
    pub files: Vec<FileOutcome>,
}

impl ValidationReport {
    pub fn failed(&self) -> usize {
        self.files.iter().filter(|f| f.result.is_err()).count()
    }

    /// Error out when any file failed
    pub fn ensure_ok(&self) -> Result<()> {
        let failed = self.failed();
        if failed > 0 {
            anyhow::bail!("{} of {} file(s) failed validation", failed, self.files.len());
        }
        Ok(())
    }
}

/// Load every file, keeping going past failures
pub fn validate_files(
    config: &Config,
    format: Option<Format>,
    files: &[PathBuf],
) -> ValidationReport {
    let files = files
        .iter()
        .map(|path| {
            let result = load_file(config, format, path);
            if let Err(e) = &result {
                tracing::warn!("Validation failed for {:?}: {:#}", path, e);
            }
            FileOutcome {
                path: path.clone(),
                result,
            }
        })
        .collect();
    ValidationReport { files }
}

/// Load every file and render the selected datasources.
///
/// Without `kind`, the plugin kind from the config applies.
pub fn list(
    config: &Config,
    format: Option<Format>,
    kind: Option<&str>,
    default: Option<bool>,
    output: Format,
    files: &[PathBuf],
) -> Result<String> {
    let mut documents = Vec::new();
    for path in files {
        documents.extend(load_file(config, format, path)?);
    }

    let kind = config.effective_plugin_kind(kind);
    tracing::info!(
        "Selecting from {} datasource(s), kind={:?}, default={:?}",
        documents.len(),
        kind,
        default
    );

    let selected = select(documents, &kind, default);
    let mut rendered = encode(output, &selected)?;
    if output == Format::Json {
        rendered.push('\n');
    }
    Ok(rendered)
}
