//! Document encodings

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serialized form of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Json,
    Yaml,
}

impl Format {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            _ => None,
        }
    }
}

/// Encode a value as a human-readable document
pub fn encode<T: Serialize + ?Sized>(format: Format, value: &T) -> Result<String> {
    match format {
        Format::Json => {
            serde_json::to_string_pretty(value).context("Failed to encode JSON document")
        }
        Format::Yaml => serde_yaml::to_string(value).context("Failed to encode YAML document"),
    }
}
