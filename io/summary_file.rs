//! Persistence of [`ModelSummary`] snapshots.
//!
//! Paths ending in `.toml` are written as TOML; anything else is written as
//! JSON with four-space indentation.

use crate::summary::ModelSummary;
use serde::Serialize;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SummaryFileError {
    #[error("Failed to read or write summary file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML summary file: {0}")]
    TomlParseError(#[from] toml::de::Error),
    #[error("Failed to serialize summary to TOML format: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),
    #[error("Failed to read or write JSON summary: {0}")]
    JsonError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SummaryFormat {
    Toml,
    Json,
}

impl SummaryFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => SummaryFormat::Toml,
            _ => SummaryFormat::Json,
        }
    }
}

/// Renders a summary as pretty JSON with four-space indentation.
pub fn summary_to_json(summary: &ModelSummary) -> Result<String, SummaryFileError> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    summary.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

pub fn save_summary(
    summary: &ModelSummary,
    path: impl AsRef<Path>,
) -> Result<(), SummaryFileError> {
    let path = path.as_ref();
    let text = match SummaryFormat::from_path(path) {
        SummaryFormat::Toml => toml::to_string_pretty(summary)?,
        SummaryFormat::Json => summary_to_json(summary)?,
    };
    let mut file = BufWriter::new(fs::File::create(path)?);
    file.write_all(text.as_bytes())?;
    file.flush()?;
    log::info!("Model summary saved to {}", path.display());
    Ok(())
}

pub fn load_summary(path: impl AsRef<Path>) -> Result<ModelSummary, SummaryFileError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let summary = match SummaryFormat::from_path(path) {
        SummaryFormat::Toml => toml::from_str(&text)?,
        SummaryFormat::Json => serde_json::from_str(&text)?,
    };
    Ok(summary)
}
