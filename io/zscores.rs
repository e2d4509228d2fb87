//! Loader for per-individual PRS Z-scores.
//!
//! Expects a tab-delimited file with a `score` column. An optional
//! `sample_id` column is carried through to the output; without it, rows are
//! numbered from 1.

use crate::io::table::{
    TableError, extract_numeric_column, extract_text_column, has_column, read_tsv,
};
use std::path::Path;

pub const SCORE_COLUMN: &str = "score";
pub const SAMPLE_ID_COLUMN: &str = "sample_id";

#[derive(Debug, Clone, PartialEq)]
pub struct ZScoreTable {
    pub sample_ids: Vec<String>,
    pub z_scores: Vec<f64>,
}

pub fn load_z_scores(path: impl AsRef<Path>) -> Result<ZScoreTable, TableError> {
    let df = read_tsv(path.as_ref(), &[SCORE_COLUMN])?;
    let z_scores = extract_numeric_column(&df, SCORE_COLUMN)?;

    let sample_ids = if has_column(&df, SAMPLE_ID_COLUMN) {
        extract_text_column(&df, SAMPLE_ID_COLUMN)?
    } else {
        (1..=z_scores.len()).map(|i| i.to_string()).collect()
    };

    log::info!("Loaded {} Z-scores", z_scores.len());
    Ok(ZScoreTable {
        sample_ids,
        z_scores,
    })
}
