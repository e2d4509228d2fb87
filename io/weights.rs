//! Loader for variant weight tables.
//!
//! The file is tab-delimited with a header containing at least `VARIANT`,
//! `BETA` and `AF`. Allele frequencies are range-checked here, before any
//! estimator sees them.

use crate::io::table::{TableError, extract_numeric_column, extract_text_column, read_tsv};
use crate::theoretical::VariantWeight;
use std::path::Path;

pub const VARIANT_COLUMN: &str = "VARIANT";
pub const BETA_COLUMN: &str = "BETA";
pub const AF_COLUMN: &str = "AF";

pub fn load_variant_weights(path: impl AsRef<Path>) -> Result<Vec<VariantWeight>, TableError> {
    let df = read_tsv(path.as_ref(), &[VARIANT_COLUMN, BETA_COLUMN, AF_COLUMN])?;

    let ids = extract_text_column(&df, VARIANT_COLUMN)?;
    let betas = extract_numeric_column(&df, BETA_COLUMN)?;
    let afs = extract_numeric_column(&df, AF_COLUMN)?;

    let weights: Vec<VariantWeight> = ids
        .into_iter()
        .zip(betas)
        .zip(afs)
        .enumerate()
        .map(|(i, ((variant_id, beta), af))| {
            if !(0.0..=1.0).contains(&af) {
                return Err(TableError::AlleleFrequencyOutOfRange {
                    variant_id,
                    row: i + 1,
                    value: af,
                });
            }
            Ok(VariantWeight::new(variant_id, beta, af))
        })
        .collect::<Result<_, _>>()?;

    log::info!("Loaded {} variant weights", weights.len());
    Ok(weights)
}
