//! # Tab-Delimited Table Reading
//!
//! Shared reader for the tab-separated inputs of the tool. Column names are
//! fixed by each caller and matched case-sensitively; extra columns are
//! ignored. Failures are assumed to be user-input errors, so `TableError`
//! names the offending column (and row, where there is one).

use polars::prelude::*;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Error from the underlying Polars DataFrame library: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error(
        "The required column '{0}' was not found in the input file. Please check spelling and case."
    )]
    ColumnNotFound(String),
    #[error(
        "The required column '{column_name}' could not be read as {expected_type} (found type: {found_type})"
    )]
    ColumnWrongType {
        column_name: String,
        expected_type: &'static str,
        found_type: String,
    },
    #[error(
        "Missing or null values were found in the required column '{0}'. Every row must be complete."
    )]
    MissingValuesFound(String),
    #[error("Non-finite values (NaN or Infinity) were found in the required column '{0}'.")]
    NonFiniteValuesFound(String),
    #[error(
        "Allele frequency {value} for variant '{variant_id}' (row {row}) must lie between 0 and 1."
    )]
    AlleleFrequencyOutOfRange {
        variant_id: String,
        row: usize,
        value: f64,
    },
}

/// Reads a headed, tab-separated file and checks that every required column exists.
pub(crate) fn read_tsv(path: &Path, required_cols: &[&str]) -> Result<DataFrame, TableError> {
    log::info!("Loading table from '{}'", path.display());

    let df = CsvReader::new(File::open(path)?)
        .with_options(
            CsvReadOptions::default()
                .with_has_header(true)
                .with_parse_options(CsvParseOptions::default().with_separator(b'\t')),
        )
        .finish()?;

    let columns_set: HashSet<String> = df
        .get_column_names()
        .into_iter()
        .map(|s| s.to_string())
        .collect();
    for col_name in required_cols {
        if !columns_set.contains(*col_name) {
            return Err(TableError::ColumnNotFound(col_name.to_string()));
        }
    }

    log::debug!("Read {} rows with columns {:?}", df.height(), columns_set);
    Ok(df)
}

/// Returns true if the frame has a column with exactly this name.
pub(crate) fn has_column(df: &DataFrame, column_name: &str) -> bool {
    df.get_column_names().iter().any(|c| c.as_str() == column_name)
}

/// Extracts a complete, finite numeric column.
pub(crate) fn extract_numeric_column(
    df: &DataFrame,
    column_name: &str,
) -> Result<Vec<f64>, TableError> {
    let series = df.column(column_name)?;
    if series.null_count() > 0 {
        return Err(TableError::MissingValuesFound(column_name.to_string()));
    }

    let wrong_type = || TableError::ColumnWrongType {
        column_name: column_name.to_string(),
        expected_type: "f64 (numeric)",
        found_type: format!("{:?}", series.dtype()),
    };

    let casted = series.cast(&DataType::Float64).map_err(|_| wrong_type())?;
    // Strings that fail to parse become nulls rather than errors.
    if casted.null_count() > 0 {
        return Err(wrong_type());
    }

    let chunked = casted.f64()?.rechunk();
    let values: Vec<f64> = chunked.into_no_null_iter().collect();
    if values.iter().any(|v| !v.is_finite()) {
        return Err(TableError::NonFiniteValuesFound(column_name.to_string()));
    }
    Ok(values)
}

/// Extracts a complete column as text, whatever type Polars inferred for it.
pub(crate) fn extract_text_column(
    df: &DataFrame,
    column_name: &str,
) -> Result<Vec<String>, TableError> {
    let series = df.column(column_name)?;
    if series.null_count() > 0 {
        return Err(TableError::MissingValuesFound(column_name.to_string()));
    }

    let casted = series
        .cast(&DataType::String)
        .map_err(|_| TableError::ColumnWrongType {
            column_name: column_name.to_string(),
            expected_type: "text",
            found_type: format!("{:?}", series.dtype()),
        })?;
    let values = casted
        .as_materialized_series()
        .str()?
        .into_iter()
        .map(|v| v.unwrap_or_default().to_string())
        .collect();
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_tsv(content: &str) -> std::io::Result<NamedTempFile> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "{}", content)?;
        file.flush()?;
        Ok(file)
    }

    #[test]
    fn test_missing_required_column() {
        let file = create_test_tsv("a\tb\n1\t2").unwrap();
        match read_tsv(file.path(), &["a", "c"]) {
            Err(TableError::ColumnNotFound(col)) => assert_eq!(col, "c"),
            other => panic!("Expected ColumnNotFound(c), got {:?}", other),
        }
    }

    #[test]
    fn test_numeric_and_text_extraction() {
        let file = create_test_tsv("id\tx\textra\nrs1\t0.5\tfoo\nrs2\t-1.25\tbar").unwrap();
        let df = read_tsv(file.path(), &["id", "x"]).unwrap();
        assert!(has_column(&df, "extra"));
        assert!(!has_column(&df, "EXTRA"));
        assert_eq!(extract_numeric_column(&df, "x").unwrap(), vec![0.5, -1.25]);
        assert_eq!(extract_text_column(&df, "id").unwrap(), vec!["rs1", "rs2"]);
    }

    #[test]
    fn test_integer_ids_are_read_as_text() {
        let file = create_test_tsv("id\tx\n101\t1\n102\t2").unwrap();
        let df = read_tsv(file.path(), &["id", "x"]).unwrap();
        assert_eq!(extract_text_column(&df, "id").unwrap(), vec!["101", "102"]);
        assert_eq!(extract_numeric_column(&df, "x").unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_non_numeric_value_is_wrong_type() {
        let file = create_test_tsv("x\n1.0\nnot_a_number").unwrap();
        let df = read_tsv(file.path(), &["x"]).unwrap();
        match extract_numeric_column(&df, "x") {
            Err(TableError::ColumnWrongType { column_name, .. }) => assert_eq!(column_name, "x"),
            other => panic!("Expected ColumnWrongType, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_value_is_rejected() {
        let file = create_test_tsv("x\ty\n1.0\t\n2.0\t3.0").unwrap();
        let df = read_tsv(file.path(), &["x", "y"]).unwrap();
        match extract_numeric_column(&df, "y") {
            Err(TableError::MissingValuesFound(col)) => assert_eq!(col, "y"),
            other => panic!("Expected MissingValuesFound(y), got {:?}", other),
        }
    }
}
