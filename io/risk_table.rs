//! Writer for projected risks.

use crate::projector::RiskEstimate;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const RISK_COLUMNS: &str =
    "raw_z\tadjusted_z\tabsolute_risk\trisk_ci_lower\trisk_ci_upper\trelative_risk\todds_ratio";

/// Writes one row per estimate, in order, as a tab-separated table.
///
/// When `sample_ids` is given it must be parallel to `estimates` and becomes a
/// leading `sample_id` column.
pub fn write_risk_table(
    path: impl AsRef<Path>,
    sample_ids: Option<&[String]>,
    estimates: &[RiskEstimate],
) -> Result<(), std::io::Error> {
    let path = path.as_ref();
    if let Some(ids) = sample_ids {
        if ids.len() != estimates.len() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!(
                    "{} sample IDs supplied for {} risk estimates",
                    ids.len(),
                    estimates.len()
                ),
            ));
        }
    }

    let mut writer = BufWriter::new(File::create(path)?);
    write_rows(&mut writer, sample_ids, estimates)?;
    writer.flush()?;
    log::info!("Wrote {} risk estimates to {}", estimates.len(), path.display());
    Ok(())
}

fn write_rows<W: Write>(
    writer: &mut W,
    sample_ids: Option<&[String]>,
    estimates: &[RiskEstimate],
) -> Result<(), std::io::Error> {
    match sample_ids {
        Some(_) => writeln!(writer, "sample_id\t{RISK_COLUMNS}")?,
        None => writeln!(writer, "{RISK_COLUMNS}")?,
    }

    for (i, est) in estimates.iter().enumerate() {
        if let Some(ids) = sample_ids {
            write!(writer, "{}\t", ids[i])?;
        }
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            est.raw_z,
            est.adjusted_z,
            est.absolute_risk,
            est.risk_ci_lower,
            est.risk_ci_upper,
            est.relative_risk,
            est.odds_ratio
        )?;
    }
    Ok(())
}
