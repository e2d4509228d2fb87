//! Projection of PRS Z-scores onto absolute disease risk.
//!
//! Liability is standard normal and disease occurs above the threshold
//! `t = Φ⁻¹(1 - K)`. A score explaining `R²` of liability shifts an
//! individual's expected liability by `z·√R²`, so their risk is
//! `1 - Φ(t - z·√R²)`.
//!
//! The 95% interval treats the Z-score as having unit standard error, scales
//! that by `√R²` like the point estimate, and maps `adjusted_z ± 1.96·√R²`
//! through the same risk transform. It is a fixed-width interval on the
//! liability scale, not a sampling interval on the probability scale.

use crate::model::RiskModel;
use crate::normal;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Width multiplier of the 95% interval on the liability scale.
pub const CI_Z_MULTIPLIER: f64 = 1.96;

/// Batches at least this large are projected in parallel.
const PARALLEL_BATCH_THRESHOLD: usize = 4096;

/// Risk summary for a single Z-score. Values are not clamped; non-finite
/// inputs propagate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskEstimate {
    pub raw_z: f64,
    pub adjusted_z: f64,
    pub absolute_risk: f64,
    pub risk_ci_lower: f64,
    pub risk_ci_upper: f64,
    pub relative_risk: f64,
    pub odds_ratio: f64,
}

/// Quantities shared by every Z-score projected under one model.
struct Projection {
    liability_threshold: f64,
    sqrt_r_squared: f64,
    prevalence: f64,
    prevalence_odds: f64,
}

impl Projection {
    fn new(model: &RiskModel) -> Self {
        let prevalence = model.prevalence();
        Self {
            // Φ⁻¹(1 - K), taken from the upper tail.
            liability_threshold: normal::isf(prevalence),
            sqrt_r_squared: model.r_squared().sqrt(),
            prevalence,
            prevalence_odds: odds(prevalence),
        }
    }

    #[inline]
    fn risk_at(&self, adjusted_z: f64) -> f64 {
        normal::sf(self.liability_threshold - adjusted_z)
    }

    fn estimate(&self, z: f64) -> RiskEstimate {
        let adjusted_z = z * self.sqrt_r_squared;
        let absolute_risk = self.risk_at(adjusted_z);

        // Unit standard error on the raw scale.
        let adjusted_se = self.sqrt_r_squared;
        let half_width = CI_Z_MULTIPLIER * adjusted_se;

        RiskEstimate {
            raw_z: z,
            adjusted_z,
            absolute_risk,
            risk_ci_lower: self.risk_at(adjusted_z - half_width),
            risk_ci_upper: self.risk_at(adjusted_z + half_width),
            relative_risk: absolute_risk / self.prevalence,
            odds_ratio: odds(absolute_risk) / self.prevalence_odds,
        }
    }
}

#[inline]
fn odds(p: f64) -> f64 {
    p / (1.0 - p)
}

/// Projects each Z-score to a [`RiskEstimate`], preserving input order.
pub fn calculate_risk(model: &RiskModel, z_scores: &[f64]) -> Vec<RiskEstimate> {
    let projection = Projection::new(model);
    log::debug!(
        "Projecting {} Z-score(s): threshold={:.6}, √R²={:.6}",
        z_scores.len(),
        projection.liability_threshold,
        projection.sqrt_r_squared
    );

    if z_scores.len() >= PARALLEL_BATCH_THRESHOLD {
        z_scores
            .par_iter()
            .map(|&z| projection.estimate(z))
            .collect()
    } else {
        z_scores.iter().map(|&z| projection.estimate(z)).collect()
    }
}

/// Projects a single Z-score.
pub fn calculate_risk_one(model: &RiskModel, z: f64) -> RiskEstimate {
    Projection::new(model).estimate(z)
}
