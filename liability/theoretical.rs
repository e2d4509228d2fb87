//! Theoretical liability-scale R² from a table of per-variant effect sizes.
//!
//! An additively coded genotype at a variant with effect-allele frequency `p`
//! has variance `2p(1 - p)`, so a variant with effect `β` contributes
//! `β² · 2p(1 - p)` to the variance of the score. The summed variance is put
//! on the liability scale with the threshold-model factor
//! `c = K(1 - K) / φ(Φ⁻¹(1 - K))²` for prevalence `K`.
//!
//! No clamping is applied here: a badly specified weight table can yield a
//! value above one, which `RiskModel` construction rejects.

use crate::model::ConfigurationError;
use crate::normal;
use ndarray::{ArrayView1, Zip};
use serde::{Deserialize, Serialize};

/// One row of a variant weight table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantWeight {
    /// Opaque variant identifier (e.g. an rsID). Uniqueness is not enforced.
    pub variant_id: String,
    /// Per-variant effect size on the log-odds scale.
    pub beta: f64,
    /// Frequency of the effect allele, in `[0, 1]`.
    pub allele_frequency: f64,
}

impl VariantWeight {
    pub fn new(variant_id: impl Into<String>, beta: f64, allele_frequency: f64) -> Self {
        Self {
            variant_id: variant_id.into(),
            beta,
            allele_frequency,
        }
    }

    /// Variance of this variant's contribution to the score, `β² · 2p(1 - p)`.
    #[inline]
    pub fn variance_contribution(&self) -> f64 {
        variance_contribution(self.beta, self.allele_frequency)
    }
}

#[inline]
fn variance_contribution(beta: f64, allele_frequency: f64) -> f64 {
    beta * beta * 2.0 * allele_frequency * (1.0 - allele_frequency)
}

/// Total genotypic-scale variance explained by the variants. Callers check
/// that the views have equal length.
fn genotypic_variance(betas: ArrayView1<f64>, allele_frequencies: ArrayView1<f64>) -> f64 {
    Zip::from(&betas)
        .and(&allele_frequencies)
        .fold(0.0, |acc, &beta, &af| acc + variance_contribution(beta, af))
}

/// Factor converting genotypic variance to liability-scale R² for prevalence `k`.
pub fn liability_scale_factor(prevalence: f64) -> f64 {
    let k = prevalence;
    let density_at_threshold = normal::pdf(normal::isf(k));
    k * (1.0 - k) / (density_at_threshold * density_at_threshold)
}

/// Liability-scale R² implied by the given effect sizes and allele frequencies.
pub fn theoretical_r2(
    betas: ArrayView1<f64>,
    allele_frequencies: ArrayView1<f64>,
    prevalence: f64,
) -> Result<f64, ConfigurationError> {
    if betas.len() != allele_frequencies.len() {
        return Err(ConfigurationError::LengthMismatch {
            betas: betas.len(),
            allele_frequencies: allele_frequencies.len(),
        });
    }

    let total_variance = genotypic_variance(betas, allele_frequencies);
    let factor = liability_scale_factor(prevalence);
    log::debug!(
        "Theoretical R²: {} variants, genotypic variance {:.6e}, liability factor {:.6}",
        betas.len(),
        total_variance,
        factor
    );
    Ok(total_variance * factor)
}
