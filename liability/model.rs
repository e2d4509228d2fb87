use crate::power::{MAX_REPRESENTABLE_AUC, auc_to_r2, r2_to_auc};
use crate::summary::ModelSummary;
use crate::theoretical::{VariantWeight, theoretical_r2};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Tolerance used when checking a stored AUC against the one recomputed from R².
const STORED_AUC_TOLERANCE: f64 = 1e-9;

// --- Public Data Structures ---

/// Which kind of evidence produced a model's R².
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EstimationMethod {
    /// Liability-scale R² reported directly by a validation study.
    #[serde(rename = "direct_r2")]
    DirectR2,
    /// R² converted from a reported AUC.
    #[serde(rename = "converted_auc")]
    ConvertedAuc,
    /// R² derived from per-variant effect sizes and allele frequencies.
    #[serde(rename = "theoretical")]
    Theoretical,
}

impl EstimationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            EstimationMethod::DirectR2 => "direct_r2",
            EstimationMethod::ConvertedAuc => "converted_auc",
            EstimationMethod::Theoretical => "theoretical",
        }
    }
}

impl fmt::Display for EstimationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exactly one source of predictive power for a model.
#[derive(Debug, Clone, PartialEq)]
pub enum PowerSource {
    RSquared(f64),
    Auc(f64),
    Weights(Vec<VariantWeight>),
}

/// Optional evidence gathered from a caller that may supply several sources.
///
/// [`PowerEvidence::into_source`] picks the most authoritative one present:
/// an empirical R² over a converted AUC over a theoretical weight table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PowerEvidence {
    pub r_squared: Option<f64>,
    pub auc: Option<f64>,
    pub weights: Option<Vec<VariantWeight>>,
}

impl PowerEvidence {
    pub fn into_source(self) -> Result<PowerSource, ConfigurationError> {
        if let Some(r2) = self.r_squared {
            return Ok(PowerSource::RSquared(r2));
        }
        if let Some(auc) = self.auc {
            return Ok(PowerSource::Auc(auc));
        }
        match self.weights {
            Some(weights) if !weights.is_empty() => Ok(PowerSource::Weights(weights)),
            _ => Err(ConfigurationError::MissingPowerSource),
        }
    }
}

/// Errors raised while building a [`RiskModel`]. Nothing is built unless every
/// constraint holds.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("Prevalence must lie strictly between 0 and 1, got {0}")]
    PrevalenceOutOfRange(f64),
    #[error("R² must lie between 0 and 1, got {0}")]
    RSquaredOutOfRange(f64),
    #[error(
        "AUC must lie between 0.5 and {ceiling:.4}, got {0}. Larger AUCs imply R² > 1 on the liability scale.",
        ceiling = MAX_REPRESENTABLE_AUC
    )]
    AucOutOfRange(f64),
    #[error(
        "AUC {auc} converts to R² = {r_squared}, above 1; the largest AUC representable on the liability scale is {ceiling:.4}",
        ceiling = MAX_REPRESENTABLE_AUC
    )]
    AucAboveLiabilityCeiling { auc: f64, r_squared: f64 },
    #[error("Allele frequency of variant '{variant_id}' must lie between 0 and 1, got {value}")]
    AlleleFrequencyOutOfRange { variant_id: String, value: f64 },
    #[error(
        "The {method} estimate produced R² = {value}, which lies outside [0, 1]. The input cannot be represented on the liability scale."
    )]
    DerivedRSquaredOutOfRange {
        method: EstimationMethod,
        value: f64,
    },
    #[error(
        "Effect size and allele frequency arrays differ in length ({betas} vs {allele_frequencies})"
    )]
    LengthMismatch {
        betas: usize,
        allele_frequencies: usize,
    },
    #[error(
        "No predictive-power source was supplied. Provide an R², an AUC, or a non-empty variant weight table."
    )]
    MissingPowerSource,
}

/// A validated, immutable liability threshold model.
///
/// `auc` is never stored independently: it is always recomputed from
/// `r_squared`, including when an AUC was the original input.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskModel {
    prevalence: f64,
    r_squared: f64,
    auc: f64,
    method_used: EstimationMethod,
}

impl RiskModel {
    /// Validates the inputs and builds a model from one power source.
    pub fn new(prevalence: f64, source: PowerSource) -> Result<Self, ConfigurationError> {
        if !(prevalence > 0.0 && prevalence < 1.0) {
            return Err(ConfigurationError::PrevalenceOutOfRange(prevalence));
        }

        let (r_squared, method_used) = match source {
            PowerSource::RSquared(r2) => {
                if !(0.0..=1.0).contains(&r2) {
                    return Err(ConfigurationError::RSquaredOutOfRange(r2));
                }
                (r2, EstimationMethod::DirectR2)
            }
            PowerSource::Auc(auc) => {
                if !(0.5..=1.0).contains(&auc) {
                    return Err(ConfigurationError::AucOutOfRange(auc));
                }
                let r_squared = auc_to_r2(auc);
                if r_squared > 1.0 {
                    return Err(ConfigurationError::AucAboveLiabilityCeiling { auc, r_squared });
                }
                (r_squared, EstimationMethod::ConvertedAuc)
            }
            PowerSource::Weights(weights) => {
                if weights.is_empty() {
                    return Err(ConfigurationError::MissingPowerSource);
                }
                validate_weights(&weights)?;
                let betas: Array1<f64> = weights.iter().map(|w| w.beta).collect();
                let afs: Array1<f64> = weights.iter().map(|w| w.allele_frequency).collect();
                (
                    theoretical_r2(betas.view(), afs.view(), prevalence)?,
                    EstimationMethod::Theoretical,
                )
            }
        };

        // Converted and theoretical estimates get the same range check as a direct R².
        if !(0.0..=1.0).contains(&r_squared) {
            return Err(ConfigurationError::DerivedRSquaredOutOfRange {
                method: method_used,
                value: r_squared,
            });
        }

        let model = Self {
            prevalence,
            r_squared,
            auc: r2_to_auc(r_squared),
            method_used,
        };
        log::info!(
            "Built risk model: prevalence={}, R²={:.6}, AUC={:.6}, method={}",
            model.prevalence,
            model.r_squared,
            model.auc,
            model.method_used
        );
        Ok(model)
    }

    pub fn from_r_squared(prevalence: f64, r_squared: f64) -> Result<Self, ConfigurationError> {
        Self::new(prevalence, PowerSource::RSquared(r_squared))
    }

    pub fn from_auc(prevalence: f64, auc: f64) -> Result<Self, ConfigurationError> {
        Self::new(prevalence, PowerSource::Auc(auc))
    }

    pub fn from_weights(
        prevalence: f64,
        weights: Vec<VariantWeight>,
    ) -> Result<Self, ConfigurationError> {
        Self::new(prevalence, PowerSource::Weights(weights))
    }

    /// Builds a model from optional evidence, applying the R² > AUC > weights precedence.
    pub fn from_evidence(
        prevalence: f64,
        evidence: PowerEvidence,
    ) -> Result<Self, ConfigurationError> {
        let source = evidence.into_source()?;
        Self::new(prevalence, source)
    }

    /// Rebuilds a model from a stored summary.
    ///
    /// Prevalence and R² are re-validated and the AUC is recomputed; the stored
    /// AUC is only compared against it. The stored method is kept so that a
    /// reloaded model reports the evidence it was originally built from.
    pub fn from_summary(summary: &ModelSummary) -> Result<Self, ConfigurationError> {
        let rebuilt = Self::from_r_squared(summary.prevalence, summary.r_squared)?;
        if (rebuilt.auc - summary.auc).abs() > STORED_AUC_TOLERANCE {
            log::warn!(
                "Stored AUC {} does not match the AUC {} implied by R² = {}; using the recomputed value.",
                summary.auc,
                rebuilt.auc,
                summary.r_squared
            );
        }
        Ok(Self {
            method_used: summary.method_used,
            ..rebuilt
        })
    }

    pub fn prevalence(&self) -> f64 {
        self.prevalence
    }

    pub fn r_squared(&self) -> f64 {
        self.r_squared
    }

    pub fn auc(&self) -> f64 {
        self.auc
    }

    pub fn method_used(&self) -> EstimationMethod {
        self.method_used
    }

    /// Read-only snapshot of the model parameters.
    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            r_squared: self.r_squared,
            auc: self.auc,
            prevalence: self.prevalence,
            method_used: self.method_used,
        }
    }
}

fn validate_weights(weights: &[VariantWeight]) -> Result<(), ConfigurationError> {
    for w in weights {
        if !(0.0..=1.0).contains(&w.allele_frequency) {
            return Err(ConfigurationError::AlleleFrequencyOutOfRange {
                variant_id: w.variant_id.clone(),
                value: w.allele_frequency,
            });
        }
    }

    let mut seen = HashSet::with_capacity(weights.len());
    let duplicates = weights
        .iter()
        .filter(|w| !seen.insert(w.variant_id.as_str()))
        .count();
    if duplicates > 0 {
        log::warn!(
            "Variant weight table contains {duplicates} duplicated variant ID(s); every row is counted."
        );
    }
    Ok(())
}
