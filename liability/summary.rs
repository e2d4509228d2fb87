//! Read-only snapshot of a risk model's parameters.
//!
//! The struct serializes flat, with exactly the keys `r_squared`, `auc`,
//! `prevalence` and `method_used`. Writing it to disk is handled by
//! `io::summary_file`.

use crate::model::EstimationMethod;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelSummary {
    /// Liability-scale R².
    pub r_squared: f64,
    /// AUC implied by `r_squared`.
    pub auc: f64,
    /// Population prevalence of the disease.
    pub prevalence: f64,
    /// Evidence that produced `r_squared`.
    pub method_used: EstimationMethod,
}
