//! Conversion between liability-scale R² and AUC.
//!
//! A score with discrimination `AUC` is assigned the liability-scale
//! `R² = 2z² / (π + z²)` with `z = Φ⁻¹(AUC)`. The reverse map solves that
//! relation for `z`, giving `AUC = Φ(√(π·R² / (2 - R²)))`, so the two are exact
//! inverses of each other: `[0.5, Φ(√π)]` maps onto `[0, 1]`.

use crate::normal;
use std::f64::consts::PI;

/// Value of `2z² / (π + z²)` in the limit `z → ∞`, i.e. the image of `AUC = 1`.
pub const AUC_TO_R2_LIMIT: f64 = 2.0;

/// Largest AUC whose converted R² stays within `[0, 1]`: `Φ(√π)`.
pub const MAX_REPRESENTABLE_AUC: f64 = 0.9618403752710152;

/// Converts an AUC into the equivalent liability-scale R².
///
/// `auc = 0.5` maps to exactly zero. `auc = 1` has an infinite probit and is
/// mapped to the finite limit [`AUC_TO_R2_LIMIT`]; since that lies outside
/// `[0, 1]`, model construction rejects it along with every other AUC whose
/// converted R² exceeds one.
pub fn auc_to_r2(auc: f64) -> f64 {
    let z = normal::quantile(auc);
    if z.is_infinite() {
        return AUC_TO_R2_LIMIT;
    }
    let z2 = z * z;
    2.0 * z2 / (PI + z2)
}

/// Converts a liability-scale R² into the equivalent AUC.
///
/// Finite for every `r2` in `[0, 1]`; `r2 = 1` maps to `Φ(√π) ≈ 0.9618`.
pub fn r2_to_auc(r2: f64) -> f64 {
    normal::cdf((PI * r2 / (2.0 - r2)).sqrt())
}
