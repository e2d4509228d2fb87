//! Standard-normal primitives used by the liability threshold model.
//!
//! Everything is expressed through the complementary error function so that
//! upper-tail probabilities for rare diseases (prevalence well below 1%) keep
//! their relative precision instead of being computed as `1 - Φ(x)`.
//!
//! `erfc` comes from `libm`, which is accurate to about one ulp; the inverse
//! comes from `statrs`. Together `sf(isf(q))` returns `q` to within a few ulps.

use libm::erfc;
use statrs::function::erf::erfc_inv;
use std::f64::consts::{PI, SQRT_2};

/// Cumulative distribution function Φ(x).
#[inline]
pub fn cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Survival function 1 - Φ(x), evaluated directly on the upper tail.
#[inline]
pub fn sf(x: f64) -> f64 {
    0.5 * erfc(x / SQRT_2)
}

/// Quantile function Φ⁻¹(p). Returns `-inf` at `p = 0` and `+inf` at `p = 1`.
#[inline]
pub fn quantile(p: f64) -> f64 {
    -SQRT_2 * erfc_inv(2.0 * p)
}

/// Inverse survival function: the `x` with `1 - Φ(x) = q`.
#[inline]
pub fn isf(q: f64) -> f64 {
    SQRT_2 * erfc_inv(2.0 * q)
}

/// Density φ(x).
#[inline]
pub fn pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}
