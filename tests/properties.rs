//! Seeded random checks of the conversion and projection properties.

use absrisk::power::{auc_to_r2, r2_to_auc};
use absrisk::theoretical::theoretical_r2;
use absrisk::{RiskModel, calculate_risk};
use approx::assert_relative_eq;
use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn auc_round_trip_holds_on_open_interval() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..1000 {
        let auc: f64 = rng.gen_range(0.5001..0.9999);
        assert_relative_eq!(r2_to_auc(auc_to_r2(auc)), auc, epsilon = 1e-9);
    }
}

#[test]
fn theoretical_r2_grows_with_effect_magnitude() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let n = rng.gen_range(1..20);
        let mut betas: Array1<f64> = (0..n).map(|_| rng.gen_range(-0.5..0.5)).collect();
        let afs: Array1<f64> = (0..n).map(|_| rng.gen_range(0.0..=1.0)).collect();
        let prevalence: f64 = rng.gen_range(0.001..0.5);
        let target = rng.gen_range(0..n);

        let before = theoretical_r2(betas.view(), afs.view(), prevalence).unwrap();
        let grown = betas[target].abs() + rng.gen_range(0.0..0.5);
        betas[target] = if rng.gen_bool(0.5) { grown } else { -grown };
        let after = theoretical_r2(betas.view(), afs.view(), prevalence).unwrap();

        assert!(
            after >= before,
            "R² fell from {before} to {after} after increasing |beta|"
        );
    }
}

#[test]
fn risk_is_strictly_increasing_in_z() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..50 {
        let prevalence: f64 = rng.gen_range(0.005..0.5);
        let r2: f64 = rng.gen_range(0.01..1.0);
        let model = RiskModel::from_r_squared(prevalence, r2).unwrap();

        let mut z_scores: Vec<f64> = (0..100).map(|_| rng.gen_range(-3.0..3.0)).collect();
        z_scores.sort_by(|a, b| a.total_cmp(b));
        z_scores.dedup();

        let estimates = calculate_risk(&model, &z_scores);
        for pair in estimates.windows(2) {
            assert!(
                pair[1].absolute_risk > pair[0].absolute_risk,
                "risk not increasing between z={} and z={}",
                pair[0].raw_z,
                pair[1].raw_z
            );
        }
    }
}
