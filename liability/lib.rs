#![deny(unused_variables)]
#![deny(dead_code)]
#![deny(unused_imports)]
#![deny(clippy::no_effect_underscore_binding)]
pub mod model;
pub mod normal;
pub mod power;
pub mod projector;
pub mod summary;
pub mod theoretical;

// Table and summary-file collaborators
#[path = "../io/mod.rs"]
pub mod io;

pub use model::{ConfigurationError, EstimationMethod, PowerEvidence, PowerSource, RiskModel};
pub use projector::{RiskEstimate, calculate_risk, calculate_risk_one};
pub use summary::ModelSummary;
pub use theoretical::VariantWeight;
