//! File-facing collaborators of the risk engine: weight tables, Z-score
//! tables, risk tables and model summaries. Nothing here is needed to build a
//! model or project scores; these only move data between disk and the core.

pub mod risk_table;
pub mod summary_file;
pub mod table;
pub mod weights;
pub mod zscores;
