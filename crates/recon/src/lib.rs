//! `payrec-recon` — Bank-to-ERP accounts-payable reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded records, returns classified results.
//! No CLI or network dependencies.

pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod normalize;
pub mod selector;
pub mod similarity;
pub mod stats;

pub use config::ReconConfig;
pub use engine::run;
pub use error::ReconError;
pub use model::{MatchResult, MatchStatus, ReconInput, ReconResult, ReconStats};
