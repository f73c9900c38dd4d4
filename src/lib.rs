//! Student Stress Estimator
//!
//! A lifestyle-based stress calculator: five slider inputs feed a weighted
//! score, the score is bucketed into Low/Moderate/High, and the result is
//! served behind a simulated model latency together with the static survey
//! insights shown on the awareness page.

pub mod api;
pub mod config;
pub mod error;
pub mod estimator;
pub mod insights;
pub mod interpretation;
pub mod model;

pub use config::AppConfig;
pub use error::{EstimatorError, Result};
pub use estimator::{EstimatorState, PendingEstimate, StressEstimator};
pub use model::{Estimate, InputField, StressInputs, StressLevel, StressModel};
