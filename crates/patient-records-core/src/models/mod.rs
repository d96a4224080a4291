//! Domain models for patient records.

pub mod metrics;
mod patient;
mod update;
mod validation;

pub use metrics::Verdict;
pub use patient::*;
pub use update::*;
pub use validation::*;
