//! Typed errors for the wellness core.
//!
//! Config/bootstrap code keeps using `anyhow`; this enum is what the
//! entry model and the recommendation engine return to their callers.

use thiserror::Error;

use crate::entry::Metric;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WellnessError {
    /// Caller broke a precondition (e.g. an empty recommendation window).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A self-reported metric outside the 1..=10 scale.
    #[error("{metric} must be between 1 and 10, got {value}")]
    OutOfRange { metric: Metric, value: u8 },
}

pub type Result<T> = std::result::Result<T, WellnessError>;
