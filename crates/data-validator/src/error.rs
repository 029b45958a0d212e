//! Validation Error Types

use thiserror::Error;

/// Errors raised when a signal is not fit for feature extraction
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Signal contains no samples
    #[error("Signal is empty")]
    Empty,

    /// Sample is NaN or infinite
    #[error("Sample {index} is not finite: {value}")]
    NonFinite { index: usize, value: f64 },

    /// Sample magnitude above the configured limit
    #[error("Sample {index} value {value} exceeds amplitude limit {limit}")]
    OutOfRange { index: usize, value: f64, limit: f64 },
}
