//! Feature Engine Error Types

use data_validator::ValidationError;
use thiserror::Error;

/// Errors raised by extractor creation and computation
#[derive(Debug, Error)]
pub enum FeatureError {
    /// Signal rejected before computation (empty, non-finite, out of range)
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// Engine failed mid-computation; the extractor remains usable
    #[error("Feature computation failed: {0}")]
    ComputeFailure(String),

    /// Could not allocate resources for a new extractor
    #[error("Resource exhaustion: {0}")]
    ResourceExhaustion(String),

    /// Extractor configuration rejected
    #[error("Invalid extractor configuration: {0}")]
    InvalidConfig(String),
}
