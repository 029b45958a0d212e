//! Signal Validation
//!
//! Checks that a sample sequence is non-empty, finite, and within the
//! configured amplitude limit before feature extraction.

mod error;
mod validator;

pub use error::ValidationError;
pub use validator::{ValidationConfig, Validator};
