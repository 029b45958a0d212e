//! Signal Validator

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Validation configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Largest accepted absolute sample value (unbounded when `None`)
    pub max_abs_amplitude: Option<f64>,
}

/// Validator for raw sample sequences
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Get the active configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a single sample at `index`
    pub fn validate_sample(&self, index: usize, value: f64) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NonFinite { index, value });
        }

        match self.config.max_abs_amplitude {
            Some(limit) if value.abs() > limit => {
                Err(ValidationError::OutOfRange { index, value, limit })
            }
            _ => Ok(()),
        }
    }

    /// Validate a whole signal, stopping at the first bad sample
    pub fn validate_signal(&self, samples: &[f64]) -> Result<(), ValidationError> {
        if samples.is_empty() {
            return Err(ValidationError::Empty);
        }

        for (index, &value) in samples.iter().enumerate() {
            self.validate_sample(index, value)?;
        }

        debug!("Validated {} samples", samples.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_signal() {
        let validator = Validator::default();
        assert_eq!(validator.validate_signal(&[]), Err(ValidationError::Empty));
    }

    #[test]
    fn test_finite_signal() {
        let validator = Validator::default();
        assert!(validator.validate_signal(&[1.0, -2.5, 0.0, 1e300]).is_ok());
    }

    #[test]
    fn test_nan_reports_index() {
        let validator = Validator::default();
        match validator.validate_signal(&[1.0, 2.0, f64::NAN]) {
            Err(ValidationError::NonFinite { index, value }) => {
                assert_eq!(index, 2);
                assert!(value.is_nan());
            }
            other => panic!("expected NonFinite, got {:?}", other),
        }
    }

    #[test]
    fn test_infinity_rejected() {
        let validator = Validator::default();
        assert!(validator.validate_signal(&[f64::NEG_INFINITY]).is_err());
        assert!(validator.validate_signal(&[0.0, f64::INFINITY]).is_err());
    }

    #[test]
    fn test_amplitude_limit() {
        let validator = Validator::new(ValidationConfig {
            max_abs_amplitude: Some(10.0),
        });
        assert!(validator.validate_signal(&[10.0, -10.0]).is_ok());
        assert_eq!(
            validator.validate_signal(&[1.0, -10.5]),
            Err(ValidationError::OutOfRange {
                index: 1,
                value: -10.5,
                limit: 10.0,
            })
        );
    }

    proptest! {
        #[test]
        fn prop_finite_signals_pass(samples in prop::collection::vec(-1e9f64..1e9, 1..200)) {
            prop_assert!(Validator::default().validate_signal(&samples).is_ok());
        }

        #[test]
        fn prop_any_nan_fails(
            mut samples in prop::collection::vec(-1e9f64..1e9, 1..200),
            pos in any::<prop::sample::Index>(),
        ) {
            let i = pos.index(samples.len());
            samples[i] = f64::NAN;
            let is_non_finite = matches!(
                Validator::default().validate_signal(&samples),
                Err(ValidationError::NonFinite { .. })
            );
            prop_assert!(is_non_finite);
        }
    }
}
