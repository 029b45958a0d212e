//! Feature Vector Assembly

use crate::config::ExtractorConfig;
use crate::fft::FftAnalyzer;
use crate::statistics::StatisticalFeatures;
use crate::FeatureError;
use data_validator::Validator;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Number of features in the vector
pub const FEATURE_DIMENSION: usize = 4;

/// Feature names in vector order
pub const FEATURE_NAMES: [&str; FEATURE_DIMENSION] =
    ["rms", "peak", "zero_crossing_rate", "dominant_frequency"];

/// Fixed-length feature vector produced for one signal.
///
/// Field order is the vector order used by [`FeatureVector::to_array`]
/// and the C ABI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Root-mean-square amplitude
    pub rms: f64,
    /// Peak absolute amplitude
    pub peak: f64,
    /// Zero crossings per sample interval
    pub zero_crossing_rate: f64,
    /// Strongest non-DC frequency (Hz)
    pub dominant_frequency: f64,
}

impl FeatureVector {
    /// Values in vector order
    pub fn to_array(&self) -> [f64; FEATURE_DIMENSION] {
        [
            self.rms,
            self.peak,
            self.zero_crossing_rate,
            self.dominant_frequency,
        ]
    }

    /// Values paired with their names
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> {
        FEATURE_NAMES.into_iter().zip(self.to_array())
    }
}

impl From<FeatureVector> for [f64; FEATURE_DIMENSION] {
    fn from(features: FeatureVector) -> Self {
        features.to_array()
    }
}

impl From<FeatureVector> for Vec<f64> {
    fn from(features: FeatureVector) -> Self {
        features.to_array().to_vec()
    }
}

/// Capability interface for feature extraction engines
pub trait FeatureExtractor {
    /// Compute the feature vector of a non-empty, finite signal
    fn compute(&mut self, signal: &[f64]) -> Result<FeatureVector, FeatureError>;
}

/// Default extractor: time-domain statistics plus FFT dominant frequency.
///
/// Dropping the extractor releases its planner cache and scratch buffer.
pub struct SignalFeatureExtractor {
    config: ExtractorConfig,
    validator: Validator,
    fft_analyzer: FftAnalyzer,
    computations: u64,
}

impl SignalFeatureExtractor {
    /// Create a new feature extractor
    pub fn new(config: ExtractorConfig) -> Result<Self, FeatureError> {
        config.validate()?;

        let fft_analyzer = FftAnalyzer::new(&config)?;

        debug!(
            "Created feature extractor: sample_rate={} window={:?}",
            config.sample_rate, config.window
        );

        Ok(Self {
            validator: Validator::new(config.validation.clone()),
            config,
            fft_analyzer,
            computations: 0,
        })
    }

    /// Create an extractor with the default configuration
    pub fn with_defaults() -> Result<Self, FeatureError> {
        Self::new(ExtractorConfig::default())
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Successful computations served so far
    pub fn computations(&self) -> u64 {
        self.computations
    }
}

impl FeatureExtractor for SignalFeatureExtractor {
    fn compute(&mut self, signal: &[f64]) -> Result<FeatureVector, FeatureError> {
        self.validator.validate_signal(signal)?;

        let stats = StatisticalFeatures::compute(signal);
        let spectral = self.fft_analyzer.analyze(signal)?;

        debug!(
            "Computed features over {} samples: rms={:.6} dominant={:.6}Hz",
            signal.len(),
            stats.rms,
            spectral.dominant_frequency
        );

        self.computations += 1;

        Ok(FeatureVector {
            rms: stats.rms,
            peak: stats.peak,
            zero_crossing_rate: stats.zero_crossing_rate,
            dominant_frequency: spectral.dominant_frequency,
        })
    }
}

impl Drop for SignalFeatureExtractor {
    fn drop(&mut self) {
        debug!(
            "Releasing feature extractor after {} computations",
            self.computations
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_validator::{ValidationConfig, ValidationError};
    use proptest::prelude::*;

    fn round6(v: f64) -> f64 {
        (v * 1e6).round() / 1e6
    }

    #[test]
    fn test_regression_fixture() {
        let mut extractor = SignalFeatureExtractor::with_defaults().unwrap();
        let features = extractor.compute(&[1.0, 2.0, 3.0]).unwrap();

        let rounded: Vec<f64> = features.to_array().iter().map(|&v| round6(v)).collect();
        assert_eq!(rounded, vec![2.160247, 3.0, 0.0, 0.333333]);
    }

    #[test]
    fn test_sine_features() {
        let mut extractor =
            SignalFeatureExtractor::new(ExtractorConfig::with_sample_rate(1000.0)).unwrap();

        // 50 Hz, amplitude 2, whole number of periods
        let signal: Vec<f64> = (0..1000)
            .map(|i| 2.0 * (2.0 * std::f64::consts::PI * 50.0 * i as f64 / 1000.0).sin())
            .collect();

        let features = extractor.compute(&signal).unwrap();
        assert!((features.rms - 2.0 / 2f64.sqrt()).abs() < 1e-6);
        assert!((features.peak - 2.0).abs() < 1e-6);
        assert!((features.dominant_frequency - 50.0).abs() < 1e-9);
        // Two crossings per period, 50 periods
        assert!((features.zero_crossing_rate - 100.0 / 999.0).abs() < 2.0 / 999.0);
    }

    #[test]
    fn test_empty_signal_is_invalid_input() {
        let mut extractor = SignalFeatureExtractor::with_defaults().unwrap();
        assert!(matches!(
            extractor.compute(&[]),
            Err(FeatureError::InvalidInput(ValidationError::Empty))
        ));
    }

    #[test]
    fn test_handle_usable_after_failure() {
        let mut extractor = SignalFeatureExtractor::with_defaults().unwrap();
        assert!(extractor.compute(&[1.0, f64::NAN]).is_err());
        assert!(extractor.compute(&[1.0, 2.0]).is_ok());
        assert_eq!(extractor.computations(), 1);
    }

    #[test]
    fn test_amplitude_limit_from_config() {
        let config = ExtractorConfig {
            validation: ValidationConfig {
                max_abs_amplitude: Some(1.0),
            },
            ..Default::default()
        };
        let mut extractor = SignalFeatureExtractor::new(config).unwrap();
        assert!(matches!(
            extractor.compute(&[0.5, 2.0]),
            Err(FeatureError::InvalidInput(ValidationError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn test_large_finite_samples() {
        let mut extractor = SignalFeatureExtractor::with_defaults().unwrap();
        let features = extractor.compute(&[1e200, -1e200, 1e200, -1e200]).unwrap();
        assert_eq!(features.rms, 1e200);
        assert_eq!(features.peak, 1e200);
        assert_eq!(features.zero_crossing_rate, 1.0);
        assert!((features.dominant_frequency - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_scratch_exhaustion_on_create() {
        let config = ExtractorConfig {
            scratch_capacity: usize::MAX,
            ..Default::default()
        };
        assert!(matches!(
            SignalFeatureExtractor::new(config),
            Err(FeatureError::ResourceExhaustion(_))
        ));
    }

    #[test]
    fn test_extractor_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<SignalFeatureExtractor>();
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = SignalFeatureExtractor::new(ExtractorConfig::with_sample_rate(0.0));
        assert!(matches!(result, Err(FeatureError::InvalidConfig(_))));
    }

    #[test]
    fn test_named_order() {
        let features = FeatureVector {
            rms: 1.0,
            peak: 2.0,
            zero_crossing_rate: 3.0,
            dominant_frequency: 4.0,
        };
        let named: Vec<_> = features.named().collect();
        assert_eq!(named[0], ("rms", 1.0));
        assert_eq!(named[3], ("dominant_frequency", 4.0));
        assert_eq!(Vec::<f64>::from(features), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_many_cycles() {
        for _ in 0..100 {
            let mut extractor = SignalFeatureExtractor::with_defaults().unwrap();
            extractor.compute(&[0.1, -0.2, 0.3, -0.4]).unwrap();
        }
    }

    proptest! {
        #[test]
        fn prop_finite_signal_yields_four_features(
            signal in prop::collection::vec(-1e300f64..1e300, 1..300)
        ) {
            let mut extractor = SignalFeatureExtractor::with_defaults().unwrap();
            let features = extractor.compute(&signal).unwrap();
            prop_assert_eq!(features.to_array().len(), FEATURE_DIMENSION);
            prop_assert!(features.to_array().iter().all(|v| v.is_finite()));
            prop_assert!(features.rms <= features.peak * (1.0 + 1e-12));
        }

        #[test]
        fn prop_non_finite_sample_rejected(
            mut signal in prop::collection::vec(-1e300f64..1e300, 1..300),
            pos in any::<prop::sample::Index>(),
            bad in prop::sample::select(vec![f64::NAN, f64::INFINITY, f64::NEG_INFINITY]),
        ) {
            let i = pos.index(signal.len());
            signal[i] = bad;
            let mut extractor = SignalFeatureExtractor::with_defaults().unwrap();
            let rejected = matches!(
                extractor.compute(&signal),
                Err(FeatureError::InvalidInput(_))
            );
            prop_assert!(rejected);
        }

        #[test]
        fn prop_repeated_compute_is_identical(
            signal in prop::collection::vec(-1e3f64..1e3, 1..300)
        ) {
            let mut extractor = SignalFeatureExtractor::with_defaults().unwrap();
            let first = extractor.compute(&signal).unwrap();
            let second = extractor.compute(&signal).unwrap();
            prop_assert_eq!(
                first.to_array().map(f64::to_bits),
                second.to_array().map(f64::to_bits)
            );
        }
    }
}
