//! Extractor configuration

use data_validator::ValidationConfig;
use serde::{Deserialize, Serialize};

use crate::fft::FrequencyBands;
use crate::FeatureError;

/// Window applied before the spectral transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowFunction {
    /// Hamming window, reduces spectral leakage
    #[default]
    Hamming,
    /// No windowing
    Rectangular,
}

/// Extractor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Sampling frequency (Hz) used to scale the dominant frequency
    pub sample_rate: f64,

    /// Window used by the FFT analyzer
    pub window: WindowFunction,

    /// Subtract the mean before the spectral transform
    pub remove_dc: bool,

    /// Spectral band edges, as fractions of Nyquist
    pub bands: FrequencyBands,

    /// Initial FFT scratch capacity (samples)
    pub scratch_capacity: usize,

    /// Input validation limits
    pub validation: ValidationConfig,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            sample_rate: 1.0,
            window: WindowFunction::Hamming,
            remove_dc: true,
            bands: FrequencyBands::default(),
            scratch_capacity: 4096,
            validation: ValidationConfig::default(),
        }
    }
}

impl ExtractorConfig {
    /// Config with a specific sample rate and defaults elsewhere
    pub fn with_sample_rate(sample_rate: f64) -> Self {
        Self {
            sample_rate,
            ..Default::default()
        }
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<(), FeatureError> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(FeatureError::InvalidConfig(format!(
                "sample_rate must be positive and finite, got {}",
                self.sample_rate
            )));
        }

        if let Some(limit) = self.validation.max_abs_amplitude {
            if limit.is_nan() || limit < 0.0 {
                return Err(FeatureError::InvalidConfig(format!(
                    "max_abs_amplitude must be non-negative, got {}",
                    limit
                )));
            }
        }

        self.bands.validate()
    }
}
