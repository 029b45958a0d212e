//! FFT-based Frequency Analysis

use rustfft::{num_complex::Complex, FftPlanner};
use serde::{Deserialize, Serialize};

use crate::config::{ExtractorConfig, WindowFunction};
use crate::FeatureError;

/// Frequency band definitions, as fractions of the Nyquist frequency.
///
/// A bin belongs to a band when `lo <= f < hi`; a band whose upper edge is
/// 1.0 also includes the Nyquist bin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrequencyBands {
    /// Low frequency band (0-20% of Nyquist)
    pub low: (f64, f64),
    /// Medium frequency band (20-50% of Nyquist)
    pub medium: (f64, f64),
    /// High frequency band (50-100% of Nyquist)
    pub high: (f64, f64),
}

impl Default for FrequencyBands {
    fn default() -> Self {
        Self {
            low: (0.0, 0.2),
            medium: (0.2, 0.5),
            high: (0.5, 1.0),
        }
    }
}

impl FrequencyBands {
    fn contains(band: (f64, f64), fraction: f64) -> bool {
        fraction >= band.0 && (fraction < band.1 || (band.1 >= 1.0 && fraction <= band.1))
    }

    /// Check each band is a non-empty sub-range of `[0, 1]`
    pub fn validate(&self) -> Result<(), FeatureError> {
        for (name, (lo, hi)) in [("low", self.low), ("medium", self.medium), ("high", self.high)] {
            if !(0.0..=1.0).contains(&lo) || !(0.0..=1.0).contains(&hi) || lo >= hi {
                return Err(FeatureError::InvalidConfig(format!(
                    "{} band must satisfy 0 <= lo < hi <= 1, got ({}, {})",
                    name, lo, hi
                )));
            }
        }
        Ok(())
    }
}

/// Spectral summary of a signal
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpectralFeatures {
    /// Power in low frequency band
    pub power_low: f64,
    /// Power in medium frequency band
    pub power_medium: f64,
    /// Power in high frequency band
    pub power_high: f64,
    /// Frequency of the strongest non-DC bin (Hz)
    pub dominant_frequency: f64,
    /// Power-weighted mean frequency (Hz)
    pub spectral_centroid: f64,
    /// Total power over the positive non-DC bins
    pub total_power: f64,
}

/// FFT analyzer for frequency domain features.
///
/// Owns the planner, which caches plans per length, and a reusable
/// scratch buffer. Neither affects the values produced.
pub struct FftAnalyzer {
    planner: FftPlanner<f64>,
    scratch: Vec<Complex<f64>>,
    bands: FrequencyBands,
    sample_rate: f64,
    window: WindowFunction,
    remove_dc: bool,
}

impl FftAnalyzer {
    /// Create a new analyzer with `config.scratch_capacity` samples pre-reserved
    pub fn new(config: &ExtractorConfig) -> Result<Self, FeatureError> {
        let mut scratch = Vec::new();
        scratch
            .try_reserve_exact(config.scratch_capacity)
            .map_err(|e| FeatureError::ResourceExhaustion(e.to_string()))?;

        Ok(Self {
            planner: FftPlanner::new(),
            scratch,
            bands: config.bands,
            sample_rate: config.sample_rate,
            window: config.window,
            remove_dc: config.remove_dc,
        })
    }

    /// Hamming coefficient for sample `i` of `n` (n >= 2)
    fn hamming(i: usize, n: usize) -> f64 {
        0.54 - 0.46 * (2.0 * std::f64::consts::PI * i as f64 / (n - 1) as f64).cos()
    }

    /// Compute spectral features from a signal.
    ///
    /// The transform runs on samples scaled by `1 / peak`; powers are
    /// scaled back by `peak²` afterwards and may saturate to infinity for
    /// very large inputs, while the dominant frequency and centroid do not
    /// depend on scale. Signals shorter than two samples have no non-DC
    /// bins and yield all-zero features.
    pub fn analyze(&mut self, signal: &[f64]) -> Result<SpectralFeatures, FeatureError> {
        let n = signal.len();
        if n < 2 {
            return Ok(SpectralFeatures::default());
        }

        let peak = signal.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));
        if peak == 0.0 {
            return Ok(SpectralFeatures::default());
        }

        let offset = if self.remove_dc {
            signal.iter().map(|&v| v / peak).sum::<f64>() / n as f64
        } else {
            0.0
        };

        self.scratch.clear();
        self.scratch.try_reserve(n).map_err(|e| {
            FeatureError::ComputeFailure(format!("FFT scratch for {} samples: {}", n, e))
        })?;

        let window = self.window;
        self.scratch.extend(signal.iter().enumerate().map(|(i, &v)| {
            let w = match window {
                WindowFunction::Hamming => Self::hamming(i, n),
                WindowFunction::Rectangular => 1.0,
            };
            Complex::new((v / peak - offset) * w, 0.0)
        }));

        let fft = self.planner.plan_fft_forward(n);
        fft.process(&mut self.scratch);

        let freq_resolution = self.sample_rate / n as f64;
        let nyquist_bins = n as f64 / 2.0;

        let mut power_low = 0.0;
        let mut power_medium = 0.0;
        let mut power_high = 0.0;
        let mut total_power = 0.0;
        let mut weighted = 0.0;
        let mut max_power = 0.0;
        let mut dominant_bin = 0;

        // Positive frequencies, DC excluded
        for (bin, c) in self.scratch.iter().enumerate().take(n / 2 + 1).skip(1) {
            let power = c.norm_sqr() / n as f64;
            let fraction = bin as f64 / nyquist_bins;

            if FrequencyBands::contains(self.bands.low, fraction) {
                power_low += power;
            }
            if FrequencyBands::contains(self.bands.medium, fraction) {
                power_medium += power;
            }
            if FrequencyBands::contains(self.bands.high, fraction) {
                power_high += power;
            }

            total_power += power;
            weighted += power * bin as f64 * freq_resolution;

            if power > max_power {
                max_power = power;
                dominant_bin = bin;
            }
        }

        let spectral_centroid = if total_power > 0.0 {
            weighted / total_power
        } else {
            0.0
        };

        let scale = peak * peak;

        Ok(SpectralFeatures {
            power_low: power_low * scale,
            power_medium: power_medium * scale,
            power_high: power_high * scale,
            dominant_frequency: dominant_bin as f64 * freq_resolution,
            spectral_centroid,
            total_power: total_power * scale,
        })
    }
}
