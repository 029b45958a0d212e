//! Feature Engineering Engine
//!
//! Computes a fixed four-value feature vector (RMS, peak amplitude,
//! zero-crossing rate, dominant frequency) from a numeric signal, both as
//! a Rust API and through an exported C ABI.

mod config;
mod error;
mod features;
pub mod ffi;
mod fft;
mod statistics;

pub use config::{ExtractorConfig, WindowFunction};
pub use data_validator::{ValidationConfig, ValidationError};
pub use error::FeatureError;
pub use features::{
    FeatureExtractor, FeatureVector, SignalFeatureExtractor, FEATURE_DIMENSION, FEATURE_NAMES,
};
pub use fft::{FftAnalyzer, FrequencyBands, SpectralFeatures};
pub use statistics::StatisticalFeatures;
