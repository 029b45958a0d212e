//! CalFeature command-line front end
//!
//! Reads a sample file, runs the feature extractor over it and prints the
//! resulting feature vector.

use clap::ValueEnum;
use config::{Config, Environment, File};
use feature_engine::{ExtractorConfig, FeatureError, FeatureExtractor, FeatureVector};
use serde::{Deserialize, Serialize};
use signal_reader::{read_signal, ReadError};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Prefix for environment overrides, e.g. `CALFEATURE__EXTRACTOR__SAMPLE_RATE`
pub const ENV_PREFIX: &str = "CALFEATURE";

/// Output format for the feature vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `Feature N: value` lines with six decimals
    #[default]
    Text,
    /// Single JSON object keyed by feature name
    Json,
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Feature extractor settings
    pub extractor: ExtractorConfig,
    /// Output format
    pub format: OutputFormat,
}

/// Errors that abort a run
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Read(#[from] ReadError),

    #[error("No valid data read from {}", .0.display())]
    NoValidData(PathBuf),

    #[error(transparent)]
    Feature(#[from] FeatureError),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("Failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Summary of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    /// Computed features
    pub features: FeatureVector,
    /// Samples fed to the extractor
    pub samples: usize,
    /// Input lines skipped as unparsable
    pub skipped_lines: usize,
}

/// Load configuration: defaults, then the optional file, then environment
pub fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let mut builder = Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }

    let settings = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Initialize logging to stderr
pub fn init_logging(verbose: bool) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
}

/// Write the feature vector in the requested format
pub fn write_features(
    out: &mut impl Write,
    features: &FeatureVector,
    format: OutputFormat,
) -> Result<(), RunError> {
    match format {
        OutputFormat::Text => {
            for (i, value) in features.to_array().iter().enumerate() {
                writeln!(out, "Feature {}: {:.6}", i + 1, value)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, features)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Read `path`, then create an extractor with `create` and print its
/// features to `out`.
///
/// The extractor is only created once the file has yielded at least one
/// sample, and it is dropped before returning on every path.
pub fn run<E, F>(
    path: &Path,
    create: F,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<RunOutcome, RunError>
where
    E: FeatureExtractor,
    F: FnOnce() -> Result<E, FeatureError>,
{
    let signal = read_signal(path)?;

    if signal.skipped_lines > 0 {
        warn!("Skipped {} invalid lines in {}", signal.skipped_lines, path.display());
    }

    if signal.is_empty() {
        return Err(RunError::NoValidData(path.to_path_buf()));
    }

    info!("Read {} samples from {}", signal.len(), path.display());

    let features = {
        let mut extractor = create()?;
        let result = extractor.compute(&signal.samples);
        drop(extractor);
        info!("Feature extractor resources released");
        result?
    };

    write_features(out, &features, format)?;

    Ok(RunOutcome {
        features,
        samples: signal.len(),
        skipped_lines: signal.skipped_lines,
    })
}
