//! CalFeature - Main Entry Point

use anyhow::Context;
use clap::Parser;
use cli::{init_logging, load_config, run, OutputFormat};
use feature_engine::SignalFeatureExtractor;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Parser)]
#[command(name = "calfeature")]
#[command(about = "Compute signal features from a sample file", long_about = None)]
struct Cli {
    /// Text file with one sample per line
    path: PathBuf,

    /// Config file path (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Sampling frequency in Hz
    #[arg(long)]
    sample_rate: Option<f64>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn try_main(cli: Cli) -> anyhow::Result<()> {
    let mut config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;

    if let Some(rate) = cli.sample_rate {
        config.extractor.sample_rate = rate;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }

    info!("=== CalFeature v{} ===", env!("CARGO_PKG_VERSION"));

    let extractor_config = config.extractor.clone();
    let stdout = std::io::stdout();
    let outcome = run(
        &cli.path,
        move || SignalFeatureExtractor::new(extractor_config),
        config.format,
        &mut stdout.lock(),
    )?;

    info!(
        "Computed {} features from {} samples",
        outcome.features.to_array().len(),
        outcome.samples
    );

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    match try_main(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
