//! Shelfsort CLI
//!
//! Classifies free-text shelf-placement and inventory comments in bulk.
//!
//! Rows are read from a file or stdin, classified concurrently against the
//! configured keyword dictionary, and written back as one JSON object per
//! row. The category distribution is logged once the batch completes.

use anyhow::Result;
use clap::Parser;
use shelfsort_classifiers::BatchClassifier;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

mod config;
mod rows;

use config::RunConfig;
use rows::{read_rows_from, write_results_to, InputFormat};

#[derive(Parser, Debug)]
#[command(name = "shelfsort")]
#[command(author, version, about = "Fuzzy keyword classifier for inventory comments", long_about = None)]
pub struct Cli {
    /// Classifier configuration file path
    #[arg(short, long, default_value = "shelfsort.yaml", env = "SHELFSORT_CONFIG")]
    config: PathBuf,

    /// Input file (defaults to stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Input encoding
    #[arg(short, long, value_enum, default_value = "lines")]
    format: InputFormat,

    /// Override the configured match threshold (0-100)
    #[arg(short, long)]
    threshold: Option<u8>,

    /// Maximum rows classified concurrently
    #[arg(long)]
    concurrency: Option<usize>,

    /// Per-row time limit in milliseconds
    #[arg(long)]
    row_timeout_ms: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = RunConfig::load(&cli.config, &cli)?;
    info!("Configuration loaded from {}", cli.config.display());
    info!("Categories: {}", config.classifier.categories.len());
    info!("Threshold: {}", config.classifier.threshold);

    let classifier = Arc::new(config.classifier.build_classifier()?);

    let rows = read_rows_from(cli.input.as_deref(), cli.format)?;

    let batch = BatchClassifier::new(classifier, config.batch);
    let report = batch.classify_rows(rows).await;

    write_results_to(cli.output.as_deref(), &report.rows)?;

    for (category, count) in &report.summary.distribution {
        info!("{}: {}", category, count);
    }
    info!(
        "Uncertain: {} ({:.1}%), failed: {}, elapsed: {}ms",
        report.summary.uncertain,
        report.summary.uncertain_pct(),
        report.summary.failed,
        report.summary.latency_us / 1000
    );

    Ok(())
}

/// Initialize tracing/logging on stderr, keeping stdout for results
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("shelfsort=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("shelfsort=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
