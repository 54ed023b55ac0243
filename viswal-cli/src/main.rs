//! viswal: annotate every feature of a GeoJSON file with its
//! Visvalingam-Whyatt importance order

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use viswal_io::{encode_feature_collection, read_features, write_features, write_split};
use viswal_simplification::{
    BatchConfig, BatchReducer, BatchStatus, CancellationToken, SimplifyOptions, VisvalingamReducer,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input GeoJSON file (FeatureCollection, Feature or Geometry)
    input: PathBuf,

    /// Output GeoJSON file for the annotated collection (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write one GeoJSON Feature file per feature into this directory
    #[arg(long)]
    split_dir: Option<PathBuf>,

    /// Number of worker threads (defaults to available parallelism)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Raise recomputed priorities to the last removed priority
    #[arg(long)]
    monotonic: bool,

    /// Exit with an error if any feature fails
    #[arg(long)]
    strict: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let collection = read_features(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    tracing::info!(path = %args.input.display(), features = collection.len(), "loaded features");

    let mut config = BatchConfig::new();
    if let Some(threads) = args.threads {
        config = config.with_threads(threads);
    }
    let reducer = VisvalingamReducer::with_options(SimplifyOptions::new().with_monotonic(args.monotonic));
    let batch = BatchReducer::new(reducer, &config).context("Failed to start worker pool")?;

    let result = batch.reduce(collection, &CancellationToken::new());
    for (index, error) in result.report.errors() {
        tracing::error!(feature = index, error = %error, "feature not annotated");
    }

    match &args.output {
        Some(path) => write_features(&result.collection, path)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            let bytes = encode_feature_collection(&result.collection, true)?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.write_all(b"\n")?;
        }
    }

    if let Some(dir) = &args.split_dir {
        let paths = write_split(&result.collection, dir)
            .with_context(|| format!("Failed to write features to {}", dir.display()))?;
        tracing::info!(dir = %dir.display(), files = paths.len(), "wrote per-feature files");
    }

    match result.report.status() {
        BatchStatus::Succeeded => Ok(()),
        BatchStatus::PartiallySucceeded if !args.strict => Ok(()),
        status => bail!(
            "{:?}: {} of {} features failed",
            status,
            result.report.failed(),
            result.report.len()
        ),
    }
}
