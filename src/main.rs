use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use cutpoints_core::{CandidateConfig, CandidateResult, FeatureIndex, ScanMode};
use cutpoints_io::{PointReader, PointSet};

#[derive(Parser)]
#[command(name = "cutpoints")]
#[command(about = "Candidate cut point search for entropy-based discretization")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Number of threads for parallel computation (defaults to all cores)
    #[arg(long, global = true)]
    threads: Option<usize>,
}

/// Input and partitioning shared by every subcommand.
#[derive(Args, Debug, Clone)]
struct SearchArgs {
    /// Path to the input CSV file (`feature,value,<label columns...>`)
    #[arg(long)]
    data: PathBuf,

    /// Expected number of features (defaults to highest feature index + 1)
    #[arg(long)]
    n_features: Option<usize>,

    /// Maximum number of values per partition in the exact layout
    #[arg(long, default_value_t = 10_000)]
    max_by_part: usize,

    /// Number of partitions the sorted input is split into
    #[arg(long, default_value_t = 8)]
    partitions: usize,
}

#[derive(Subcommand)]
enum Command {
    /// Find candidate cut points and print a summary
    Scan {
        #[command(flatten)]
        search: SearchArgs,

        /// Seam strategy: "exact" or "fast"
        #[arg(long, default_value = "exact")]
        mode: String,
    },

    /// Run both strategies and report where the fast one adds candidates
    Compare {
        #[command(flatten)]
        search: SearchArgs,
    },
}

// --- JSON stdout output structs ---

#[derive(Serialize)]
struct ScanOutput {
    mode: ScanMode,
    n_points: usize,
    n_features: usize,
    n_labels: usize,
    n_input_partitions: usize,
    n_scan_partitions: usize,
    n_candidates: usize,
    features: Vec<FeatureOutput>,
}

#[derive(Serialize)]
struct FeatureOutput {
    feature: usize,
    n_candidates: usize,
    min_threshold: Option<f64>,
    max_threshold: Option<f64>,
}

#[derive(Serialize)]
struct CompareOutput {
    n_points: usize,
    n_features: usize,
    n_partitions: usize,
    exact_candidates: usize,
    fast_candidates: usize,
    features: Vec<FeatureCompareOutput>,
}

#[derive(Serialize)]
struct FeatureCompareOutput {
    feature: usize,
    exact: usize,
    fast: usize,
    extra_fast: i64,
}

fn parse_mode(s: &str) -> Result<ScanMode> {
    match s {
        "exact" => Ok(ScanMode::Exact),
        "fast" => Ok(ScanMode::Fast),
        other => anyhow::bail!("unknown scan mode: {other} (expected exact or fast)"),
    }
}

fn load(args: &SearchArgs) -> Result<(PointSet, usize)> {
    let points = PointReader::new(&args.data)
        .read()
        .context("failed to read input CSV")?;
    let n_features = args.n_features.unwrap_or_else(|| points.n_features_observed());
    Ok((points, n_features))
}

/// Smallest and largest non-NaN threshold of a feature.
fn threshold_range(result: &CandidateResult, feature: usize) -> (Option<f64>, Option<f64>) {
    result
        .for_feature(FeatureIndex::new(feature))
        .map(|c| c.threshold)
        .filter(|t| !t.is_nan())
        .fold((None, None), |(lo, hi): (Option<f64>, Option<f64>), t| {
            (
                Some(lo.map_or(t, |lo| lo.min(t))),
                Some(hi.map_or(t, |hi| hi.max(t))),
            )
        })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Configure Rayon thread pool
    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure thread pool")?;
        info!(threads, "thread pool configured");
    }

    match cli.command {
        Command::Scan { search, mode } => {
            let mode = parse_mode(&mode)?;
            let (points, n_features) = load(&search)?;
            let n_labels = points.n_labels();
            let coll = points.into_partitioned(search.partitions)?;

            let config = CandidateConfig::new(n_features, n_labels)?
                .with_max_by_part(search.max_by_part)
                .with_mode(mode);
            let result = config.find(&coll).context("candidate search failed")?;

            let meta = result.metadata();
            let features = result
                .counts_per_feature()
                .into_iter()
                .enumerate()
                .map(|(feature, n_candidates)| {
                    let (min_threshold, max_threshold) = threshold_range(&result, feature);
                    FeatureOutput {
                        feature,
                        n_candidates,
                        min_threshold,
                        max_threshold,
                    }
                })
                .collect();

            let output = ScanOutput {
                mode: meta.mode,
                n_points: meta.n_points,
                n_features: meta.n_features,
                n_labels: meta.n_labels,
                n_input_partitions: meta.n_input_partitions,
                n_scan_partitions: meta.n_scan_partitions,
                n_candidates: result.candidates().len(),
                features,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Compare { search } => {
            let (points, n_features) = load(&search)?;
            let n_labels = points.n_labels();
            let coll = points.into_partitioned(search.partitions)?;

            let config = CandidateConfig::new(n_features, n_labels)?
                .with_max_by_part(search.max_by_part);
            let exact = config
                .clone()
                .with_mode(ScanMode::Exact)
                .find(&coll)
                .context("exact search failed")?;
            let fast = config
                .with_mode(ScanMode::Fast)
                .find(&coll)
                .context("fast search failed")?;

            let features: Vec<FeatureCompareOutput> = exact
                .counts_per_feature()
                .into_iter()
                .zip(fast.counts_per_feature())
                .enumerate()
                .map(|(feature, (exact, fast))| FeatureCompareOutput {
                    feature,
                    exact,
                    fast,
                    extra_fast: fast as i64 - exact as i64,
                })
                .collect();
            let n_differing = features.iter().filter(|f| f.extra_fast != 0).count();
            info!(n_differing, "comparison complete");

            let output = CompareOutput {
                n_points: coll.len(),
                n_features,
                n_partitions: coll.n_partitions(),
                exact_candidates: exact.candidates().len(),
                fast_candidates: fast.candidates().len(),
                features,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
