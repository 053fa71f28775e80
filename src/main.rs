//! Binary entry point for vrpdedup.
//!
//! Runs duplicate detection over an import file and an existing-dataset
//! file, printing a plain-text report or the raw detection result as
//! JSON. Duplicates are findings, not failures: the exit code is
//! nonzero only for I/O and argument errors.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print macros in the main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use vrpdedup::io::read_batch;
use vrpdedup::{
    DetectionConfig, DetectionResult, DuplicateDetector, EntityType, Resolution, generate_report,
    resolve_duplicates,
};

/// vrpdedup - duplicate detection for vehicle routing dataset imports.
#[derive(Parser)]
#[command(name = "vrpdedup")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Detect duplicates in an import batch against an existing dataset.
    Detect {
        #[command(flatten)]
        detection: DetectionArgs,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Detect duplicates and partition them into replace/create/skip buckets.
    Plan {
        #[command(flatten)]
        detection: DetectionArgs,

        /// Default action for every duplicate without a per-row override.
        #[arg(long, default_value = "skip")]
        strategy: String,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

/// Arguments shared by the detection commands.
#[derive(clap::Args)]
struct DetectionArgs {
    /// Import batch file (.csv or .json).
    #[arg(long, value_name = "FILE")]
    import: PathBuf,

    /// Existing dataset file (.csv or .json).
    #[arg(long, value_name = "FILE")]
    existing: PathBuf,

    /// Entity type of the dataset (vehicles, jobs, locations, routes).
    #[arg(long, value_name = "TYPE")]
    entity_type: EntityType,

    /// Minimum similarity for a fuzzy duplicate. Overrides
    /// `VRPDEDUP_FUZZY_THRESHOLD` when set.
    #[arg(long)]
    threshold: Option<f64>,

    /// Disable fuzzy matching.
    #[arg(long)]
    no_fuzzy: bool,

    /// Case-sensitive string comparison.
    #[arg(long)]
    match_case: bool,

    /// Override the natural-key field list (repeatable).
    #[arg(long = "natural-key", value_name = "FIELD")]
    natural_keys: Vec<String>,
}

/// Output formats for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable plain text.
    Text,
    /// Machine-readable JSON.
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Installs the tracing subscriber. `RUST_LOG` takes precedence; the
/// verbose flag lowers the default level to debug.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("vrpdedup={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Detect { detection, format } => {
            let result = detect(&detection)?;
            match format {
                OutputFormat::Text => print!("{}", generate_report(&result)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
            }
            Ok(())
        },
        Commands::Plan {
            detection,
            strategy,
            format,
        } => {
            let strategy = Resolution::parse(&strategy)?;
            let result = detect(&detection)?;
            let plan = resolve_duplicates(result.duplicates.clone(), strategy);

            match format {
                OutputFormat::Text => {
                    print!("{}", generate_report(&result));
                    println!();
                    println!("Resolution plan (default: {strategy}):");
                    println!("  replace: {}", plan.to_replace.len());
                    println!("  create:  {}", plan.to_create.len());
                    println!("  skip:    {}", plan.to_skip.len());
                },
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
            }
            Ok(())
        },
    }
}

/// Loads both batches and runs detection with the flag overrides
/// applied on top of the environment configuration.
fn detect(args: &DetectionArgs) -> anyhow::Result<DetectionResult> {
    let import = read_batch(&args.import)?;
    let existing = read_batch(&args.existing)?;

    let mut config = DetectionConfig::from_env();
    if let Some(threshold) = args.threshold {
        config = config.with_fuzzy_threshold(threshold);
    }
    if args.no_fuzzy {
        config = config.with_fuzzy_enabled(false);
    }
    if args.match_case {
        config = config.with_ignore_case(false);
    }
    if !args.natural_keys.is_empty() {
        config = config.with_natural_key_fields(args.natural_keys.clone());
    }

    let detector = DuplicateDetector::new();
    Ok(detector.detect(&import, &existing, args.entity_type, &config))
}
