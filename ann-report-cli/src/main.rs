//! ANN Benchmark Report CLI
//!
//! Compares two directories of nearest-neighbor benchmark results and writes
//! a markdown table of HNSW latency and recall per `(target_hits, explore_hits)`.
//! Uses the ann-report library and adds:
//! - Default result locations and TOML configuration
//! - Logging setup
//! - Saving the report and echoing it to stdout

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

mod config;

use config::{AppConfig, OutputFormat, Overrides, RunSettings};

/// ANN Report - Compare RQ and Float32 nearest-neighbor benchmark results
#[derive(Parser, Debug)]
#[command(name = "ann-report-cli")]
#[command(about = "Compare latency and recall of two ANN benchmark result sets", long_about = None)]
#[command(version)]
struct Args {
    /// Directory with the first (RQ) result files
    #[arg(long, value_name = "DIR")]
    first_dir: Option<PathBuf>,

    /// Directory with the second (Float32) result files
    #[arg(long, value_name = "DIR")]
    second_dir: Option<PathBuf>,

    /// Column label for the first result set
    #[arg(long, value_name = "LABEL")]
    first_label: Option<String>,

    /// Column label for the second result set
    #[arg(long, value_name = "LABEL")]
    second_label: Option<String>,

    /// Report file (default: next to the first result directory)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Print the report without writing it to disk
    #[arg(long)]
    no_save: bool,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            first_dir: self.first_dir.clone(),
            second_dir: self.second_dir.clone(),
            first_label: self.first_label.clone(),
            second_label: self.second_label.clone(),
            output: self.output.clone(),
            format: self.format,
            no_save: self.no_save,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    log::debug!("ANN Report CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using report library v{}", ann_report::VERSION);

    let app_config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };
    let settings = app_config.resolve(args.overrides());

    let content = generate(&settings)?;

    if settings.save {
        persist(&settings.output_path, &content)?;
        println!("Report generated at: {}", settings.output_path.display());
        println!("\n{}", content);
    } else {
        println!("{}", content);
    }

    Ok(())
}

/// Collect both result directories and render the comparison
fn generate(settings: &RunSettings) -> Result<String> {
    let report = ann_report::compare_directories(
        &settings.first_dir,
        &settings.second_dir,
        &settings.report,
    )
    .context("Failed to collect benchmark results")?;

    log::info!(
        "Comparison has {} target_hits groups, {} rows",
        report.groups.len(),
        report.row_count()
    );

    Ok(report.render(settings.format)?)
}

/// Write the rendered report; the parent directory must already exist
fn persist(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Failed to write report: {:?}", path))?;
    log::debug!("Wrote {} bytes to {:?}", content.len(), path);
    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
