//! Configuration loading and merging
//!
//! Settings come from three layers: built-in defaults, an optional TOML file
//! and command-line flags, with later layers overriding earlier ones.

use anyhow::{Context, Result};
use ann_report::{ReportConfig, ReportFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Where the quantized (RQ) SIFT run leaves its result files
pub const DEFAULT_FIRST_DIR: &str =
    "logs/systemtests/AnnSiftRQPerfTest/sift_rq_euclidean/results/performance";
/// Where the Float32 SIFT baseline leaves its result files
pub const DEFAULT_SECOND_DIR: &str =
    "logs/systemtests/AnnSiftPerfTest/sift_data_set/results/performance";

/// Application configuration (loaded from a TOML file)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourcesConfig {
    #[serde(default = "default_first_dir")]
    pub first_dir: PathBuf,
    #[serde(default = "default_second_dir")]
    pub second_dir: PathBuf,
    pub first_label: Option<String>,
    pub second_label: Option<String>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            first_dir: default_first_dir(),
            second_dir: default_second_dir(),
            first_label: None,
            second_label: None,
        }
    }
}

fn default_first_dir() -> PathBuf {
    PathBuf::from(DEFAULT_FIRST_DIR)
}

fn default_second_dir() -> PathBuf {
    PathBuf::from(DEFAULT_SECOND_DIR)
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Explicit report path (default: next to the first source directory)
    pub path: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub save: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            path: None,
            save: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Markdown => ReportFormat::Markdown,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

/// Command-line values that override the configuration file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub first_dir: Option<PathBuf>,
    pub second_dir: Option<PathBuf>,
    pub first_label: Option<String>,
    pub second_label: Option<String>,
    pub output: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub no_save: bool,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub first_dir: PathBuf,
    pub second_dir: PathBuf,
    pub report: ReportConfig,
    pub format: ReportFormat,
    pub output_path: PathBuf,
    pub save: bool,
}

impl AppConfig {
    /// Apply command-line overrides and resolve the output path
    pub fn resolve(self, overrides: Overrides) -> RunSettings {
        let first_dir = overrides.first_dir.unwrap_or(self.sources.first_dir);
        let second_dir = overrides.second_dir.unwrap_or(self.sources.second_dir);

        let mut report = ReportConfig::new();
        if let Some(label) = overrides.first_label.or(self.sources.first_label) {
            report = report.with_first_label(label);
        }
        if let Some(label) = overrides.second_label.or(self.sources.second_label) {
            report = report.with_second_label(label);
        }

        let format: ReportFormat = overrides.format.unwrap_or(self.output.format).into();
        let output_path = overrides
            .output
            .or(self.output.path)
            .unwrap_or_else(|| default_output_path(&first_dir, format));

        RunSettings {
            first_dir,
            second_dir,
            report,
            format,
            output_path,
            save: self.output.save && !overrides.no_save,
        }
    }
}

/// Report path one level above the first source directory
///
/// The result directories are scanned for `.xml` files by the benchmark
/// tooling, so the report must not land inside them.
pub fn default_output_path(first_dir: &Path, format: ReportFormat) -> PathBuf {
    first_dir
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(format.default_file_name())
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}
