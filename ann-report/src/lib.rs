//! ANN Benchmark Report Library
//!
//! Reads nearest-neighbor benchmark result files (XML) from two result
//! directories and builds a side-by-side comparison of HNSW query latency and
//! recall, keyed by `(target_hits, explore_hits)`.
//!
//! # Architecture
//!
//! One linear pipeline:
//! - [`parser`] turns a result file into a [`MetricRecord`]
//! - [`collector`] folds a directory of records into a [`Dataset`]
//! - [`report`] joins two datasets into a [`ComparisonReport`] and renders it
//!
//! The library does NOT:
//! - Decide where results live or where the report is written
//! - Configure logging
//!
//! Both are handled by the application layer (ann-report-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use ann_report::{collect, ComparisonReport, ReportConfig};
//! use std::path::Path;
//!
//! let (rq, _) = collect(Path::new("rq/results/performance")).unwrap();
//! let (float, _) = collect(Path::new("float/results/performance")).unwrap();
//!
//! let report = ComparisonReport::build(&rq, &float, &ReportConfig::default());
//! println!("{}", report.to_markdown());
//! ```

// Public modules
pub mod collector;
pub mod config;
pub mod parser;
pub mod report;
pub mod types;

// Re-export main types for convenience
pub use collector::{collect, compare_directories};
pub use config::ReportConfig;
pub use parser::{parse_record, parse_record_file, try_parse_record_file};
pub use report::{ComparisonReport, ComparisonRow, ReportFormat, TargetHitsGroup};
pub use types::{
    AggregationKey, CollectStats, Dataset, MetricRecord, RecordKind, ReportError, Result,
    StatBucket,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
