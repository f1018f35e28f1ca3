//! Comparison report model and rendering
//!
//! [`ComparisonReport::build`] joins two datasets on their aggregation keys and
//! groups the result by `target_hits`. The same model renders to markdown (the
//! table humans read) or JSON (for scripts).

use crate::config::ReportConfig;
use crate::types::{AggregationKey, Dataset, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Output format of a rendered report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Markdown,
    Json,
}

impl ReportFormat {
    /// File name used when the output path is derived from the input directory
    pub fn default_file_name(self) -> &'static str {
        match self {
            ReportFormat::Markdown => "comparison_report.md",
            ReportFormat::Json => "comparison_report.json",
        }
    }
}

/// One table row: both sources measured at the same `explore_hits`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub explore_hits: i64,
    pub first_latency_ms: f64,
    pub first_recall_pct: Option<f64>,
    pub second_latency_ms: f64,
    pub second_recall_pct: Option<f64>,
    /// `first_latency_ms - second_latency_ms`
    pub latency_gap_ms: f64,
}

/// All rows sharing one `target_hits` value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetHitsGroup {
    pub target_hits: i64,
    pub rows: Vec<ComparisonRow>,
}

/// Latency and recall of two result sets, side by side
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub first_label: String,
    pub second_label: String,
    pub groups: Vec<TargetHitsGroup>,
}

impl ComparisonReport {
    /// Join two datasets into a report
    ///
    /// Keys from either side are considered. A row is only produced when both
    /// sides have a usable latency; recall may be missing on either side. A
    /// group is kept even if none of its keys produced a row.
    pub fn build(first: &Dataset, second: &Dataset, config: &ReportConfig) -> Self {
        let all_keys: BTreeSet<AggregationKey> =
            first.keys().chain(second.keys()).copied().collect();

        let mut groups: Vec<TargetHitsGroup> = Vec::new();

        for key in all_keys {
            if !config.should_report_target_hits(key.target_hits) {
                continue;
            }

            if groups.last().map(|g| g.target_hits) != Some(key.target_hits) {
                groups.push(TargetHitsGroup {
                    target_hits: key.target_hits,
                    rows: Vec::new(),
                });
            }

            let lhs = first.bucket_or_empty(&key);
            let rhs = second.bucket_or_empty(&key);

            let (Some(first_latency), Some(second_latency)) =
                (lhs.usable_latency(), rhs.usable_latency())
            else {
                log::trace!("No latency pair for {}, skipping row", key);
                continue;
            };

            if let Some(group) = groups.last_mut() {
                group.rows.push(ComparisonRow {
                    explore_hits: key.explore_hits,
                    first_latency_ms: first_latency,
                    first_recall_pct: lhs.recall_pct,
                    second_latency_ms: second_latency,
                    second_recall_pct: rhs.recall_pct,
                    latency_gap_ms: first_latency - second_latency,
                });
            }
        }

        Self {
            first_label: config.first_label.clone(),
            second_label: config.second_label.clone(),
            groups,
        }
    }

    /// Total number of rows across all groups
    pub fn row_count(&self) -> usize {
        self.groups.iter().map(|g| g.rows.len()).sum()
    }

    /// Render in the requested format
    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Markdown => Ok(self.to_markdown()),
            ReportFormat::Json => self.to_json(),
        }
    }

    /// Render as markdown tables, one per `target_hits` group
    pub fn to_markdown(&self) -> String {
        let first = &self.first_label;
        let second = &self.second_label;

        let mut lines = vec![format!("# Comparison: {} vs. {}\n", first, second)];

        for group in &self.groups {
            lines.push(format!("## Target Hits: {}\n", group.target_hits));
            lines.push(format!(
                "| EH | {first} Latency | {first} Recall | {second} Latency | {second} Recall | Latency Gap |"
            ));
            lines.push("| :--- | :--- | :--- | :--- | :--- | :--- |".to_string());

            for row in &group.rows {
                lines.push(format!(
                    "| {} | {:.2} ms | {} | {:.2} ms | {} | {:+.2} ms |",
                    row.explore_hits,
                    row.first_latency_ms,
                    format_recall(row.first_recall_pct),
                    row.second_latency_ms,
                    format_recall(row.second_recall_pct),
                    row.latency_gap_ms,
                ));
            }
            lines.push("\n".to_string());
        }

        lines.join("\n")
    }

    /// Render as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn format_recall(recall: Option<f64>) -> String {
    match recall {
        Some(value) => format!("{:.1}%", value),
        None => "-".to_string(),
    }
}
