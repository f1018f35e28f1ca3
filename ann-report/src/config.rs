//! Report configuration types
//!
//! This module defines the small set of knobs the report builder needs.
//! Where the results come from and where the report goes is decided by the
//! application layer.

use serde::{Deserialize, Serialize};

/// Configuration for building a comparison report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Label of the first source (the candidate run)
    #[serde(default = "default_first_label")]
    pub first_label: String,

    /// Label of the second source (the baseline run)
    #[serde(default = "default_second_label")]
    pub second_label: String,

    /// Drop the `target_hits == 0` group (records without the parameter)
    #[serde(default = "default_true")]
    pub skip_zero_target_hits: bool,
}

fn default_first_label() -> String {
    "RQ".to_string()
}

fn default_second_label() -> String {
    "Float32".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            first_label: default_first_label(),
            second_label: default_second_label(),
            skip_zero_target_hits: true,
        }
    }
}

impl ReportConfig {
    /// Create a report configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the first source label
    pub fn with_first_label(mut self, label: impl Into<String>) -> Self {
        self.first_label = label.into();
        self
    }

    /// Builder method: set the second source label
    pub fn with_second_label(mut self, label: impl Into<String>) -> Self {
        self.second_label = label.into();
        self
    }

    /// Builder method: keep or drop the `target_hits == 0` group
    pub fn with_skip_zero_target_hits(mut self, enabled: bool) -> Self {
        self.skip_zero_target_hits = enabled;
        self
    }

    /// Check if a `target_hits` group should be reported
    pub fn should_report_target_hits(&self, target_hits: i64) -> bool {
        !(self.skip_zero_target_hits && target_hits == 0)
    }
}
