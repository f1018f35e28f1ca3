//! Core types for the ANN benchmark report library
//!
//! This module defines the records parsed from benchmark result files and the
//! per-source aggregation that the comparison report is built from. Everything
//! here is transient: a dataset is rebuilt from disk on every run.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Result type for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// Parameter naming the result set breadth of an ANN query
pub const PARAM_TARGET_HITS: &str = "target_hits";
/// Parameter naming the exploration depth of an ANN query
pub const PARAM_EXPLORE_HITS: &str = "explore_hits";
/// Parameter naming the record kind (`query` or `recall`)
pub const PARAM_TYPE: &str = "type";
/// Parameter naming the search algorithm
pub const PARAM_ALGORITHM: &str = "algorithm";

/// Metric holding average query latency in milliseconds
pub const METRIC_AVG_RESPONSE_TIME: &str = "avgresponsetime";
/// Metric holding average recall as a percentage
pub const METRIC_RECALL_AVG: &str = "recall.avg";

/// Errors that can occur while reading and rendering benchmark results
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to parse XML result file: {0}")]
    XmlParse(String),

    #[error("Element <{element}> is missing the 'name' attribute")]
    MissingAttribute { element: String },

    #[error("Invalid value for parameter '{name}': {value:?}")]
    InvalidParameter { name: String, value: String },

    #[error("Invalid value for metric '{name}': {value:?}")]
    InvalidMetric { name: String, value: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One parsed benchmark result file
///
/// Both mappings are flat; when a document repeats a name, the later element wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricRecord {
    /// `<parameters><parameter name="...">` values
    pub parameters: HashMap<String, String>,
    /// `<metrics><metric name="...">` values, kept as text until used
    pub metrics: HashMap<String, String>,
}

impl MetricRecord {
    /// Look up a parameter value
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    /// Look up a raw metric value
    pub fn metric(&self, name: &str) -> Option<&str> {
        self.metrics.get(name).map(String::as_str)
    }

    /// Parse an integer parameter, falling back to 0 when it is absent
    pub fn int_parameter_or_zero(&self, name: &str) -> Result<i64> {
        match self.parameter(name) {
            None => Ok(0),
            Some(value) => value.trim().parse().map_err(|_| ReportError::InvalidParameter {
                name: name.to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// Parse a numeric metric, falling back to 0.0 when it is absent
    pub fn float_metric_or_zero(&self, name: &str) -> Result<f64> {
        match self.metric(name) {
            None => Ok(0.0),
            Some(value) => value.trim().parse().map_err(|_| ReportError::InvalidMetric {
                name: name.to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// Derive the aggregation key from `target_hits` and `explore_hits`
    pub fn aggregation_key(&self) -> Result<AggregationKey> {
        Ok(AggregationKey {
            target_hits: self.int_parameter_or_zero(PARAM_TARGET_HITS)?,
            explore_hits: self.int_parameter_or_zero(PARAM_EXPLORE_HITS)?,
        })
    }

    /// Classify the record by its `type` and `algorithm` parameters
    pub fn kind(&self) -> RecordKind {
        match (self.parameter(PARAM_TYPE), self.parameter(PARAM_ALGORITHM)) {
            (Some("query"), Some("hnsw")) => RecordKind::HnswQuery,
            (Some("recall"), _) => RecordKind::Recall,
            _ => RecordKind::Other,
        }
    }
}

/// What a record contributes to its stat bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// `type=query, algorithm=hnsw`: supplies latency
    HnswQuery,
    /// `type=recall`: supplies recall
    Recall,
    /// Anything else (feed runs, brute-force queries, ...)
    Other,
}

/// Composite key `(target_hits, explore_hits)`
///
/// Ordering is by the full tuple, so sorted keys come out grouped by
/// `target_hits` with ascending `explore_hits` inside each group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AggregationKey {
    pub target_hits: i64,
    pub explore_hits: i64,
}

impl AggregationKey {
    pub fn new(target_hits: i64, explore_hits: i64) -> Self {
        Self {
            target_hits,
            explore_hits,
        }
    }
}

impl fmt::Display for AggregationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(th={}, eh={})", self.target_hits, self.explore_hits)
    }
}

/// Latency and recall collected for one key
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatBucket {
    /// Average HNSW query latency in milliseconds
    pub latency_ms: Option<f64>,
    /// Average recall percentage
    pub recall_pct: Option<f64>,
}

impl StatBucket {
    /// Latency usable for a comparison row
    ///
    /// A zero latency is what a query record without `avgresponsetime`
    /// collapses to, so it does not count.
    pub fn usable_latency(&self) -> Option<f64> {
        self.latency_ms.filter(|lat| *lat != 0.0)
    }
}

/// All stat buckets collected from one source directory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    buckets: BTreeMap<AggregationKey, StatBucket>,
}

impl Dataset {
    /// Create an empty dataset
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the latency for a key, overwriting any earlier value
    pub fn set_latency(&mut self, key: AggregationKey, latency_ms: f64) {
        self.buckets.entry(key).or_default().latency_ms = Some(latency_ms);
    }

    /// Set the recall for a key, overwriting any earlier value
    pub fn set_recall(&mut self, key: AggregationKey, recall_pct: f64) {
        self.buckets.entry(key).or_default().recall_pct = Some(recall_pct);
    }

    /// Get the bucket for a key
    pub fn get(&self, key: &AggregationKey) -> Option<&StatBucket> {
        self.buckets.get(key)
    }

    /// Bucket for a key, empty if the key was never seen
    pub fn bucket_or_empty(&self, key: &AggregationKey) -> StatBucket {
        self.buckets.get(key).copied().unwrap_or_default()
    }

    /// Keys in ascending order
    pub fn keys(&self) -> impl Iterator<Item = &AggregationKey> {
        self.buckets.keys()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Counters for one collected directory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectStats {
    /// `.xml` entries found in the directory
    pub xml_files: usize,
    /// Records that were applied to the dataset (including `Other` kinds)
    pub records_used: usize,
    /// Files dropped: unparseable, no parameters, or bad numeric values
    pub skipped: usize,
}
