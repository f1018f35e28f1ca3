//! Directory collection
//!
//! Builds a [`Dataset`] from every `.xml` result file in one directory.

use crate::config::ReportConfig;
use crate::parser::try_parse_record_file;
use crate::report::ComparisonReport;
use crate::types::{
    CollectStats, Dataset, MetricRecord, RecordKind, Result, METRIC_AVG_RESPONSE_TIME,
    METRIC_RECALL_AVG,
};
use std::fs;
use std::path::Path;

/// Collect latency and recall from all `.xml` files directly in `directory`
///
/// A directory that does not exist yields an empty dataset. Files are visited
/// in the order the file system lists them and the later file wins when two
/// files set the same field for the same key. Files that fail to parse, have
/// no parameters, or carry non-numeric values are skipped without error.
pub fn collect(directory: &Path) -> Result<(Dataset, CollectStats)> {
    let mut dataset = Dataset::new();
    let mut stats = CollectStats::default();

    if !directory.exists() {
        log::debug!(
            "Result directory {:?} does not exist, using empty dataset",
            directory
        );
        return Ok((dataset, stats));
    }

    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        if !entry.file_name().to_string_lossy().ends_with(".xml") {
            continue;
        }
        stats.xml_files += 1;

        let applied = try_parse_record_file(&entry.path())
            .filter(|record| !record.parameters.is_empty())
            .is_some_and(|record| apply_record(&mut dataset, &record));

        if applied {
            stats.records_used += 1;
        } else {
            stats.skipped += 1;
        }
    }

    log::debug!(
        "Collected {} keys from {:?} ({} xml files, {} skipped)",
        dataset.len(),
        directory,
        stats.xml_files,
        stats.skipped
    );

    Ok((dataset, stats))
}

/// Collect both directories and join them into a report
pub fn compare_directories(
    first: &Path,
    second: &Path,
    config: &ReportConfig,
) -> Result<ComparisonReport> {
    log::info!("Collecting {} results from {:?}", config.first_label, first);
    let (first_data, _) = collect(first)?;
    log::info!("Collecting {} results from {:?}", config.second_label, second);
    let (second_data, _) = collect(second)?;

    Ok(ComparisonReport::build(&first_data, &second_data, config))
}

/// Apply one record to the dataset; false if its values could not be read
fn apply_record(dataset: &mut Dataset, record: &MetricRecord) -> bool {
    let Ok(key) = record.aggregation_key() else {
        return false;
    };

    match record.kind() {
        RecordKind::HnswQuery => match record.float_metric_or_zero(METRIC_AVG_RESPONSE_TIME) {
            Ok(latency) => dataset.set_latency(key, latency),
            Err(_) => return false,
        },
        RecordKind::Recall => match record.float_metric_or_zero(METRIC_RECALL_AVG) {
            Ok(recall) => dataset.set_recall(key, recall),
            Err(_) => return false,
        },
        RecordKind::Other => {}
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AggregationKey;
    use std::path::PathBuf;

    fn write_result(
        dir: &Path,
        name: &str,
        params: &[(&str, &str)],
        metrics: &[(&str, &str)],
    ) {
        let mut xml = String::from("<report>\n  <parameters>\n");
        for (k, v) in params {
            xml.push_str(&format!("    <parameter name=\"{}\">{}</parameter>\n", k, v));
        }
        xml.push_str("  </parameters>\n  <metrics>\n");
        for (k, v) in metrics {
            xml.push_str(&format!("    <metric name=\"{}\">{}</metric>\n", k, v));
        }
        xml.push_str("  </metrics>\n</report>\n");
        fs::write(dir.join(name), xml).unwrap();
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let (dataset, stats) = collect(&PathBuf::from("no/such/results/dir")).unwrap();
        assert!(dataset.is_empty());
        assert_eq!(stats, CollectStats::default());
    }

    #[test]
    fn test_collect_latency_and_recall() {
        let dir = tempfile::tempdir().unwrap();
        write_result(
            dir.path(),
            "query.xml",
            &[
                ("type", "query"),
                ("algorithm", "hnsw"),
                ("target_hits", "10"),
                ("explore_hits", "50"),
            ],
            &[("avgresponsetime", "1.234")],
        );
        write_result(
            dir.path(),
            "recall.xml",
            &[("type", "recall"), ("target_hits", "10"), ("explore_hits", "50")],
            &[("recall.avg", "98.7")],
        );

        let (dataset, stats) = collect(dir.path()).unwrap();
        let bucket = dataset.get(&AggregationKey::new(10, 50)).unwrap();
        assert_eq!(bucket.latency_ms, Some(1.234));
        assert_eq!(bucket.recall_pct, Some(98.7));
        assert_eq!(stats.xml_files, 2);
        assert_eq!(stats.records_used, 2);
        assert_eq!(stats.skipped, 0);
    }

    #[test]
    fn test_non_hnsw_queries_do_not_set_latency() {
        let dir = tempfile::tempdir().unwrap();
        write_result(
            dir.path(),
            "bf.xml",
            &[("type", "query"), ("algorithm", "brute_force"), ("target_hits", "10")],
            &[("avgresponsetime", "12.0")],
        );
        write_result(
            dir.path(),
            "feed.xml",
            &[("type", "feed")],
            &[("feeder.throughput", "1000")],
        );

        let (dataset, stats) = collect(dir.path()).unwrap();
        assert!(dataset.is_empty());
        assert_eq!(stats.records_used, 2);
    }

    #[test]
    fn test_skips_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.xml"), "<report><parameters>").unwrap();
        fs::write(dir.path().join("empty.xml"), "<report/>").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        write_result(
            dir.path(),
            "bad_key.xml",
            &[("type", "recall"), ("target_hits", "many")],
            &[("recall.avg", "90.0")],
        );
        write_result(
            dir.path(),
            "bad_metric.xml",
            &[("type", "recall"), ("target_hits", "10")],
            &[("recall.avg", "n/a")],
        );

        let (dataset, stats) = collect(dir.path()).unwrap();
        assert!(dataset.is_empty());
        assert_eq!(stats.xml_files, 4);
        assert_eq!(stats.skipped, 4);
        assert_eq!(stats.records_used, 0);
    }

    #[test]
    fn test_doctype_result_is_used() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("recall.xml"),
            "<?xml version=\"1.0\"?>\n<!DOCTYPE report>\n<report>\
<parameters><parameter name=\"type\">recall</parameter>\
<parameter name=\"target_hits\"><!-- th -->10</parameter></parameters>\
<metrics><metric name=\"recall.avg\">97.5</metric></metrics></report>",
        )
        .unwrap();

        let (dataset, stats) = collect(dir.path()).unwrap();
        let bucket = dataset.get(&AggregationKey::new(10, 0)).unwrap();
        assert_eq!(bucket.recall_pct, Some(97.5));
        assert_eq!(stats.records_used, 1);
        assert_eq!(stats.skipped, 0);
    }

    #[test]
    fn test_missing_latency_metric_becomes_zero() {
        let dir = tempfile::tempdir().unwrap();
        write_result(
            dir.path(),
            "query.xml",
            &[
                ("type", "query"),
                ("algorithm", "hnsw"),
                ("target_hits", "100"),
                ("explore_hits", "0"),
            ],
            &[],
        );

        let (dataset, _) = collect(dir.path()).unwrap();
        let bucket = dataset.get(&AggregationKey::new(100, 0)).unwrap();
        assert_eq!(bucket.latency_ms, Some(0.0));
        assert_eq!(bucket.usable_latency(), None);
    }
}
