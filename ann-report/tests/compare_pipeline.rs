// End-to-end: result directories on disk -> markdown table
use ann_report::{collect, compare_directories, ComparisonReport, ReportConfig, ReportFormat};
use std::fs;
use std::path::Path;

fn write_result(dir: &Path, name: &str, params: &[(&str, &str)], metrics: &[(&str, &str)]) {
    let parameters: String = params
        .iter()
        .map(|(k, v)| format!("<parameter name=\"{}\">{}</parameter>", k, v))
        .collect();
    let metric_elems: String = metrics
        .iter()
        .map(|(k, v)| format!("<metric name=\"{}\">{}</metric>", k, v))
        .collect();
    let xml = format!(
        "<?xml version=\"1.0\"?>\n\
<report><parameters>{}</parameters><metrics>{}</metrics></report>\n",
        parameters, metric_elems
    );
    fs::write(dir.join(name), xml).unwrap();
}

fn write_run(dir: &Path, th: &str, eh: &str, latency: &str, recall: &str) {
    write_result(
        dir,
        &format!("query-th{}-eh{}.xml", th, eh),
        &[
            ("type", "query"),
            ("algorithm", "hnsw"),
            ("target_hits", th),
            ("explore_hits", eh),
        ],
        &[("avgresponsetime", latency)],
    );
    write_result(
        dir,
        &format!("recall-th{}-eh{}.xml", th, eh),
        &[("type", "recall"), ("target_hits", th), ("explore_hits", eh)],
        &[("recall.avg", recall)],
    );
}

#[test]
fn test_end_to_end_row() {
    let root = tempfile::tempdir().unwrap();
    let rq_dir = root.path().join("rq");
    let float_dir = root.path().join("float");
    fs::create_dir_all(&rq_dir).unwrap();
    fs::create_dir_all(&float_dir).unwrap();

    write_run(&rq_dir, "10", "50", "1.234", "98.7");
    write_run(&float_dir, "10", "50", "1.000", "99.5");

    let report = compare_directories(&rq_dir, &float_dir, &ReportConfig::default()).unwrap();
    let markdown = report.render(ReportFormat::Markdown).unwrap();

    assert!(markdown.starts_with("# Comparison: RQ vs. Float32\n"));
    assert!(markdown.contains("## Target Hits: 10\n"));
    assert!(markdown.contains("| 50 | 1.23 ms | 98.7% | 1.00 ms | 99.5% | +0.23 ms |"));
}

#[test]
fn test_one_sided_latency_has_no_row() {
    let root = tempfile::tempdir().unwrap();
    let rq_dir = root.path().join("rq");
    let float_dir = root.path().join("float");
    fs::create_dir_all(&rq_dir).unwrap();
    fs::create_dir_all(&float_dir).unwrap();

    write_run(&rq_dir, "10", "50", "1.234", "98.7");
    write_result(
        &float_dir,
        "recall.xml",
        &[("type", "recall"), ("target_hits", "10"), ("explore_hits", "50")],
        &[("recall.avg", "99.5")],
    );

    let report = compare_directories(&rq_dir, &float_dir, &ReportConfig::default()).unwrap();
    assert_eq!(report.row_count(), 0);
    assert!(!report.to_markdown().contains("| 50 |"));
}

#[test]
fn test_missing_second_directory() {
    let root = tempfile::tempdir().unwrap();
    let rq_dir = root.path().join("rq");
    fs::create_dir_all(&rq_dir).unwrap();
    write_run(&rq_dir, "100", "0", "2.5", "95.0");

    let (missing, stats) = collect(&root.path().join("float")).unwrap();
    assert!(missing.is_empty());
    assert_eq!(stats.xml_files, 0);

    let float_dir = root.path().join("float");
    let report = compare_directories(&rq_dir, &float_dir, &ReportConfig::default()).unwrap();
    assert_eq!(report.groups.len(), 1);
    assert_eq!(report.row_count(), 0);
}

#[test]
fn test_groups_and_rows_sorted() {
    let root = tempfile::tempdir().unwrap();
    let rq_dir = root.path().join("rq");
    let float_dir = root.path().join("float");
    fs::create_dir_all(&rq_dir).unwrap();
    fs::create_dir_all(&float_dir).unwrap();

    for (th, eh) in [("100", "300"), ("10", "90"), ("100", "0"), ("10", "0"), ("0", "0")] {
        write_run(&rq_dir, th, eh, "1.5", "97.0");
        write_run(&float_dir, th, eh, "1.0", "99.0");
    }

    let (rq, _) = collect(&rq_dir).unwrap();
    let (float, _) = collect(&float_dir).unwrap();
    let markdown = ComparisonReport::build(&rq, &float, &ReportConfig::default()).to_markdown();

    assert!(!markdown.contains("## Target Hits: 0\n"));
    let th10 = markdown.find("## Target Hits: 10\n").unwrap();
    let th100 = markdown.find("## Target Hits: 100\n").unwrap();
    assert!(th10 < th100);

    let section_10 = &markdown[th10..th100];
    let eh0 = section_10.find("| 0 | 1.50 ms").unwrap();
    let eh90 = section_10.find("| 90 | 1.50 ms").unwrap();
    assert!(eh0 < eh90);
    assert!(section_10.contains("| 90 | 1.50 ms | 97.0% | 1.00 ms | 99.0% | +0.50 ms |"));
}
