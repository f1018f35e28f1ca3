//! Benchmark result XML parser
//!
//! Result files look like:
//!
//! ```text
//! <report>
//!   <parameters><parameter name="target_hits">10</parameter> ...</parameters>
//!   <metrics><metric name="avgresponsetime">1.234</metric> ...</metrics>
//! </report>
//! ```
//!
//! Only `parameter` elements directly under a top-level `parameters` element
//! (and likewise for `metrics`) are read. The root element name is not checked.

use crate::types::{MetricRecord, ReportError, Result};
use roxmltree::{Document, Node, ParsingOptions};
use std::collections::HashMap;
use std::path::Path;

/// Parse a result file, reporting why it could not be read
pub fn parse_record_file(path: &Path) -> Result<MetricRecord> {
    let content = std::fs::read_to_string(path)?;
    parse_record(&content)
}

/// Parse a result file, turning any failure into `None`
pub fn try_parse_record_file(path: &Path) -> Option<MetricRecord> {
    parse_record_file(path).ok()
}

/// Parse the XML text of one result file
pub fn parse_record(xml: &str) -> Result<MetricRecord> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let document = Document::parse_with_options(xml, options)
        .map_err(|e| ReportError::XmlParse(e.to_string()))?;
    let root = document.root_element();

    Ok(MetricRecord {
        parameters: named_values(root, "parameters", "parameter")?,
        metrics: named_values(root, "metrics", "metric")?,
    })
}

/// Collect `<group><item name="...">text</item></group>` pairs under `root`
fn named_values(root: Node<'_, '_>, group: &str, item: &str) -> Result<HashMap<String, String>> {
    let mut values = HashMap::new();

    for group_node in root.children().filter(|n| n.has_tag_name(group)) {
        for item_node in group_node.children().filter(|n| n.has_tag_name(item)) {
            let name = item_node
                .attribute("name")
                .ok_or_else(|| ReportError::MissingAttribute {
                    element: item.to_string(),
                })?;
            values.insert(name.to_string(), leading_text(item_node));
        }
    }

    Ok(values)
}

/// Text of `node` up to its first child element, with comments skipped
fn leading_text(node: Node<'_, '_>) -> String {
    node.children()
        .take_while(|child| !child.is_element())
        .filter(|child| child.is_text())
        .filter_map(|child| child.text())
        .collect()
}
