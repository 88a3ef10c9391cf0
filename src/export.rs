//! Export and report formatting for classified exchanges
//!
//! Produces the two panel outputs: a JSON document for bulk download and a
//! clipboard-ready plain-text report for one exchange. Both are pure
//! transformations; an absent field renders as JSON null or an empty string.

use crate::types::ClassifiedExchange;
use std::fmt::Write;

/// Fixed filename for the bulk JSON download
pub const EXPORT_FILENAME: &str = "network-failures.json";

/// One entry of the bulk export document
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExportRecord {
    pub url: String,
    pub method: String,
    pub status: Option<u16>,
    pub summary_label: String,
    pub detail_payload: String,
}

impl ExportRecord {
    /// Build an export record from a classified exchange
    pub fn from_classified(exchange: &ClassifiedExchange) -> Self {
        Self {
            url: exchange.url.clone(),
            method: exchange.method.clone(),
            status: exchange.status,
            summary_label: exchange.summary_label.clone(),
            detail_payload: exchange.detail_payload.clone(),
        }
    }
}

/// Serialize export records as a pretty-printed JSON array.
///
/// Rendering never fails; a serialization problem degrades to an empty
/// array document.
pub fn export_document(records: &[ExportRecord]) -> String {
    serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string())
}

/// Format a plain-text, issue-tracker-flavored report for one exchange.
///
/// Labeled headings over the export fields, with the request payload and
/// detail payload inside fenced code blocks. Absent status renders as an
/// empty string.
pub fn issue_report(exchange: &ClassifiedExchange) -> String {
    let status = exchange
        .status
        .map(|s| s.to_string())
        .unwrap_or_default();

    let mut report = String::new();
    report.push_str("API FAILURE\n\n");
    let _ = writeln!(report, "URL: {}", exchange.url);
    let _ = writeln!(report, "Method: {}", exchange.method);
    let _ = writeln!(report, "Status: {}", status);
    let _ = writeln!(report, "Summary: {}", exchange.summary_label);
    report.push_str("\nRequest Payload:\n");
    let _ = writeln!(report, "```\n{}\n```", exchange.formatted_request_payload);
    report.push_str("\nError Response:\n");
    let _ = write!(report, "```\n{}\n```", exchange.detail_payload);
    report
}
