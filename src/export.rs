//! Alert export as CSV or a JSON document with verification metadata.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::verification_stats;
use crate::models::Alert;

pub const CSV_HEADER: [&str; 10] = [
    "ID",
    "Type",
    "Title",
    "Address",
    "Transaction Hash",
    "Block Number",
    "Detected At",
    "Delivered At",
    "Latency (ms)",
    "Severity",
];

const VERIFICATION_NOTE: &str =
    "Every alert carries its transaction hash and block number; check them on the block explorer.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Unknown or missing formats export JSON.
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()) {
            Some(s) if s == "csv" => ExportFormat::Csv,
            _ => ExportFormat::Json,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Json => "application/json",
        }
    }

    /// `sei-alerts-2026-10-19.csv`
    pub fn file_name(&self, now: DateTime<Utc>) -> String {
        let ext = match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        };
        format!("sei-alerts-{}.{ext}", now.format("%Y-%m-%d"))
    }
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn to_csv(alerts: &[Alert]) -> String {
    let mut out = CSV_HEADER.join(",");
    out.push('\n');

    for alert in alerts {
        let row = [
            csv_field(&alert.id),
            csv_field(alert.kind.as_str()),
            csv_field(&alert.title),
            csv_field(&alert.address),
            csv_field(&alert.transaction_hash),
            alert.block_number.to_string(),
            timestamp(alert.detected_at),
            timestamp(alert.delivered_at),
            alert.latency_ms.to_string(),
            alert.severity.as_str().to_string(),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub export_date: DateTime<Utc>,
    pub total_alerts: usize,
    pub avg_latency: f64,
    pub sub1s_alerts: usize,
    pub verification_note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub metadata: ExportMetadata,
    pub alerts: Vec<Alert>,
}

impl ExportDocument {
    pub fn new(alerts: Vec<Alert>, now: DateTime<Utc>) -> Self {
        let stats = verification_stats(&alerts);
        Self {
            metadata: ExportMetadata {
                export_date: now,
                total_alerts: stats.total_alerts,
                avg_latency: stats.avg_latency,
                sub1s_alerts: stats.sub1s_alerts,
                verification_note: VERIFICATION_NOTE.to_string(),
            },
            alerts,
        }
    }
}

pub fn to_json(alerts: &[Alert], now: DateTime<Utc>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ExportDocument::new(alerts.to_vec(), now))
}

pub fn from_json(raw: &str) -> serde_json::Result<ExportDocument> {
    serde_json::from_str(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;

    #[test]
    fn test_csv_header_and_rows() {
        let alerts = mock::generate_alerts(3, Utc::now());
        let csv = to_csv(&alerts);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "ID,Type,Title,Address,Transaction Hash,Block Number,Detected At,Delivered At,Latency (ms),Severity"
        );
        assert!(lines[1].starts_with("alert_0x1234_1,large_transfer,"));
        assert!(lines[1].ends_with(",800,high"));
    }

    #[test]
    fn test_csv_quotes_commas_and_quotes() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_json_export_parses_back() {
        let now = Utc::now();
        let alerts = mock::generate_alerts(5, now);
        let raw = to_json(&alerts, now).unwrap();
        let doc = from_json(&raw).unwrap();
        assert_eq!(doc.alerts, alerts);
        assert_eq!(doc.metadata.total_alerts, 5);
    }

    #[test]
    fn test_json_import_rejects_edited_latency() {
        let now = Utc::now();
        let raw = to_json(&mock::generate_alerts(3, now), now).unwrap();
        let mut doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
        doc["alerts"][1]["latencyMs"] = serde_json::json!(1);

        assert!(from_json(&doc.to_string()).is_err());
    }

    #[test]
    fn test_json_metadata_for_seed_set() {
        let alerts = mock::generate_alerts(3, Utc::now());
        let doc = ExportDocument::new(alerts, Utc::now());
        assert_eq!(doc.metadata.avg_latency, 767.0);
        assert_eq!(doc.metadata.sub1s_alerts, 3);
    }

    #[test]
    fn test_format_from_query() {
        assert_eq!(ExportFormat::from_query(Some("CSV")), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_query(Some("xml")), ExportFormat::Json);
        assert_eq!(ExportFormat::from_query(None), ExportFormat::Json);
    }
}
