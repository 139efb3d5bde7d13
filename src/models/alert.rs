use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{block_string, Severity, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    LargeTransfer,
    DexInteraction,
    UnusualActivity,
    NewToken,
    SmartContract,
    OffHours,
    MevActivity,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::LargeTransfer => "large_transfer",
            AlertType::DexInteraction => "dex_interaction",
            AlertType::UnusualActivity => "unusual_activity",
            AlertType::NewToken => "new_token",
            AlertType::SmartContract => "smart_contract",
            AlertType::OffHours => "off_hours",
            AlertType::MevActivity => "mev_activity",
        }
    }

    /// Human title shown in the alert list.
    pub fn title(&self) -> &'static str {
        match self {
            AlertType::LargeTransfer => "Large Transfer Detected",
            AlertType::DexInteraction => "DEX Interaction Alert",
            AlertType::UnusualActivity => "Unusual Activity Pattern",
            AlertType::NewToken => "New Token Purchase",
            AlertType::SmartContract => "Smart Contract Interaction",
            AlertType::OffHours => "Off-hours Activity",
            AlertType::MevActivity => "Potential MEV Activity",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertEvidence {
    pub contract: String,
    pub topics: Vec<String>,
    pub block_hash: String,
}

/// An on-chain alert as delivered to the dashboard.
///
/// `latency_ms` is always `delivered_at - detected_at`; build alerts through
/// [`Alert::new`] so the two can never disagree. Deserialization runs
/// [`Alert::validate`] and rejects a payload whose latency does not match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "AlertRecord")]
pub struct Alert {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AlertType,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub address: String,
    pub transaction_hash: String,
    #[serde(with = "block_string")]
    pub block_number: u64,
    pub detected_at: DateTime<Utc>,
    pub delivered_at: DateTime<Utc>,
    #[serde(alias = "latency")]
    pub latency_ms: i64,
    pub evidence: AlertEvidence,
}

/// Wire form of an [`Alert`] before the latency check.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AlertRecord {
    id: String,
    #[serde(rename = "type")]
    kind: AlertType,
    severity: Severity,
    title: String,
    description: String,
    address: String,
    transaction_hash: String,
    #[serde(with = "block_string")]
    block_number: u64,
    detected_at: DateTime<Utc>,
    delivered_at: DateTime<Utc>,
    #[serde(alias = "latency")]
    latency_ms: i64,
    evidence: AlertEvidence,
}

impl TryFrom<AlertRecord> for Alert {
    type Error = ValidationError;

    fn try_from(r: AlertRecord) -> Result<Self, Self::Error> {
        let alert = Alert {
            id: r.id,
            kind: r.kind,
            severity: r.severity,
            title: r.title,
            description: r.description,
            address: r.address,
            transaction_hash: r.transaction_hash,
            block_number: r.block_number,
            detected_at: r.detected_at,
            delivered_at: r.delivered_at,
            latency_ms: r.latency_ms,
            evidence: r.evidence,
        };
        alert.validate()?;
        Ok(alert)
    }
}

/// Everything an alert carries apart from the derived latency.
#[derive(Debug, Clone)]
pub struct AlertDraft {
    pub id: String,
    pub kind: AlertType,
    pub severity: Severity,
    pub description: String,
    pub address: String,
    pub transaction_hash: String,
    pub block_number: u64,
    pub evidence: AlertEvidence,
}

impl Alert {
    pub fn new(draft: AlertDraft, detected_at: DateTime<Utc>, delivered_at: DateTime<Utc>) -> Self {
        Self {
            id: draft.id,
            title: draft.kind.title().to_string(),
            kind: draft.kind,
            severity: draft.severity,
            description: draft.description,
            address: draft.address,
            transaction_hash: draft.transaction_hash,
            block_number: draft.block_number,
            detected_at,
            delivered_at,
            latency_ms: (delivered_at - detected_at).num_milliseconds(),
            evidence: draft.evidence,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let expected = (self.delivered_at - self.detected_at).num_milliseconds();
        if expected != self.latency_ms || self.latency_ms < 0 {
            return Err(ValidationError::LatencyMismatch {
                id: self.id.clone(),
                latency_ms: self.latency_ms,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Alert: id={} type={} severity={} address={} block={} latency={}ms",
            self.id,
            self.kind,
            self.severity,
            self.address.chars().take(10).collect::<String>(),
            self.block_number,
            self.latency_ms,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn draft() -> AlertDraft {
        AlertDraft {
            id: "alert_test".into(),
            kind: AlertType::LargeTransfer,
            severity: Severity::High,
            description: "test".into(),
            address: "0xabc".into(),
            transaction_hash: "0xdef".into(),
            block_number: 42,
            evidence: AlertEvidence {
                contract: "0x1".into(),
                topics: vec!["0x2".into()],
                block_hash: "0x3".into(),
            },
        }
    }

    #[test]
    fn test_latency_derived_from_timestamps() {
        let detected = Utc::now();
        let alert = Alert::new(draft(), detected, detected + Duration::milliseconds(800));
        assert_eq!(alert.latency_ms, 800);
        assert!(alert.validate().is_ok());
    }

    #[test]
    fn test_tampered_latency_fails_validation() {
        let detected = Utc::now();
        let mut alert = Alert::new(draft(), detected, detected + Duration::milliseconds(800));
        alert.latency_ms = 10;
        assert!(matches!(
            alert.validate(),
            Err(ValidationError::LatencyMismatch { .. })
        ));
    }

    #[test]
    fn test_wire_shape() {
        let detected = Utc::now();
        let alert = Alert::new(draft(), detected, detected + Duration::milliseconds(5));
        let json = serde_json::to_value(&alert).unwrap();
        assert_eq!(json["type"], "large_transfer");
        assert_eq!(json["blockNumber"], "42");
        assert_eq!(json["latencyMs"], 5);
        assert_eq!(json["title"], "Large Transfer Detected");
        assert_eq!(json["evidence"]["blockHash"], "0x3");
    }

    #[test]
    fn test_accepts_legacy_latency_field() {
        let detected = Utc::now();
        let alert = Alert::new(draft(), detected, detected + Duration::milliseconds(5));
        let mut json = serde_json::to_value(&alert).unwrap();
        let obj = json.as_object_mut().unwrap();
        let latency = obj.remove("latencyMs").unwrap();
        obj.insert("latency".into(), latency);

        let parsed: Alert = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, alert);
    }

    #[test]
    fn test_rejects_mismatched_latency_on_deserialize() {
        let detected = Utc::now();
        let alert = Alert::new(draft(), detected, detected + Duration::milliseconds(800));
        let mut json = serde_json::to_value(&alert).unwrap();
        json["latencyMs"] = serde_json::json!(10);

        let err = serde_json::from_value::<Alert>(json).unwrap_err();
        assert!(err.to_string().contains("alert_test"));
    }
}
