pub mod alert;
pub mod network;
pub mod opportunity;
pub mod wallet;

pub use alert::{Alert, AlertDraft, AlertEvidence, AlertType};
pub use network::{NetworkMetrics, NetworkStatus};
pub use opportunity::{
    MarketInsights, MirrorOpportunity, Pnl, Timeframe, TopWallet, TradingPair, WalletEvidence,
};
pub use wallet::{
    Activity, AnalysisEvidence, Balance, EventType, PredictiveInsight, RiskAssessment,
    TransactionRef, UnusualActivity, WalletAnalysis, WalletEvent,
};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Bounds validation
// ---------------------------------------------------------------------------

/// A numeric field fell outside its documented range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} = {value:?} is not numeric")]
    NotNumeric { field: &'static str, value: String },

    #[error("alert {id}: latency {latency_ms}ms does not match its timestamps")]
    LatencyMismatch { id: String, latency_ms: i64 },
}

pub(crate) fn check_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), ValidationError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange { field, value, min, max })
    }
}

pub(crate) fn check_percentage(field: &'static str, value: f64) -> Result<(), ValidationError> {
    check_range(field, value, 0.0, 100.0)
}

/// Scores travel as numeric strings ("15.2"); parse then range-check.
pub(crate) fn check_numeric_percentage(
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    let parsed: f64 = value.parse().map_err(|_| ValidationError::NotNumeric {
        field,
        value: value.to_string(),
    })?;
    check_percentage(field, parsed)
}

/// Serialize a block height as a decimal string, the way explorers and the
/// dashboard exchange it.
pub(crate) mod block_string {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(n),
            Raw::Text(s) => s.parse().map_err(de::Error::custom),
        }
    }
}
