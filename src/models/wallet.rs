use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{block_string, check_numeric_percentage, check_percentage, Severity, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub sei: String,
    pub usd: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub total_transactions: u32,
    pub last24h: u32,
    pub avg_per_hour: String,
    pub pattern: String,
}

/// Risk components as numeric strings in [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub overall: String,
    pub identity: String,
    pub contract: String,
    pub liquidity: String,
    pub behavior: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictiveInsight {
    pub prediction: String,
    pub confidence: u8,
    pub evidence: Vec<String>,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRef {
    pub hash: String,
    pub block: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisEvidence {
    pub recent_transactions: Vec<TransactionRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletAnalysis {
    pub address: String,
    pub timestamp: DateTime<Utc>,
    pub balance: Balance,
    pub activity: Activity,
    pub behavior_score: String,
    pub risk_assessment: RiskAssessment,
    pub predictive_insights: Vec<PredictiveInsight>,
    pub evidence: AnalysisEvidence,
}

impl WalletAnalysis {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_numeric_percentage("behaviorScore", &self.behavior_score)?;

        let risk = &self.risk_assessment;
        check_numeric_percentage("riskAssessment.overall", &risk.overall)?;
        check_numeric_percentage("riskAssessment.identity", &risk.identity)?;
        check_numeric_percentage("riskAssessment.contract", &risk.contract)?;
        check_numeric_percentage("riskAssessment.liquidity", &risk.liquidity)?;
        check_numeric_percentage("riskAssessment.behavior", &risk.behavior)?;

        for insight in &self.predictive_insights {
            check_percentage("predictiveInsights.confidence", f64::from(insight.confidence))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    IncomingTransfer,
    OutgoingTransfer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletEvent {
    pub hash: String,
    #[serde(with = "block_string")]
    pub block_number: u64,
    #[serde(rename = "type")]
    pub kind: EventType,
    pub timestamp: DateTime<Utc>,
    pub contract: String,
}

/// Pattern flagged across a wallet's event history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnusualActivity {
    #[serde(rename = "type")]
    pub kind: String,
    pub count: u32,
    pub description: String,
    pub severity: Severity,
}
