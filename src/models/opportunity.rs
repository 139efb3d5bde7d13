use serde::{Deserialize, Serialize};
use std::fmt;

use super::{check_percentage, check_range, ValidationError};

/// Window the leaderboard PnL is measured over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1h")]
    Hour,
    #[default]
    #[serde(rename = "24h")]
    Day,
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
}

impl Timeframe {
    pub fn from_query(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "1h" => Some(Timeframe::Hour),
            "24h" | "1d" => Some(Timeframe::Day),
            "7d" | "1w" => Some(Timeframe::Week),
            "30d" => Some(Timeframe::Month),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Hour => "1h",
            Timeframe::Day => "24h",
            Timeframe::Week => "7d",
            Timeframe::Month => "30d",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pnl {
    pub absolute: f64,
    pub percentage: f64,
    pub period: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletEvidence {
    pub profitable_trades: Vec<String>,
    pub total_swaps: u32,
}

/// Leaderboard entry for a profitable wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopWallet {
    pub address: String,
    pub label: String,
    pub pnl: Pnl,
    pub sharpe_ratio: f64,
    pub volume: f64,
    pub win_rate: f64,
    pub trades: u32,
    pub avg_trade_size: f64,
    pub top_tokens: Vec<String>,
    pub risk_score: f64,
    pub evidence: WalletEvidence,
}

impl TopWallet {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_percentage("winRate", self.win_rate)?;
        check_range("riskScore", self.risk_score, 0.0, 10.0)?;
        Ok(())
    }
}

/// A leaderboard wallet with the derived mirror-trade parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MirrorOpportunity {
    #[serde(flatten)]
    pub wallet: TopWallet,
    pub mirror_trade_url: String,
    pub confidence: f64,
    pub estimated_gas: String,
    pub slippage: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingPair {
    pub pair: String,
    pub volume: f64,
    pub change24h: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketInsights {
    pub total_volume: f64,
    pub active_traders: u32,
    pub top_pairs: Vec<TradingPair>,
    pub trends: Vec<String>,
}
