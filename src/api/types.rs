use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::EventSummary;
use crate::models::{
    Alert, MarketInsights, MirrorOpportunity, Timeframe, TopWallet, UnusualActivity, WalletEvent,
};

/// Body of `GET /api/alerts/recent`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentAlertsResponse {
    pub alerts: Vec<Alert>,
    pub metadata: AlertsMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertsMetadata {
    /// Size of the full alert set, not of the returned page.
    pub total: usize,
    pub avg_latency: f64,
    pub last_updated: DateTime<Utc>,
    pub monitored_blocks: u64,
}

/// Body of `GET /api/opportunities/top`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunitiesResponse {
    pub top_wallets: Vec<TopWallet>,
    pub mirror_opportunities: Vec<MirrorOpportunity>,
    pub market_insights: MarketInsights,
    pub metadata: OpportunitiesMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunitiesMetadata {
    pub timeframe: Timeframe,
    pub data_points: u32,
    pub last_updated: DateTime<Utc>,
    pub network: String,
}

/// Body of `GET /api/wallet/{address}/events`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletEventsResponse {
    pub address: String,
    pub events: Vec<WalletEvent>,
    pub pagination: Pagination,
    pub unusual_activities: Vec<UnusualActivity>,
    pub summary: EventSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    pub has_more: bool,
}

/// Body returned with HTTP 500 when the network status lookup fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStatusError {
    pub chain_id: u64,
    pub status: String,
    pub error: String,
    pub timestamp: DateTime<Utc>,
}
