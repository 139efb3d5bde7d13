use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::block_string;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkMetrics {
    pub avg_block_time: String,
    pub tps: u32,
    pub gas_price: String,
    pub network_load: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStatus {
    pub chain_id: u64,
    #[serde(with = "block_string")]
    pub latest_block: u64,
    pub block_time: String,
    pub response_time: String,
    pub rpc_endpoint: String,
    pub explorer: String,
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub metrics: NetworkMetrics,
}
