//! Data source strategy behind the API handlers.
//!
//! Handlers only ever talk to `dyn DataSource`. `MockDataSource` serves the
//! demo data; `LiveDataSource` reads what it can from an EVM JSON-RPC node
//! and falls back to the mock for everything that would need an indexer.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::aggregate::sort_by_detected_desc;
use crate::config::{AppConfig, DataSourceKind};
use crate::explorer;
use crate::mock;
use crate::models::{
    Alert, MarketInsights, NetworkMetrics, NetworkStatus, Timeframe, TopWallet, ValidationError,
    WalletAnalysis, WalletEvent,
};

#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("invalid data: {0}")]
    Validation(#[from] ValidationError),

    #[error("RPC request failed: {0}")]
    Rpc(#[from] reqwest::Error),

    #[error("unexpected RPC response: {0}")]
    Unexpected(String),
}

#[async_trait]
pub trait DataSource: Send + Sync {
    fn kind(&self) -> DataSourceKind;

    /// Every currently known alert, newest detection first.
    async fn recent_alerts(&self) -> Result<Vec<Alert>, DataSourceError>;

    /// Full leaderboard for `timeframe`, ranked by PnL percentage.
    async fn top_wallets(&self, timeframe: Timeframe) -> Result<Vec<TopWallet>, DataSourceError>;

    async fn market_insights(&self) -> Result<MarketInsights, DataSourceError>;

    async fn wallet_analysis(&self, address: &str) -> Result<WalletAnalysis, DataSourceError>;

    /// Transfer events for `address`, newest first.
    async fn wallet_events(&self, address: &str) -> Result<Vec<WalletEvent>, DataSourceError>;

    async fn network_status(&self) -> Result<NetworkStatus, DataSourceError>;
}

/// Build the data source selected by `DATA_SOURCE`.
pub fn from_config(config: &AppConfig) -> anyhow::Result<Arc<dyn DataSource>> {
    let mock = MockDataSource::new(config);
    match config.data_source {
        DataSourceKind::Mock => Ok(Arc::new(mock)),
        DataSourceKind::Live => Ok(Arc::new(LiveDataSource::new(config, mock)?)),
    }
}

// ---------------------------------------------------------------------------
// Mock
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct MockDataSource {
    alert_pool: usize,
    chain_id: u64,
    rpc_endpoint: String,
    simulated_latency: Duration,
}

impl MockDataSource {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            alert_pool: config.mock_alert_pool,
            chain_id: config.chain_id,
            rpc_endpoint: config.rpc_url.clone(),
            simulated_latency: config.simulated_latency(),
        }
    }
}

#[async_trait]
impl DataSource for MockDataSource {
    fn kind(&self) -> DataSourceKind {
        DataSourceKind::Mock
    }

    async fn recent_alerts(&self) -> Result<Vec<Alert>, DataSourceError> {
        let mut alerts = mock::generate_alerts(self.alert_pool, Utc::now());
        for alert in &alerts {
            alert.validate()?;
        }
        sort_by_detected_desc(&mut alerts);
        Ok(alerts)
    }

    async fn top_wallets(&self, timeframe: Timeframe) -> Result<Vec<TopWallet>, DataSourceError> {
        let wallets = mock::leaderboard(timeframe);
        for wallet in &wallets {
            wallet.validate()?;
        }
        Ok(wallets)
    }

    async fn market_insights(&self) -> Result<MarketInsights, DataSourceError> {
        Ok(mock::market_insights())
    }

    async fn wallet_analysis(&self, address: &str) -> Result<WalletAnalysis, DataSourceError> {
        let analysis = mock::generate_wallet_analysis(address, Utc::now());
        analysis.validate()?;
        Ok(analysis)
    }

    async fn wallet_events(&self, _address: &str) -> Result<Vec<WalletEvent>, DataSourceError> {
        Ok(mock::generate_wallet_events(Utc::now()))
    }

    async fn network_status(&self) -> Result<NetworkStatus, DataSourceError> {
        let started = Instant::now();
        tokio::time::sleep(self.simulated_latency).await;

        Ok(mock::generate_network_status(
            self.chain_id,
            &self.rpc_endpoint,
            started.elapsed(),
            Utc::now(),
        ))
    }
}

// ---------------------------------------------------------------------------
// Live
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

/// Reads chain head and gas price from a JSON-RPC node.
#[derive(Debug, Clone)]
pub struct LiveDataSource {
    http: Client,
    rpc_url: String,
    chain_id: u64,
    fallback: MockDataSource,
}

impl LiveDataSource {
    pub fn new(config: &AppConfig, fallback: MockDataSource) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_millis(config.rpc_timeout_ms))
            .build()?;

        Ok(Self {
            http,
            rpc_url: config.rpc_url.clone(),
            chain_id: config.chain_id,
            fallback,
        })
    }

    async fn call_quantity(&self, method: &str) -> Result<u64, DataSourceError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": [],
        });

        let resp: RpcResponse = self
            .http
            .post(&self.rpc_url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(err) = resp.error {
            return Err(DataSourceError::Unexpected(format!(
                "{method}: {} ({})",
                err.message, err.code
            )));
        }

        let raw = resp
            .result
            .ok_or_else(|| DataSourceError::Unexpected(format!("{method}: missing result")))?;
        parse_quantity(&raw)
            .ok_or_else(|| DataSourceError::Unexpected(format!("{method}: bad quantity {raw:?}")))
    }
}

/// Parse a JSON-RPC hex quantity such as `"0x1b4"`.
fn parse_quantity(raw: &str) -> Option<u64> {
    let digits = raw.strip_prefix("0x")?;
    u64::from_str_radix(digits, 16).ok()
}

fn format_gwei(wei: u64) -> String {
    format!("{:.2} gwei", wei as f64 / 1e9)
}

#[async_trait]
impl DataSource for LiveDataSource {
    fn kind(&self) -> DataSourceKind {
        DataSourceKind::Live
    }

    async fn recent_alerts(&self) -> Result<Vec<Alert>, DataSourceError> {
        tracing::debug!("Live source has no alert indexer, serving mock alerts");
        self.fallback.recent_alerts().await
    }

    async fn top_wallets(&self, timeframe: Timeframe) -> Result<Vec<TopWallet>, DataSourceError> {
        self.fallback.top_wallets(timeframe).await
    }

    async fn market_insights(&self) -> Result<MarketInsights, DataSourceError> {
        self.fallback.market_insights().await
    }

    async fn wallet_analysis(&self, address: &str) -> Result<WalletAnalysis, DataSourceError> {
        self.fallback.wallet_analysis(address).await
    }

    async fn wallet_events(&self, address: &str) -> Result<Vec<WalletEvent>, DataSourceError> {
        self.fallback.wallet_events(address).await
    }

    async fn network_status(&self) -> Result<NetworkStatus, DataSourceError> {
        let started = Instant::now();
        let (latest_block, gas_price) = tokio::try_join!(
            self.call_quantity("eth_blockNumber"),
            self.call_quantity("eth_gasPrice"),
        )?;
        let elapsed = started.elapsed();

        tracing::debug!(
            latest_block = latest_block,
            gas_price = gas_price,
            elapsed_ms = elapsed.as_millis() as u64,
            "Fetched live network status"
        );

        Ok(NetworkStatus {
            chain_id: self.chain_id,
            latest_block,
            block_time: "400ms".to_string(),
            response_time: format!("{}ms", elapsed.as_millis()),
            rpc_endpoint: self.rpc_url.clone(),
            explorer: explorer::EXPLORER_BASE.to_string(),
            status: "healthy".to_string(),
            timestamp: Utc::now(),
            metrics: NetworkMetrics {
                avg_block_time: "400ms".to_string(),
                tps: 0,
                gas_price: format_gwei(gas_price),
                network_load: "unknown".to_string(),
            },
        })
    }
}
