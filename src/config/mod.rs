use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_RPC_URL: &str = "https://evm-rpc.sei-apis.com";
const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";
const SEI_CHAIN_ID: u64 = 1329;

/// Where the API handlers get their data from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSourceKind {
    Mock,
    Live,
}

impl FromStr for DataSourceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mock" => Ok(DataSourceKind::Mock),
            "live" => Ok(DataSourceKind::Live),
            other => Err(anyhow::anyhow!("DATA_SOURCE must be 'mock' or 'live', got '{other}'")),
        }
    }
}

impl fmt::Display for DataSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSourceKind::Mock => write!(f, "mock"),
            DataSourceKind::Live => write!(f, "live"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,

    // Data source
    pub data_source: DataSourceKind,
    pub rpc_url: String,
    pub rpc_timeout_ms: u64,
    pub chain_id: u64,

    // Mock behaviour
    pub simulated_latency_ms: u64,
    pub mock_alert_pool: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            data_source: DataSourceKind::Mock,
            rpc_url: DEFAULT_RPC_URL.into(),
            rpc_timeout_ms: 5_000,
            chain_id: SEI_CHAIN_ID,
            simulated_latency_ms: 50,
            mock_alert_pool: 3,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,

            data_source: env::var("DATA_SOURCE")
                .unwrap_or_else(|_| "mock".into())
                .parse()?,
            rpc_url: env::var("RPC_URL").unwrap_or(defaults.rpc_url),
            rpc_timeout_ms: env_or("RPC_TIMEOUT_MS", defaults.rpc_timeout_ms),
            chain_id: env_or("CHAIN_ID", defaults.chain_id),

            simulated_latency_ms: env_or("SIMULATED_LATENCY_MS", defaults.simulated_latency_ms),
            mock_alert_pool: env_or("MOCK_ALERT_POOL", defaults.mock_alert_pool),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}

/// Settings for the polling dashboard client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub request_timeout_ms: u64,
    pub alert_poll_secs: u64,
    pub alert_limit: usize,
    pub opportunity_poll_secs: u64,
    pub network_poll_secs: u64,
    pub alert_inject_secs: u64,
    pub wallet_poll_secs: u64,
    /// Addresses followed at startup (`RADAR_WATCHLIST`, comma separated).
    pub watchlist: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            request_timeout_ms: 5_000,
            alert_poll_secs: 3,
            alert_limit: 20,
            opportunity_poll_secs: 30,
            network_poll_secs: 5,
            alert_inject_secs: 6,
            wallet_poll_secs: 30,
            watchlist: Vec::new(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            api_url: env::var("RADAR_API_URL").unwrap_or(defaults.api_url),
            request_timeout_ms: env_or("RADAR_CLIENT_TIMEOUT_MS", defaults.request_timeout_ms),
            alert_poll_secs: env_or("ALERT_POLL_SECS", defaults.alert_poll_secs),
            alert_limit: env_or("ALERT_LIMIT", defaults.alert_limit),
            opportunity_poll_secs: env_or("OPPORTUNITY_POLL_SECS", defaults.opportunity_poll_secs),
            network_poll_secs: env_or("NETWORK_POLL_SECS", defaults.network_poll_secs),
            alert_inject_secs: env_or("ALERT_INJECT_SECS", defaults.alert_inject_secs),
            wallet_poll_secs: env_or("WALLET_POLL_SECS", defaults.wallet_poll_secs),
            watchlist: env::var("RADAR_WATCHLIST")
                .map(|raw| parse_watchlist(&raw))
                .unwrap_or(defaults.watchlist),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn parse_watchlist(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(String::from)
        .collect()
}

/// Read and parse an env var, falling back to `default` when unset or invalid.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_source_kind_parse() {
        assert_eq!("mock".parse::<DataSourceKind>().unwrap(), DataSourceKind::Mock);
        assert_eq!(" LIVE ".parse::<DataSourceKind>().unwrap(), DataSourceKind::Live);
        assert!("postgres".parse::<DataSourceKind>().is_err());
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.chain_id, 1329);
        assert_eq!(config.mock_alert_pool, 3);
        assert_eq!(config.simulated_latency(), Duration::from_millis(50));

        let client = ClientConfig::default();
        assert_eq!(client.alert_poll_secs, 3);
        assert_eq!(client.request_timeout(), Duration::from_secs(5));
        assert!(client.watchlist.is_empty());
    }

    #[test]
    fn test_parse_watchlist() {
        assert_eq!(
            parse_watchlist(" 0xabc, ,0xdef ,"),
            vec!["0xabc".to_string(), "0xdef".to_string()]
        );
        assert!(parse_watchlist("").is_empty());
    }
}
