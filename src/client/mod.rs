//! HTTP client for the radar API and the polling controller built on it.

pub mod controller;
pub mod fallback;
pub mod feed;
pub mod watchlist;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::api::types::{OpportunitiesResponse, RecentAlertsResponse, WalletEventsResponse};
use crate::config::ClientConfig;
use crate::models::{NetworkStatus, Timeframe, WalletAnalysis};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{route} returned {status}")]
    Status { route: String, status: StatusCode },

    #[error("invalid API base URL {0}")]
    BaseUrl(String),
}

#[derive(Debug, Clone)]
pub struct RadarClient {
    http: Client,
    base_url: Url,
}

impl RadarClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.api_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| ClientError::BaseUrl(config.api_url.clone()))?;
        let http = Client::builder().timeout(config.request_timeout()).build()?;
        Ok(Self { http, base_url })
    }

    /// Appends `segments` to the base path, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::BaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let url = self.endpoint(segments)?;
        let route = url.path().to_string();
        let resp = self.http.get(url).query(query).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ClientError::Status { route, status });
        }

        Ok(resp.json().await?)
    }

    pub async fn recent_alerts(&self, limit: usize) -> Result<RecentAlertsResponse, ClientError> {
        self.get_json(&["api", "alerts", "recent"], &[("limit", limit.to_string())])
            .await
    }

    pub async fn top_opportunities(
        &self,
        limit: usize,
        timeframe: Timeframe,
    ) -> Result<OpportunitiesResponse, ClientError> {
        self.get_json(
            &["api", "opportunities", "top"],
            &[
                ("limit", limit.to_string()),
                ("timeframe", timeframe.to_string()),
            ],
        )
        .await
    }

    pub async fn wallet_analysis(&self, address: &str) -> Result<WalletAnalysis, ClientError> {
        self.get_json(&["api", "wallet", address, "analysis"], &[])
            .await
    }

    pub async fn wallet_events(
        &self,
        address: &str,
        limit: usize,
        offset: usize,
    ) -> Result<WalletEventsResponse, ClientError> {
        self.get_json(
            &["api", "wallet", address, "events"],
            &[("limit", limit.to_string()), ("offset", offset.to_string())],
        )
        .await
    }

    pub async fn network_status(&self) -> Result<NetworkStatus, ClientError> {
        self.get_json(&["api", "network", "status"], &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_api_is_http_error() {
        let config = ClientConfig {
            api_url: "http://127.0.0.1:9/".into(),
            request_timeout_ms: 500,
            ..ClientConfig::default()
        };
        let client = RadarClient::new(&config).unwrap();
        assert_eq!(client.base_url.as_str(), "http://127.0.0.1:9/");

        let err = client.network_status().await.unwrap_err();
        assert!(matches!(err, ClientError::Http(_)));
    }

    #[test]
    fn test_wallet_address_is_percent_encoded() {
        let config = ClientConfig {
            api_url: "http://localhost:3001/radar/".into(),
            ..ClientConfig::default()
        };
        let client = RadarClient::new(&config).unwrap();

        let url = client
            .endpoint(&["api", "wallet", "0xabc?x=1/y#z", "events"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:3001/radar/api/wallet/0xabc%3Fx=1%2Fy%23z/events"
        );
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_rejects_unusable_base_url() {
        for api_url in ["not a url", "mailto:ops@example.com"] {
            let config = ClientConfig {
                api_url: api_url.into(),
                ..ClientConfig::default()
            };
            assert!(matches!(
                RadarClient::new(&config),
                Err(ClientError::BaseUrl(_))
            ));
        }
    }
}
