//! HTTP client for the Steam game server list.

use std::time::Duration;

use tracing::{debug, warn};

use steamwatch_state::{Observation, Snapshot};

use crate::error::FetchError;
use crate::response::GetServerListResponse;
use crate::source::StatusSource;

const USER_AGENT: &str = concat!("steamwatch/", env!("CARGO_PKG_VERSION"));

/// Connection settings for the Steam Web API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SteamConfig {
    /// Base URL, without the service path.
    pub api_url: String,
    /// Steam Web API key.
    pub key: String,
    /// Upper bound for one query, connect included.
    pub timeout: Duration,
}

impl SteamConfig {
    pub const DEFAULT_API_URL: &'static str = "https://api.steampowered.com";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Config for the public API with the default timeout.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            api_url: Self::DEFAULT_API_URL.to_string(),
            key: key.into(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }
}

/// Status source that looks servers up by address in the Steam server list.
#[derive(Debug, Clone)]
pub struct SteamStatusSource {
    client: reqwest::Client,
    endpoint: String,
    key: String,
}

impl SteamStatusSource {
    pub fn new(config: &SteamConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/IGameServersService/GetServerList/v1/",
                config.api_url.trim_end_matches('/')
            ),
            key: config.key.clone(),
        })
    }

    /// Query one address. `Ok(None)` means the list had no matching entry.
    pub async fn query(&self, address: &str) -> Result<Option<Snapshot>, FetchError> {
        let filter = format!("addr\\{address}");
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[("key", self.key.as_str()), ("filter", filter.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = resp.bytes().await?;
        let parsed: GetServerListResponse = serde_json::from_slice(&body)?;
        Ok(parsed.into_snapshot(address))
    }
}

impl StatusSource for SteamStatusSource {
    async fn fetch(&self, address: &str) -> Observation {
        match self.query(address).await {
            Ok(Some(snapshot)) => Observation::Reachable(snapshot),
            Ok(None) => {
                debug!(%address, "server not listed");
                Observation::Unreachable
            }
            Err(e) => {
                warn!(%address, error = %e, "status query failed");
                Observation::Unreachable
            }
        }
    }
}
