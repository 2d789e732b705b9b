//! Daemon configuration.
//!
//! Values come from an optional TOML file, overridden key by key by command
//! line flags and their environment variables (`SERVERS`, `INTERVAL`,
//! `CHANNEL`, `DISCORD_TOKEN`, `STEAM_TOKEN`, ...). [`RawConfig::validate`]
//! turns the merged values into a [`WatchConfig`] or a fatal
//! [`ConfigError`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;
use serde::Deserialize;
use thiserror::Error;

use steamwatch_discord::{ClearPolicy, DiscordConfig};
use steamwatch_steam::SteamConfig;

/// Configuration problems. All of them stop the daemon before it polls.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no servers configured (set SERVERS or `servers`)")]
    MissingServers,

    #[error("missing required setting `{0}`")]
    MissingField(&'static str),

    #[error("invalid duration for `{field}`: {value:?}")]
    InvalidDuration { field: &'static str, value: String },

    #[error("`{0}` must be greater than zero")]
    NonPositiveDuration(&'static str),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Unvalidated settings, as read from a file or the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    pub servers: Option<Vec<String>>,
    pub interval: Option<String>,
    pub channel: Option<String>,
    pub discord_token: Option<String>,
    pub steam_token: Option<String>,
    pub steam_api_url: Option<String>,
    pub discord_api_url: Option<String>,
    pub request_timeout: Option<String>,
    pub clear_policy: Option<ClearPolicy>,
}

/// Validated daemon settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfig {
    /// Addresses in polling order.
    pub servers: Vec<String>,
    pub interval: Duration,
    pub steam: SteamConfig,
    pub discord: DiscordConfig,
    pub clear_policy: ClearPolicy,
}

impl RawConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Overlay `other` on `self`. Settings present in `other` win.
    pub fn merge(self, other: RawConfig) -> RawConfig {
        RawConfig {
            servers: other.servers.or(self.servers),
            interval: other.interval.or(self.interval),
            channel: other.channel.or(self.channel),
            discord_token: other.discord_token.or(self.discord_token),
            steam_token: other.steam_token.or(self.steam_token),
            steam_api_url: other.steam_api_url.or(self.steam_api_url),
            discord_api_url: other.discord_api_url.or(self.discord_api_url),
            request_timeout: other.request_timeout.or(self.request_timeout),
            clear_policy: other.clear_policy.or(self.clear_policy),
        }
    }

    /// Configured addresses with blank entries dropped.
    pub fn server_list(&self) -> Vec<String> {
        self.servers
            .iter()
            .flatten()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Settings for the status source alone.
    pub fn steam(&self) -> Result<SteamConfig, ConfigError> {
        Ok(SteamConfig {
            api_url: self
                .steam_api_url
                .clone()
                .unwrap_or_else(|| SteamConfig::DEFAULT_API_URL.to_string()),
            key: required(&self.steam_token, "steam_token")?,
            timeout: self.request_timeout()?,
        })
    }

    fn request_timeout(&self) -> Result<Duration, ConfigError> {
        match &self.request_timeout {
            Some(value) => positive_duration("request_timeout", value),
            None => Ok(SteamConfig::DEFAULT_TIMEOUT),
        }
    }

    pub fn validate(self) -> Result<WatchConfig, ConfigError> {
        let servers = self.server_list();
        if servers.is_empty() {
            return Err(ConfigError::MissingServers);
        }

        let interval = match &self.interval {
            Some(value) => positive_duration("interval", value)?,
            None => return Err(ConfigError::MissingField("interval")),
        };

        let steam = self.steam()?;
        let discord = DiscordConfig {
            api_url: self
                .discord_api_url
                .clone()
                .unwrap_or_else(|| DiscordConfig::DEFAULT_API_URL.to_string()),
            token: required(&self.discord_token, "discord_token")?,
            channel_id: required(&self.channel, "channel")?,
            timeout: self.request_timeout()?,
        };

        Ok(WatchConfig {
            servers,
            interval,
            steam,
            discord,
            clear_policy: self.clear_policy.unwrap_or_default(),
        })
    }
}

/// Command line flags, each backed by an environment variable.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// TOML config file; flags and environment override its values.
    #[arg(long, env = "STEAMWATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Comma separated server addresses (ip:port), polled in this order.
    #[arg(long, env = "SERVERS", value_delimiter = ',')]
    pub servers: Vec<String>,

    /// Poll interval: "30s", "500ms", "2m", or plain milliseconds.
    #[arg(long, env = "INTERVAL")]
    pub interval: Option<String>,

    /// Discord channel id notifications are posted to.
    #[arg(long, env = "CHANNEL")]
    pub channel: Option<String>,

    #[arg(long, env = "DISCORD_TOKEN", hide_env_values = true)]
    pub discord_token: Option<String>,

    /// Steam Web API key.
    #[arg(long, env = "STEAM_TOKEN", hide_env_values = true)]
    pub steam_token: Option<String>,

    #[arg(long, env = "STEAM_API_URL")]
    pub steam_api_url: Option<String>,

    #[arg(long, env = "DISCORD_API_URL")]
    pub discord_api_url: Option<String>,

    /// Timeout for each HTTP request.
    #[arg(long, env = "REQUEST_TIMEOUT")]
    pub request_timeout: Option<String>,

    /// What to do with the live message when a server empties: delete or detach.
    #[arg(long, env = "CLEAR_POLICY")]
    pub clear_policy: Option<ClearPolicy>,
}

impl ConfigArgs {
    /// Read the config file, if any, and apply flags on top.
    pub fn load(self) -> Result<RawConfig, ConfigError> {
        let base = match &self.config {
            Some(path) => RawConfig::from_file(path)?,
            None => RawConfig::default(),
        };
        Ok(base.merge(self.into_raw()))
    }

    fn into_raw(self) -> RawConfig {
        RawConfig {
            servers: (!self.servers.is_empty()).then_some(self.servers),
            interval: self.interval,
            channel: self.channel,
            discord_token: self.discord_token,
            steam_token: self.steam_token,
            steam_api_url: self.steam_api_url,
            discord_api_url: self.discord_api_url,
            request_timeout: self.request_timeout,
            clear_policy: self.clear_policy,
        }
    }
}

fn required(value: &Option<String>, field: &'static str) -> Result<String, ConfigError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(ConfigError::MissingField(field))
}

fn positive_duration(field: &'static str, value: &str) -> Result<Duration, ConfigError> {
    if value.trim().starts_with('-') {
        return Err(ConfigError::NonPositiveDuration(field));
    }
    let duration = parse_duration(value).ok_or_else(|| ConfigError::InvalidDuration {
        field,
        value: value.to_string(),
    })?;
    if duration.is_zero() {
        return Err(ConfigError::NonPositiveDuration(field));
    }
    Ok(duration)
}

/// Parse a duration like "500ms", "5s", "1m". A bare number is milliseconds.
fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if let Some(ms) = s.strip_suffix("ms") {
        ms.trim().parse::<u64>().ok().map(Duration::from_millis)
    } else if let Some(secs) = s.strip_suffix('s') {
        secs.trim().parse::<u64>().ok().map(Duration::from_secs)
    } else if let Some(mins) = s.strip_suffix('m') {
        mins.trim()
            .parse::<u64>()
            .ok()
            .and_then(|m| m.checked_mul(60))
            .map(Duration::from_secs)
    } else {
        s.parse::<u64>().ok().map(Duration::from_millis)
    }
}
