//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::gbfs::{FeedConfig, FeedError, FeedSource, GbfsClient, MockFeedSource};

/// Default listen address.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Default static assets directory.
const DEFAULT_STATIC_DIR: &str = "static";

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("invalid {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Where station feeds are loaded from.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedBackend {
    Live(FeedConfigSpec),
    Mock(PathBuf),
}

/// Plain-data form of [`FeedConfig`], comparable in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfigSpec {
    pub api_host: String,
    pub system_id: Option<String>,
    pub client_identifier: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl FeedConfigSpec {
    pub fn to_feed_config(&self) -> FeedConfig {
        let mut config = FeedConfig::new(&self.api_host);
        if let Some(system_id) = &self.system_id {
            config = config.with_system_id(system_id);
        }
        if let Some(identifier) = &self.client_identifier {
            config = config.with_client_identifier(identifier);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(secs);
        }
        config
    }
}

/// Server configuration.
///
/// | Variable            | Default           |
/// |---------------------|-------------------|
/// | `API_HOST`          | required unless `MOCK_FEEDS_DIR` is set |
/// | `FEED_SYSTEM`       | `oslobysykkel.no` |
/// | `CLIENT_IDENTIFIER` | `bysykkel-demoapp` |
/// | `FEED_TIMEOUT_SECS` | `30`              |
/// | `BIND_ADDR`         | `127.0.0.1:3000`  |
/// | `STATIC_DIR`        | `static`          |
/// | `MOCK_FEEDS_DIR`    | unset             |
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub feeds: FeedBackend,
    pub bind_addr: SocketAddr,
    pub static_dir: PathBuf,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset.
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let feeds = match get("MOCK_FEEDS_DIR") {
            Some(dir) => FeedBackend::Mock(PathBuf::from(dir)),
            None => {
                let api_host = get("API_HOST").ok_or(ConfigError::Missing("API_HOST"))?;
                let timeout_secs = get("FEED_TIMEOUT_SECS")
                    .map(|v| {
                        v.parse::<u64>().map_err(|e| ConfigError::Invalid {
                            name: "FEED_TIMEOUT_SECS",
                            value: v.clone(),
                            reason: e.to_string(),
                        })
                    })
                    .transpose()?;

                FeedBackend::Live(FeedConfigSpec {
                    api_host,
                    system_id: get("FEED_SYSTEM"),
                    client_identifier: get("CLIENT_IDENTIFIER"),
                    timeout_secs,
                })
            }
        };

        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                name: "BIND_ADDR",
                value: bind_raw.clone(),
                reason: e.to_string(),
            })?;

        let static_dir = PathBuf::from(
            get("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
        );

        Ok(Self {
            feeds,
            bind_addr,
            static_dir,
        })
    }

    /// Build the feed source this configuration describes.
    pub fn feed_source(&self) -> Result<FeedSource, FeedError> {
        match &self.feeds {
            FeedBackend::Live(spec) => Ok(GbfsClient::new(spec.to_feed_config())?.into()),
            FeedBackend::Mock(dir) => Ok(MockFeedSource::new(dir)?.into()),
        }
    }
}
