//! GBFS HTTP client.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;

use super::error::{Feed, FeedError};
use super::types::{FeedEnvelope, FeedSnapshot, RawStationInfo, RawStationStatus};

/// Default bike-share system served by the upstream API.
pub const DEFAULT_SYSTEM_ID: &str = "oslobysykkel.no";

/// Default value of the `Client-Identifier` header.
pub const DEFAULT_CLIENT_IDENTIFIER: &str = "bysykkel-demoapp";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the GBFS client.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Base URL of the upstream API, without trailing slash
    pub api_host: String,
    /// Path segment naming the bike-share system
    pub system_id: String,
    /// Sent as `Client-Identifier`; the upstream API requires it
    pub client_identifier: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl FeedConfig {
    /// Create a new config for the given API host.
    pub fn new(api_host: impl Into<String>) -> Self {
        Self {
            api_host: api_host.into().trim_end_matches('/').to_string(),
            system_id: DEFAULT_SYSTEM_ID.to_string(),
            client_identifier: DEFAULT_CLIENT_IDENTIFIER.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_system_id(mut self, system_id: impl Into<String>) -> Self {
        self.system_id = system_id.into();
        self
    }

    pub fn with_client_identifier(mut self, client_identifier: impl Into<String>) -> Self {
        self.client_identifier = client_identifier.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Full URL of a feed document.
    pub fn feed_url(&self, feed: Feed) -> String {
        format!("{}/{}/{}", self.api_host, self.system_id, feed.file_name())
    }
}

/// Client for the upstream GBFS API.
#[derive(Debug, Clone)]
pub struct GbfsClient {
    http: reqwest::Client,
    config: FeedConfig,
}

impl GbfsClient {
    /// Create a new client.
    pub fn new(config: FeedConfig) -> Result<Self, FeedError> {
        let mut headers = HeaderMap::new();

        let identifier = HeaderValue::from_str(&config.client_identifier)
            .map_err(|_| FeedError::InvalidHeader(config.client_identifier.clone()))?;
        headers.insert(HeaderName::from_static("client-identifier"), identifier);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    pub async fn fetch_station_information(
        &self,
    ) -> Result<FeedEnvelope<RawStationInfo>, FeedError> {
        self.fetch_feed(Feed::StationInformation).await
    }

    pub async fn fetch_station_status(&self) -> Result<FeedEnvelope<RawStationStatus>, FeedError> {
        self.fetch_feed(Feed::StationStatus).await
    }

    /// Fetch both feeds concurrently.
    ///
    /// Fails as soon as either request fails.
    pub async fn fetch_snapshot(&self) -> Result<FeedSnapshot, FeedError> {
        let (information, status) = futures::future::try_join(
            self.fetch_station_information(),
            self.fetch_station_status(),
        )
        .await?;

        Ok(FeedSnapshot::new(information, status))
    }

    async fn fetch_feed<T: DeserializeOwned>(
        &self,
        feed: Feed,
    ) -> Result<FeedEnvelope<T>, FeedError> {
        let url = self.config.feed_url(feed);
        tracing::debug!(%url, "fetching feed");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(FeedError::Status {
                feed,
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| FeedError::Json {
            feed,
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = FeedConfig::new("https://gbfs.example.com");
        assert_eq!(config.api_host, "https://gbfs.example.com");
        assert_eq!(config.system_id, DEFAULT_SYSTEM_ID);
        assert_eq!(config.client_identifier, DEFAULT_CLIENT_IDENTIFIER);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn config_builder() {
        let config = FeedConfig::new("http://localhost:9000/")
            .with_system_id("bergenbysykkel.no")
            .with_client_identifier("acme-map")
            .with_timeout(5);

        assert_eq!(config.api_host, "http://localhost:9000");
        assert_eq!(config.system_id, "bergenbysykkel.no");
        assert_eq!(config.client_identifier, "acme-map");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn feed_urls() {
        let config = FeedConfig::new("http://localhost:9000");
        assert_eq!(
            config.feed_url(Feed::StationInformation),
            "http://localhost:9000/oslobysykkel.no/station_information.json"
        );
        assert_eq!(
            config.feed_url(Feed::StationStatus),
            "http://localhost:9000/oslobysykkel.no/station_status.json"
        );
    }

    #[test]
    fn client_creation() {
        let client = GbfsClient::new(FeedConfig::new("http://localhost:9000"));
        assert!(client.is_ok());
    }

    #[test]
    fn client_rejects_unprintable_identifier() {
        let config = FeedConfig::new("http://localhost:9000").with_client_identifier("bad\nid");
        let err = GbfsClient::new(config).unwrap_err();
        assert!(matches!(err, FeedError::InvalidHeader(_)));
    }

    #[tokio::test]
    async fn error_status_is_reported_per_feed() {
        use crate::gbfs::test_upstream::spawn_upstream;

        let (api_host, seen) = spawn_upstream(reqwest::StatusCode::INTERNAL_SERVER_ERROR).await;
        let client = GbfsClient::new(FeedConfig::new(api_host)).unwrap();

        let err = client.fetch_station_information().await.unwrap_err();
        assert!(matches!(
            err,
            FeedError::Status {
                feed: Feed::StationInformation,
                status: 500
            }
        ));

        let err = client.fetch_station_status().await.unwrap_err();
        assert!(matches!(
            err,
            FeedError::Status {
                feed: Feed::StationStatus,
                status: 500
            }
        ));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen.iter().all(|id| id == DEFAULT_CLIENT_IDENTIFIER));
    }

    #[tokio::test]
    async fn custom_client_identifier_is_sent() {
        use crate::gbfs::test_upstream::spawn_upstream;

        let (api_host, seen) = spawn_upstream(reqwest::StatusCode::NOT_FOUND).await;
        let config = FeedConfig::new(api_host).with_client_identifier("acme-map");
        let client = GbfsClient::new(config).unwrap();

        let err = client.fetch_station_status().await.unwrap_err();
        assert!(matches!(err, FeedError::Status { status: 404, .. }));
        assert_eq!(*seen.lock().unwrap(), ["acme-map"]);
    }

    #[tokio::test]
    async fn unreachable_host_is_an_http_error() {
        // Port 1 is reserved; nothing listens there.
        let config = FeedConfig::new("http://127.0.0.1:1").with_timeout(2);
        let client = GbfsClient::new(config).unwrap();

        let err = client.fetch_snapshot().await.unwrap_err();
        assert!(matches!(err, FeedError::Http(_)));
    }
}
