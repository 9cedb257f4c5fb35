//! Where station feeds come from.

use super::client::GbfsClient;
use super::error::FeedError;
use super::mock::MockFeedSource;
use super::types::FeedSnapshot;

/// The feed backend used by the web layer.
#[derive(Debug, Clone)]
pub enum FeedSource {
    /// Live upstream API
    Live(GbfsClient),
    /// JSON files on disk
    Mock(MockFeedSource),
}

impl FeedSource {
    /// Fetch both station feeds.
    pub async fn fetch_snapshot(&self) -> Result<FeedSnapshot, FeedError> {
        match self {
            FeedSource::Live(client) => client.fetch_snapshot().await,
            FeedSource::Mock(mock) => mock.fetch_snapshot().await,
        }
    }

    /// Short description for startup logging.
    pub fn describe(&self) -> String {
        match self {
            FeedSource::Live(client) => format!(
                "{}/{}",
                client.config().api_host,
                client.config().system_id
            ),
            FeedSource::Mock(mock) => format!("mock feeds in {}", mock.data_dir().display()),
        }
    }
}

impl From<GbfsClient> for FeedSource {
    fn from(client: GbfsClient) -> Self {
        FeedSource::Live(client)
    }
}

impl From<MockFeedSource> for FeedSource {
    fn from(mock: MockFeedSource) -> Self {
        FeedSource::Mock(mock)
    }
}
