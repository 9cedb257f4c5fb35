//! Mock feed source for running without upstream access.
//!
//! Loads `station_information.json` and `station_status.json` from a
//! directory and serves them as if they were live API responses.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use super::error::{Feed, FeedError};
use super::types::{FeedEnvelope, FeedSnapshot};

/// Feed source backed by JSON files on disk.
#[derive(Debug, Clone)]
pub struct MockFeedSource {
    data_dir: PathBuf,
    snapshot: Arc<RwLock<FeedSnapshot>>,
}

impl MockFeedSource {
    /// Load both feed documents from `data_dir`.
    ///
    /// Fails if either file is missing or does not decode.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, FeedError> {
        let data_dir = data_dir.as_ref().to_path_buf();
        let snapshot = load_snapshot(&data_dir)?;

        Ok(Self {
            data_dir,
            snapshot: Arc::new(RwLock::new(snapshot)),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Return the loaded feeds.
    pub async fn fetch_snapshot(&self) -> Result<FeedSnapshot, FeedError> {
        let guard = self.snapshot.read().await;
        Ok(guard.clone())
    }

    /// Re-read both files from disk.
    ///
    /// On failure the previously loaded feeds are kept.
    pub async fn reload(&self) -> Result<usize, FeedError> {
        let information = read_feed_async(&self.data_dir, Feed::StationInformation).await?;
        let status = read_feed_async(&self.data_dir, Feed::StationStatus).await?;
        let snapshot = FeedSnapshot::new(information, status);
        let count = snapshot.information.stations().len();

        let mut guard = self.snapshot.write().await;
        *guard = snapshot;

        Ok(count)
    }
}

fn load_snapshot(data_dir: &Path) -> Result<FeedSnapshot, FeedError> {
    let information = read_feed(data_dir, Feed::StationInformation)?;
    let status = read_feed(data_dir, Feed::StationStatus)?;
    Ok(FeedSnapshot::new(information, status))
}

fn read_feed<T: DeserializeOwned>(
    data_dir: &Path,
    feed: Feed,
) -> Result<FeedEnvelope<T>, FeedError> {
    let path = data_dir.join(feed.file_name());
    let json = std::fs::read_to_string(&path).map_err(|e| read_error(&path, e))?;
    parse_feed(&path, feed, &json)
}

async fn read_feed_async<T: DeserializeOwned>(
    data_dir: &Path,
    feed: Feed,
) -> Result<FeedEnvelope<T>, FeedError> {
    let path = data_dir.join(feed.file_name());
    let json = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| read_error(&path, e))?;
    parse_feed(&path, feed, &json)
}

fn read_error(path: &Path, e: std::io::Error) -> FeedError {
    FeedError::MockData {
        message: format!("failed to read {}: {}", path.display(), e),
    }
}

fn parse_feed<T: DeserializeOwned>(
    path: &Path,
    feed: Feed,
    json: &str,
) -> Result<FeedEnvelope<T>, FeedError> {
    serde_json::from_str(json).map_err(|e| FeedError::Json {
        feed,
        message: format!("{}: {}", path.display(), e),
    })
}
