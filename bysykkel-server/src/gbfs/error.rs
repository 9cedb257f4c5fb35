//! Feed error types.

use std::fmt;

/// Which of the two upstream feeds a request concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    StationInformation,
    StationStatus,
}

impl Feed {
    /// File name of the feed document, relative to the system root.
    pub fn file_name(self) -> &'static str {
        match self {
            Feed::StationInformation => "station_information.json",
            Feed::StationStatus => "station_status.json",
        }
    }
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feed::StationInformation => f.write_str("stations"),
            Feed::StationStatus => f.write_str("station status"),
        }
    }
}

/// Errors that can occur when loading station feeds.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("error fetching {feed} from the API: {status}")]
    Status { feed: Feed, status: u16 },

    /// Failed to decode the feed document
    #[error("JSON parse error in {feed}: {message}")]
    Json { feed: Feed, message: String },

    /// Client identifier cannot be sent as a header value
    #[error("invalid client identifier: {0:?}")]
    InvalidHeader(String),

    /// Mock feed files missing or unreadable
    #[error("mock data error: {message}")]
    MockData { message: String },
}
