//! GBFS feed access.
//!
//! Bike-share systems publish their data as General Bikeshare Feed
//! Specification (GBFS) JSON documents. We need two of them:
//! - `station_information.json`: static station metadata (name, position)
//! - `station_status.json`: live counts and operational flags
//!
//! The two feeds list the same stations in the same order, so they are
//! joined by array position (see [`crate::reconcile`]).

mod client;
mod error;
mod mock;
mod source;
mod types;

#[cfg(test)]
pub(crate) mod test_upstream;

pub use client::{DEFAULT_CLIENT_IDENTIFIER, FeedConfig, GbfsClient};
pub use error::{Feed, FeedError};
pub use mock::MockFeedSource;
pub use source::FeedSource;
pub use types::{FeedData, FeedEnvelope, FeedSnapshot, RawStationInfo, RawStationStatus};
