//! GBFS wire types.
//!
//! Only the fields the map needs are decoded; everything else in the
//! feed documents is ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::ReconciledStation;
use crate::reconcile::{Alignment, check_alignment, reconcile};

/// Top-level GBFS document: metadata plus a `data.stations` array.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedEnvelope<T> {
    /// Unix timestamp of when the upstream snapshot was produced.
    #[serde(default)]
    pub last_updated: Option<i64>,
    /// Seconds the document may be considered fresh.
    #[serde(default)]
    pub ttl: Option<u32>,
    pub data: FeedData<T>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedData<T> {
    pub stations: Vec<T>,
}

impl<T> FeedEnvelope<T> {
    pub fn new(stations: Vec<T>) -> Self {
        Self {
            last_updated: None,
            ttl: None,
            data: FeedData { stations },
        }
    }

    pub fn stations(&self) -> &[T] {
        &self.data.stations
    }
}

/// One entry of `station_information.json`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawStationInfo {
    #[serde(rename = "station_id")]
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// Optional in GBFS; absent means a physical station.
    #[serde(
        rename = "is_virtual_station",
        default,
        deserialize_with = "deserialize_flag"
    )]
    pub is_virtual: bool,
}

/// One entry of `station_status.json`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawStationStatus {
    /// Only used to check alignment with the information feed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station_id: Option<String>,
    #[serde(deserialize_with = "deserialize_flag")]
    pub is_installed: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub is_renting: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub is_returning: bool,
    pub num_bikes_available: u32,
    pub num_docks_available: u32,
}

/// GBFS 1.x encodes flags as 0/1, later versions as booleans.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(u8),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(n) => n != 0,
    })
}

/// Both feeds as fetched for a single request.
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    pub information: FeedEnvelope<RawStationInfo>,
    pub status: FeedEnvelope<RawStationStatus>,
}

impl FeedSnapshot {
    pub fn new(
        information: FeedEnvelope<RawStationInfo>,
        status: FeedEnvelope<RawStationStatus>,
    ) -> Self {
        Self {
            information,
            status,
        }
    }

    /// Join and filter the two feeds into displayable stations.
    pub fn reconcile(&self) -> Vec<ReconciledStation> {
        reconcile(self.information.stations(), self.status.stations())
    }

    /// Check that the two feeds line up by position.
    pub fn alignment(&self) -> Alignment {
        check_alignment(self.information.stations(), self.status.stations())
    }

    /// When upstream produced the data, preferring the status feed.
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.status
            .last_updated
            .or(self.information.last_updated)
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}
