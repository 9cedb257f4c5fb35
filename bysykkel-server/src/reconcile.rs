//! Joining the station information and status feeds.
//!
//! The two GBFS feeds describe the same stations in the same order: index
//! `i` of one array and index `i` of the other are the same station. The
//! reconciler pairs them positionally and keeps only stations that can be
//! shown on the map (physical and installed).

use crate::domain::ReconciledStation;
use crate::gbfs::{RawStationInfo, RawStationStatus};

/// Join the two feeds by position and keep the available stations.
///
/// Output order follows `information`. Callers are expected to pass
/// slices of equal length; pairing stops at the shorter one.
pub fn reconcile(
    information: &[RawStationInfo],
    status: &[RawStationStatus],
) -> Vec<ReconciledStation> {
    information
        .iter()
        .zip(status)
        .map(|(info, status)| ReconciledStation {
            id: info.id.clone(),
            name: info.name.clone(),
            lat: info.lat,
            lon: info.lon,
            num_bikes_available: status.num_bikes_available,
            num_docks_available: status.num_docks_available,
            is_available: is_available(info, status),
            is_renting: status.is_renting,
            is_returning: status.is_returning,
        })
        .filter(|station| station.is_available)
        .collect()
}

/// A station is shown only if it is physical and installed.
pub fn is_available(info: &RawStationInfo, status: &RawStationStatus) -> bool {
    !info.is_virtual && status.is_installed
}

/// Result of checking that the two feeds line up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alignment {
    Aligned,
    LengthMismatch {
        information: usize,
        status: usize,
    },
    /// First index where the status entry names a different station.
    IdMismatch {
        index: usize,
        information_id: String,
        status_id: String,
    },
}

/// Check the positional join assumption.
///
/// Status entries without a `station_id` cannot be checked and are
/// assumed to match.
pub fn check_alignment(information: &[RawStationInfo], status: &[RawStationStatus]) -> Alignment {
    if information.len() != status.len() {
        return Alignment::LengthMismatch {
            information: information.len(),
            status: status.len(),
        };
    }

    information
        .iter()
        .zip(status)
        .enumerate()
        .find_map(|(index, (info, status))| {
            let status_id = status.station_id.as_ref()?;
            (status_id != &info.id).then(|| Alignment::IdMismatch {
                index,
                information_id: info.id.clone(),
                status_id: status_id.clone(),
            })
        })
        .unwrap_or(Alignment::Aligned)
}
