//! Display-ready station type.

use serde::Serialize;

/// A station joined from the information and status feeds.
///
/// Only stations that are physical and installed are ever constructed by
/// the reconciler, so `is_available` is always `true` on values it
/// returns. The field is kept because the page and the JSON API both
/// expose it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciledStation {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub num_bikes_available: u32,
    pub num_docks_available: u32,
    pub is_available: bool,
    pub is_renting: bool,
    pub is_returning: bool,
}
