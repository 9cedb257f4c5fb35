//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::ReconciledStation;

/// Query string of the map page.
#[derive(Debug, Default, Deserialize)]
pub struct MapQuery {
    /// Initial marker content: "bikes" (default) or "docks"
    pub mode: Option<String>,
}

/// Response of the stations API.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<ReconciledStation>,

    /// RFC 3339 time the upstream data was produced, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
