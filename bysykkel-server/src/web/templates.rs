//! Askama templates for the web frontend.

use askama::Template;
use chrono::{DateTime, Utc};

use crate::domain::{DisplayMode, ReconciledStation};

/// The station map.
#[derive(Template)]
#[template(path = "index.html")]
pub struct MapTemplate {
    pub stations: Vec<StationView>,
    pub mode: DisplayMode,
    pub last_updated: Option<String>,
}

impl MapTemplate {
    pub fn new(
        stations: &[ReconciledStation],
        mode: DisplayMode,
        last_updated: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            stations: stations
                .iter()
                .map(|s| StationView::from_station(s, mode))
                .collect(),
            mode,
            last_updated: last_updated.map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string()),
        }
    }

    pub fn showing_docks(&self) -> bool {
        self.mode == DisplayMode::Docks
    }
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
}

/// Station view model for the map page.
///
/// Both counts are rendered so the page can switch modes without a
/// round trip; `marker_label` is the count for the initial mode.
#[derive(Debug, Clone)]
pub struct StationView {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub bikes: u32,
    pub docks: u32,
    pub is_renting: bool,
    pub is_returning: bool,
    pub marker_label: u32,
    /// Nothing to take (bikes mode) for this station
    pub bikes_empty: bool,
    /// Nowhere to return (docks mode) for this station
    pub docks_empty: bool,
    pub marker_empty: bool,
}

impl StationView {
    pub fn from_station(station: &ReconciledStation, mode: DisplayMode) -> Self {
        Self {
            id: station.id.clone(),
            name: station.name.clone(),
            lat: station.lat,
            lon: station.lon,
            bikes: station.num_bikes_available,
            docks: station.num_docks_available,
            is_renting: station.is_renting,
            is_returning: station.is_returning,
            marker_label: mode.count(station),
            bikes_empty: is_empty_for(station, DisplayMode::Bikes),
            docks_empty: is_empty_for(station, DisplayMode::Docks),
            marker_empty: is_empty_for(station, mode),
        }
    }
}

/// Whether a marker should be greyed out in `mode`.
fn is_empty_for(station: &ReconciledStation, mode: DisplayMode) -> bool {
    match mode {
        DisplayMode::Bikes => station.num_bikes_available == 0 || !station.is_renting,
        DisplayMode::Docks => station.num_docks_available == 0 || !station.is_returning,
    }
}
