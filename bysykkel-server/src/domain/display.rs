//! Marker display mode.

use std::fmt;
use std::str::FromStr;

use super::ReconciledStation;

/// Error returned when parsing an unknown display mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid display mode: {0} (expected \"bikes\" or \"docks\")")]
pub struct InvalidDisplayMode(String);

/// What the map markers show: available bikes or available docks.
///
/// # Examples
///
/// ```
/// use bysykkel_server::domain::DisplayMode;
///
/// let mode: DisplayMode = "Docks".parse().unwrap();
/// assert_eq!(mode, DisplayMode::Docks);
/// assert_eq!(DisplayMode::default(), DisplayMode::Bikes);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DisplayMode {
    #[default]
    Bikes,
    Docks,
}

impl DisplayMode {
    /// The count a marker shows for `station` in this mode.
    pub fn count(self, station: &ReconciledStation) -> u32 {
        match self {
            DisplayMode::Bikes => station.num_bikes_available,
            DisplayMode::Docks => station.num_docks_available,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DisplayMode::Bikes => "bikes",
            DisplayMode::Docks => "docks",
        }
    }
}

impl FromStr for DisplayMode {
    type Err = InvalidDisplayMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bikes" => Ok(DisplayMode::Bikes),
            "docks" => Ok(DisplayMode::Docks),
            _ => Err(InvalidDisplayMode(s.to_string())),
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
