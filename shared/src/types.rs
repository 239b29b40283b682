//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// GPS coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsCoordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Where a forecast is requested for
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum LocationQuery {
    City(String),
    Coordinates(GpsCoordinates),
}

impl LocationQuery {
    /// Value for the weather API `q` parameter
    pub fn as_query_param(&self) -> String {
        match self {
            LocationQuery::City(name) => name.trim().to_string(),
            LocationQuery::Coordinates(coords) => {
                format!("{},{}", coords.latitude, coords.longitude)
            }
        }
    }
}

impl std::fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationQuery::City(name) => write!(f, "{}", name.trim()),
            LocationQuery::Coordinates(coords) => {
                write!(f, "({}, {})", coords.latitude, coords.longitude)
            }
        }
    }
}

/// Round to one decimal place, ties to even.
///
/// Rounds the exact decimal value of `value`. Scaling by 10 first would round
/// twice and turn 0.1499.. into a tie.
pub fn round_to_tenth(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}
