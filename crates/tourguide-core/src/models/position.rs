use chrono::{DateTime, Utc};
use geo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::TourGuideError;

/// A WGS84 latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// `[latitude, longitude]`, the order the chat endpoint expects
    pub fn as_pair(&self) -> [f64; 2] {
        [self.latitude, self.longitude]
    }

    /// Convert to a `geo` point (x = longitude, y = latitude)
    pub fn to_point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

impl From<Point<f64>> for Coordinates {
    fn from(point: Point<f64>) -> Self {
        Self::new(point.y(), point.x())
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lat: {:.4}, Lng: {:.4}", self.latitude, self.longitude)
    }
}

impl FromStr for Coordinates {
    type Err = TourGuideError;

    /// Parse `"lat,lon"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| TourGuideError::ConfigInvalid {
            key: "coordinates".to_string(),
            reason,
        };

        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| invalid(format!("expected 'lat,lon', got '{}'", s)))?;

        let latitude: f64 = lat
            .trim()
            .parse()
            .map_err(|_| invalid(format!("invalid latitude '{}'", lat.trim())))?;
        let longitude: f64 = lon
            .trim()
            .parse()
            .map_err(|_| invalid(format!("invalid longitude '{}'", lon.trim())))?;

        if !(-90.0..=90.0).contains(&latitude) {
            return Err(invalid(format!("latitude {} out of range", latitude)));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(invalid(format!("longitude {} out of range", longitude)));
        }

        Ok(Self::new(latitude, longitude))
    }
}

/// One reported device location sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub coordinates: Coordinates,

    /// Accuracy radius in meters
    pub accuracy: f64,

    pub timestamp: DateTime<Utc>,
}

impl Position {
    pub fn new(coordinates: Coordinates, accuracy: f64) -> Self {
        Self {
            coordinates,
            accuracy,
            timestamp: Utc::now(),
        }
    }
}

/// Options passed to a location provider when a watch starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchOptions {
    pub high_accuracy: bool,

    /// Per-fix timeout
    pub timeout: Duration,

    /// Oldest cached fix the provider may hand back
    pub maximum_age: Duration,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_millis(5000),
            maximum_age: Duration::ZERO,
        }
    }
}
