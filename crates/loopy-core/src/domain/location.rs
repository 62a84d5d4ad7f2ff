//! Geographic fix reported by a location provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single location fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
    /// Horizontal accuracy radius in metres
    #[serde(rename = "accuracy")]
    pub horizontal_accuracy: f64,
    pub timestamp: DateTime<Utc>,
}

impl Location {
    /// A fix taken now with unknown accuracy.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            horizontal_accuracy: 0.0,
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub const fn with_accuracy(mut self, metres: f64) -> Self {
        self.horizontal_accuracy = metres;
        self
    }

    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Coordinates within WGS84 bounds and a non-negative accuracy.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
            && self.horizontal_accuracy >= 0.0
            && self.horizontal_accuracy.is_finite()
    }
}
