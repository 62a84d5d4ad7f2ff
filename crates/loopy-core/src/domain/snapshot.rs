//! Immutable record of the device signals observed so far.

use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use super::Location;

/// Placeholder reported when the platform gives no value for a required field.
pub const UNKNOWN_VALUE: &str = "unknown";

/// Point-in-time view of the device signals.
///
/// A snapshot is never mutated. Each location update produces a new one via
/// [`DeviceSnapshot::with_location`], so readers always see a consistent
/// record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceSnapshot {
    /// MD5 of the raw platform identifier; empty when the platform has none
    #[serde(rename = "id", skip_serializing_if = "String::is_empty")]
    pub md5id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idfa: Option<Uuid>,
    #[serde(rename = "model")]
    pub device_model: String,
    /// Platform family, e.g. `linux`, `macos`
    pub os: String,
    pub os_version: String,
    #[serde(rename = "carrier", skip_serializing_if = "Option::is_none")]
    pub carrier_name: Option<String>,
    #[serde(rename = "geo", skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl DeviceSnapshot {
    /// Copy of this snapshot carrying `location` as the last known fix.
    #[must_use]
    pub fn with_location(&self, location: Location) -> Self {
        Self {
            location: Some(location),
            ..self.clone()
        }
    }

    /// Render as the device dictionary.
    pub fn to_dictionary(&self) -> Map<String, Value> {
        super::to_dictionary(self)
    }
}

/// Replace blank platform values with [`UNKNOWN_VALUE`].
pub(crate) fn non_empty(value: String) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        UNKNOWN_VALUE.to_string()
    } else {
        trimmed.to_string()
    }
}
