//! Request body for the `open` endpoint.

use chrono::Utc;
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::device::DeviceSettings;

/// SDK identification sent with every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientInfo {
    pub lang: String,
    pub version: String,
}

impl Default for ClientInfo {
    fn default() -> Self {
        Self {
            lang: "rust".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Body posted when a session opens.
#[derive(Debug, Clone, Serialize)]
pub struct OpenPayload {
    /// Per-install identifier
    pub stdid: Uuid,
    /// Unix timestamp in seconds
    pub timestamp: i64,
    pub device: Map<String, Value>,
    pub app: Map<String, Value>,
    pub client: ClientInfo,
}

impl OpenPayload {
    /// Compose the payload from the current device and app signals.
    pub fn from_settings(settings: &DeviceSettings, stdid: Uuid) -> Self {
        Self {
            stdid,
            timestamp: Utc::now().timestamp(),
            device: settings.device_dictionary(),
            app: settings.app_dictionary(),
            client: ClientInfo::default(),
        }
    }

    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Render as a JSON object.
    pub fn to_value(&self) -> Value {
        Value::Object(crate::domain::to_dictionary(self))
    }
}
