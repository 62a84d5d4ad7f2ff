//! Application metadata reported alongside device signals.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identity of the application embedding the SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    /// Bundle identifier, e.g. `com.example.app`
    #[serde(rename = "id")]
    pub bundle_id: String,
    /// Human-readable application name
    pub name: String,
    /// Marketing version
    pub version: String,
    /// Build number, if distinct from the version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<String>,
}

impl AppInfo {
    pub fn new(
        bundle_id: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            bundle_id: bundle_id.into(),
            name: name.into(),
            version: version.into(),
            build: None,
        }
    }

    #[must_use]
    pub fn with_build(mut self, build: impl Into<String>) -> Self {
        self.build = Some(build.into());
        self
    }

    /// Render as the app dictionary (`id`, `name`, `version`, `build`).
    pub fn to_dictionary(&self) -> Map<String, Value> {
        super::to_dictionary(self)
    }
}
