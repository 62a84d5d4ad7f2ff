//! Domain types for device and application signals.
//!
//! These are plain data records. Collection lives in [`crate::device`],
//! platform access lives behind the traits in [`crate::ports`].

mod advertising;
mod app;
mod location;
mod snapshot;

pub use advertising::AdvertisingId;
pub use app::AppInfo;
pub use location::Location;
pub use snapshot::{DeviceSnapshot, UNKNOWN_VALUE};

pub(crate) use snapshot::non_empty;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

/// Serialize a record into a JSON object.
///
/// Falls back to an empty map with a warning if the record does not
/// serialize to an object.
pub(crate) fn to_dictionary<T: Serialize>(record: &T) -> Map<String, Value> {
    match serde_json::to_value(record) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            warn!(kind = ?other, "Record did not serialize to an object; reporting it empty");
            Map::new()
        }
        Err(e) => {
            warn!(error = %e, "Failed to serialize record; reporting it empty");
            Map::new()
        }
    }
}
