//! Device settings collector.
//!
//! [`DeviceSettings`] reads the static signals from a [`DeviceProbePort`]
//! once, optionally starts a [`LocationProvider`], and keeps the result in
//! an immutable [`DeviceSnapshot`]. Location updates swap in a new snapshot,
//! so a reader on any thread sees either the old record or the new one.

use std::sync::{Arc, PoisonError, RwLock};

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::domain::{AppInfo, DeviceSnapshot, Location, non_empty};
use crate::hashing::md5_hex;
use crate::ports::{DeviceProbePort, LocationError, LocationObserver, LocationProvider};

/// Shared cell holding the current snapshot. Also the location observer.
struct SnapshotCell {
    current: RwLock<Arc<DeviceSnapshot>>,
}

impl SnapshotCell {
    fn new(snapshot: DeviceSnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    fn load(&self) -> Arc<DeviceSnapshot> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    fn store_location(&self, location: Location) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let next = guard.with_location(location);
        *guard = Arc::new(next);
    }
}

impl LocationObserver for SnapshotCell {
    fn on_location_update(&self, location: Location) {
        if !location.is_valid() {
            warn!(
                latitude = location.latitude,
                longitude = location.longitude,
                "Ignoring invalid location fix"
            );
            return;
        }
        debug!(
            latitude = location.latitude,
            longitude = location.longitude,
            accuracy = location.horizontal_accuracy,
            "Location updated"
        );
        self.store_location(location);
    }

    fn on_location_error(&self, error: LocationError) {
        warn!(%error, "Location provider reported an error; keeping last known location");
    }
}

/// Collector for device and application signals.
///
/// # Example
///
/// ```ignore
/// let settings = DeviceSettings::without_locations(&probe, app);
/// let device = settings.device_dictionary();
/// ```
pub struct DeviceSettings {
    cell: Arc<SnapshotCell>,
    app: AppInfo,
    /// Set only when the provider was started successfully.
    locations: Option<Arc<dyn LocationProvider>>,
}

impl DeviceSettings {
    /// Collect device signals from `probe`.
    ///
    /// When `locations_disabled` is true the location provider is never
    /// started, so no permission prompt is triggered and the location stays
    /// unset for the lifetime of this collector.
    pub fn new(
        probe: &dyn DeviceProbePort,
        app: AppInfo,
        locations: Option<Arc<dyn LocationProvider>>,
        locations_disabled: bool,
    ) -> Self {
        let cell = Arc::new(SnapshotCell::new(Self::collect(probe)));

        let locations = if locations_disabled {
            debug!("Location services disabled");
            None
        } else {
            locations.and_then(|provider| {
                let observer: Arc<dyn LocationObserver> = cell.clone();
                match provider.start(observer) {
                    Ok(()) => {
                        info!("Location updates started");
                        Some(provider)
                    }
                    Err(error) => {
                        warn!(%error, "Location services unavailable");
                        None
                    }
                }
            })
        };

        Self {
            cell,
            app,
            locations,
        }
    }

    /// Collect device signals without ever touching location services.
    pub fn without_locations(probe: &dyn DeviceProbePort, app: AppInfo) -> Self {
        Self::new(probe, app, None, true)
    }

    fn collect(probe: &dyn DeviceProbePort) -> DeviceSnapshot {
        let advertising_id = probe.advertising_id();
        if advertising_id.as_uuid().is_none() {
            debug!(?advertising_id, "Advertising identifier not reported");
        }

        let raw_id = probe.raw_device_id();
        let md5id = if raw_id.trim().is_empty() {
            warn!("Platform reported no device identifier; omitting device id");
            String::new()
        } else {
            md5_hex(&raw_id)
        };

        DeviceSnapshot {
            md5id,
            idfa: advertising_id.as_uuid(),
            device_model: non_empty(probe.device_model()),
            os: non_empty(probe.os_name()),
            os_version: non_empty(probe.os_version()),
            carrier_name: probe
                .carrier_name()
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
            location: None,
        }
    }

    /// Consistent view of every device field.
    pub fn snapshot(&self) -> Arc<DeviceSnapshot> {
        self.cell.load()
    }

    /// Last known location, if any.
    pub fn current_location(&self) -> Option<Location> {
        self.cell.load().location
    }

    pub const fn app_info(&self) -> &AppInfo {
        &self.app
    }

    /// Whether a location provider is delivering updates.
    pub const fn locations_active(&self) -> bool {
        self.locations.is_some()
    }

    /// Device-level signals: `id`, `idfa`, `model`, `os`, `os_version`,
    /// `carrier` and `geo`. Unset optional fields are omitted.
    pub fn device_dictionary(&self) -> Map<String, Value> {
        self.cell.load().to_dictionary()
    }

    /// App-level signals: `id`, `name`, `version` and `build`.
    pub fn app_dictionary(&self) -> Map<String, Value> {
        self.app.to_dictionary()
    }

    /// Lowercase hex MD5 of `input`.
    pub fn md5_from_string(&self, input: &str) -> String {
        md5_hex(input)
    }

    /// Stop location updates. The last known location is kept.
    pub fn stop_location_updates(&mut self) {
        if let Some(provider) = self.locations.take() {
            provider.stop();
            info!("Location updates stopped");
        }
    }
}

impl Drop for DeviceSettings {
    fn drop(&mut self) {
        self.stop_location_updates();
    }
}
