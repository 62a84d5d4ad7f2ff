//! Location provider for hosts without location hardware.
//!
//! Desktop and server hosts have no location service, so the fix comes from
//! configuration. The permission flag mirrors the platform prompt: a denied
//! provider refuses to start.

use std::sync::{Arc, Mutex, PoisonError};

use loopy_core::{Location, LocationError, LocationObserver, LocationProvider};
use tracing::debug;

/// Outcome of the (simulated) permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationPermission {
    #[default]
    Granted,
    Denied,
}

/// Provider that reports a single configured fix.
pub struct StaticLocationProvider {
    fix: Option<Location>,
    permission: LocationPermission,
    observer: Mutex<Option<Arc<dyn LocationObserver>>>,
}

impl StaticLocationProvider {
    pub const fn new(fix: Option<Location>) -> Self {
        Self {
            fix,
            permission: LocationPermission::Granted,
            observer: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn with_permission(mut self, permission: LocationPermission) -> Self {
        self.permission = permission;
        self
    }

    /// Whether an observer is currently registered.
    pub fn is_running(&self) -> bool {
        self.observer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Deliver a new fix to the registered observer, if running.
    pub fn publish(&self, location: Location) {
        let observer = self
            .observer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(observer) = observer {
            observer.on_location_update(location);
        }
    }
}

impl LocationProvider for StaticLocationProvider {
    fn start(&self, observer: Arc<dyn LocationObserver>) -> Result<(), LocationError> {
        if self.permission == LocationPermission::Denied {
            return Err(LocationError::PermissionDenied);
        }
        let Some(fix) = self.fix else {
            return Err(LocationError::Unavailable(
                "no location configured".to_string(),
            ));
        };

        *self
            .observer
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&observer));
        debug!(latitude = fix.latitude, longitude = fix.longitude, "Reporting configured location");
        observer.on_location_update(fix);
        Ok(())
    }

    fn stop(&self) {
        self.observer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }
}
