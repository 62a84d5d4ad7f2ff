//! Location service ports.
//!
//! A [`LocationProvider`] pushes fixes to a [`LocationObserver`] from
//! whatever thread it runs on. Observers must be cheap and non-blocking.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::Location;

/// Errors reported by location providers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    /// The user or platform denied access to location services.
    #[error("Location permission denied")]
    PermissionDenied,

    /// Location services cannot produce a fix.
    #[error("Location unavailable: {0}")]
    Unavailable(String),
}

/// Receiver of asynchronous location events.
pub trait LocationObserver: Send + Sync {
    /// A new fix is available.
    fn on_location_update(&self, location: Location);

    /// The provider failed after it was started.
    fn on_location_error(&self, error: LocationError);
}

/// Source of location fixes.
#[cfg_attr(test, mockall::automock)]
pub trait LocationProvider: Send + Sync {
    /// Begin delivering fixes to `observer`.
    ///
    /// Implementations may request permission here. An error means no
    /// updates will be delivered.
    fn start(&self, observer: Arc<dyn LocationObserver>) -> Result<(), LocationError>;

    /// Stop delivering fixes. Calling this on a stopped provider is a no-op.
    fn stop(&self);
}
