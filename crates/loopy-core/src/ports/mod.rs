//! Port definitions for platform access.
//!
//! Core owns the traits; adapters (e.g. `loopy-runtime`) implement them and
//! the composition root injects them into [`crate::DeviceSettings`].

mod device_probe;
mod location;

pub use device_probe::DeviceProbePort;
pub use location::{LocationError, LocationObserver, LocationProvider};

#[cfg(test)]
pub use location::MockLocationProvider;
