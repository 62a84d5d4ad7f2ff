//! Device probe port for static device signals.
//!
//! This port abstracts the platform queries (OS release, hardware model,
//! telephony, advertising identifier) from the core domain.
//!
//! # Design Notes
//!
//! - Core owns the trait (pure)
//! - Runtime owns the implementation (`DefaultDeviceProbe`)
//! - The CLI injects the probe at its composition root

use crate::domain::AdvertisingId;

/// Port for reading device signals that do not change during a session.
///
/// All methods are synchronous and infallible: a missing value is reported
/// as an empty string or `None` and normalised by the caller.
pub trait DeviceProbePort: Send + Sync {
    /// Stable raw identifier of this device. Hashed before it is reported.
    fn raw_device_id(&self) -> String;

    /// Platform family, e.g. `linux`.
    fn os_name(&self) -> String;

    /// Operating system version string.
    fn os_version(&self) -> String;

    /// Hardware model identifier.
    fn device_model(&self) -> String;

    /// Mobile network operator name, if any.
    fn carrier_name(&self) -> Option<String>;

    /// Advertising identifier and its availability.
    fn advertising_id(&self) -> AdvertisingId;
}
