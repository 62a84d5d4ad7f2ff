#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

pub mod device;
pub mod domain;
pub mod hashing;
pub mod payload;
pub mod ports;

// Re-export commonly used types for convenience
pub use device::DeviceSettings;
pub use domain::{AdvertisingId, AppInfo, DeviceSnapshot, Location, UNKNOWN_VALUE};
pub use hashing::md5_hex;
pub use payload::{ClientInfo, OpenPayload};
pub use ports::{DeviceProbePort, LocationError, LocationObserver, LocationProvider};
