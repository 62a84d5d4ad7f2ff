//! Platform adapters for loopy.
//!
//! Implements the ports from `loopy-core` for desktop and server hosts:
//!
//! - [`DefaultDeviceProbe`] - OS release, hardware model and machine id
//! - [`FileAdvertisingId`] - resettable advertising identifier persisted on disk
//! - [`PersistentId`] - install-scoped identifier (`stdid`)
//! - [`StaticLocationProvider`] - a configured fix, gated by a permission flag

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

pub mod identity;
pub mod location;
pub mod paths;
pub mod system;

pub use identity::{FileAdvertisingId, IdentityError, PersistentId};
pub use location::{LocationPermission, StaticLocationProvider};
pub use paths::{PathError, data_root};
pub use system::DefaultDeviceProbe;

#[cfg(test)]
use tempfile as _;
