//! Device probe implementation for loopy-runtime.
//!
//! This module provides the `DefaultDeviceProbe` which implements
//! `DeviceProbePort` from loopy-core by querying the host OS.

mod machine;

use loopy_core::{AdvertisingId, DeviceProbePort};
use sysinfo::System;
use tracing::warn;

use crate::identity::{FileAdvertisingId, PersistentId};

pub use machine::{hardware_model, machine_id};

/// Default implementation of `DeviceProbePort`.
///
/// Desktop hosts have no telephony or platform advertising identifier, so
/// both are supplied by the composition root.
///
/// # Example
///
/// ```ignore
/// use loopy_runtime::DefaultDeviceProbe;
/// use loopy_core::DeviceProbePort;
///
/// let probe = DefaultDeviceProbe::new().with_carrier(Some("Vodafone".into()));
/// let version = probe.os_version();
/// ```
#[derive(Debug, Clone, Default)]
pub struct DefaultDeviceProbe {
    carrier: Option<String>,
    advertising: Option<FileAdvertisingId>,
    fallback_id: Option<PersistentId>,
}

impl DefaultDeviceProbe {
    /// Create a probe with no carrier and no advertising identifier.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_carrier(mut self, carrier: Option<String>) -> Self {
        self.carrier = carrier;
        self
    }

    #[must_use]
    pub fn with_advertising_id(mut self, advertising: FileAdvertisingId) -> Self {
        self.advertising = Some(advertising);
        self
    }

    /// Identifier used when the platform exposes no machine id.
    #[must_use]
    pub fn with_fallback_id(mut self, fallback: PersistentId) -> Self {
        self.fallback_id = Some(fallback);
        self
    }
}

/// Pick the raw device id: machine id, then the persisted fallback, then
/// the host name. Empty when none is available.
fn resolve_raw_id(
    machine: Option<String>,
    fallback: Option<&PersistentId>,
    host_name: impl FnOnce() -> Option<String>,
) -> String {
    if let Some(id) = machine {
        return id;
    }
    if let Some(store) = fallback {
        return store.load_or_create().to_string();
    }
    match host_name().filter(|name| !name.trim().is_empty()) {
        Some(name) => {
            warn!("No machine id available; using the host name as device id");
            name
        }
        None => {
            warn!("No machine id, fallback id or host name available");
            String::new()
        }
    }
}

impl DeviceProbePort for DefaultDeviceProbe {
    fn raw_device_id(&self) -> String {
        resolve_raw_id(machine_id(), self.fallback_id.as_ref(), System::host_name)
    }

    fn os_name(&self) -> String {
        std::env::consts::OS.to_string()
    }

    fn os_version(&self) -> String {
        System::os_version()
            .or_else(System::kernel_version)
            .unwrap_or_default()
    }

    fn device_model(&self) -> String {
        hardware_model()
    }

    fn carrier_name(&self) -> Option<String> {
        self.carrier.clone()
    }

    fn advertising_id(&self) -> AdvertisingId {
        self.advertising
            .as_ref()
            .map_or(AdvertisingId::Unavailable, FileAdvertisingId::advertising_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_os_name_matches_target() {
        let probe = DefaultDeviceProbe::new();
        assert_eq!(probe.os_name(), std::env::consts::OS);
    }

    #[test]
    fn test_device_model_is_never_empty() {
        assert!(!DefaultDeviceProbe::new().device_model().trim().is_empty());
    }

    #[test]
    fn test_raw_device_id_is_stable() {
        let probe = DefaultDeviceProbe::new();
        assert_eq!(probe.raw_device_id(), probe.raw_device_id());
    }

    #[test]
    fn test_raw_id_prefers_machine_id() {
        let dir = TempDir::new().unwrap();
        let fallback = PersistentId::new(dir.path().join("device-id"));

        let id = resolve_raw_id(Some("abc123".to_string()), Some(&fallback), || {
            Some("host".to_string())
        });

        assert_eq!(id, "abc123");
        assert!(fallback.load().is_none());
    }

    #[test]
    fn test_raw_id_uses_persisted_fallback() {
        let dir = TempDir::new().unwrap();
        let fallback = PersistentId::new(dir.path().join("device-id"));

        let first = resolve_raw_id(None, Some(&fallback), || None);
        let second = resolve_raw_id(None, Some(&fallback), || None);

        assert_eq!(first, second);
        assert_eq!(fallback.load().map(|id| id.to_string()), Some(first));
    }

    #[test]
    fn test_raw_id_without_any_source_is_empty() {
        assert_eq!(resolve_raw_id(None, None, || Some("laptop".to_string())), "laptop");
        assert_eq!(resolve_raw_id(None, None, || Some("  ".to_string())), "");
        assert_eq!(resolve_raw_id(None, None, || None), "");
    }

    #[test]
    fn test_carrier_passthrough() {
        assert_eq!(DefaultDeviceProbe::new().carrier_name(), None);
        let probe = DefaultDeviceProbe::new().with_carrier(Some("Orange".to_string()));
        assert_eq!(probe.carrier_name().as_deref(), Some("Orange"));
    }

    #[test]
    fn test_advertising_id_sources() {
        assert_eq!(
            DefaultDeviceProbe::new().advertising_id(),
            AdvertisingId::Unavailable
        );

        let dir = TempDir::new().unwrap();
        let probe = DefaultDeviceProbe::new()
            .with_advertising_id(FileAdvertisingId::new(dir.path().join("idfa")));
        assert!(matches!(probe.advertising_id(), AdvertisingId::Available(_)));
    }
}
