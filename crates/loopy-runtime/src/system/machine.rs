//! Host identity and hardware model lookups.

use std::fs;

use tracing::debug;

/// DMI product name, e.g. `ThinkPad X1 Carbon Gen 11`.
#[cfg(target_os = "linux")]
const DMI_PRODUCT_NAME: &str = "/sys/devices/virtual/dmi/id/product_name";

/// Read the first non-empty line of `path`.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn read_trimmed(path: &str) -> Option<String> {
    fs::read_to_string(path)
        .ok()
        .map(|s| s.lines().next().unwrap_or("").trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Stable machine identifier from the platform.
///
/// - macOS: `IOPlatformUUID`
/// - Linux: `/etc/machine-id` or `/var/lib/dbus/machine-id`
/// - Windows: `MachineGuid` from the registry
pub fn machine_id() -> Option<String> {
    match machine_uid::get() {
        Ok(id) => Some(id.trim().to_string()).filter(|id| !id.is_empty()),
        Err(e) => {
            debug!(error = %e, "Machine id unavailable");
            None
        }
    }
}

/// Hardware model, falling back to the CPU architecture.
pub fn hardware_model() -> String {
    #[cfg(target_os = "linux")]
    {
        if let Some(model) = read_trimmed(DMI_PRODUCT_NAME) {
            return model;
        }
    }

    std::env::consts::ARCH.to_string()
}
