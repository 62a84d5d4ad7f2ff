//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where the runtime adapters are wired into
//! the core collector:
//! - Device probe and advertising identifier (via loopy-runtime)
//! - Location provider (via loopy-runtime)
//! - Install identifier persisted under the data directory
//!
//! Command handlers receive the fully-composed `CliContext`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use loopy_core::{AppInfo, DeviceSettings, Location, LocationProvider};
use loopy_runtime::{
    DefaultDeviceProbe, FileAdvertisingId, LocationPermission, PersistentId,
    StaticLocationProvider, data_root,
};
use tracing::debug;
use uuid::Uuid;

use crate::parser::DeviceArgs;

/// File name of the resettable advertising identifier.
pub const ADVERTISING_ID_FILE: &str = "advertising-id";
/// File name of the install identifier sent as `stdid`.
pub const INSTALL_ID_FILE: &str = "stdid";
/// File name of the device id used when the host exposes no machine id.
pub const DEVICE_ID_FILE: &str = "device-id";

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Directory for persisted identifiers; `None` resolves the default.
    pub data_dir: Option<PathBuf>,
    /// Configured location fix, if any.
    pub location: Option<Location>,
    /// Whether the location prompt is answered with "deny".
    pub deny_location: bool,
    /// Never start location services.
    pub disable_location: bool,
    pub carrier: Option<String>,
    pub limit_ad_tracking: bool,
}

impl CliConfig {
    /// Build config from the global device arguments.
    ///
    /// Coordinates outside WGS84 bounds are rejected.
    pub fn from_args(args: &DeviceArgs) -> Result<Self> {
        let location = match (args.latitude, args.longitude) {
            (Some(lat), Some(lon)) => {
                let location = Location::new(lat, lon);
                if !location.is_valid() {
                    bail!(
                        "Invalid location {lat},{lon}: latitude must be within [-90, 90] and longitude within [-180, 180]"
                    );
                }
                Some(location)
            }
            _ => None,
        };

        Ok(Self {
            data_dir: args.data_dir.as_ref().map(PathBuf::from),
            location,
            deny_location: args.deny_location,
            disable_location: args.no_location,
            carrier: args.carrier.clone(),
            limit_ad_tracking: args.limit_ad_tracking,
        })
    }

    fn resolve_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create {}", dir.display()))?;
                Ok(dir.clone())
            }
            None => Ok(data_root()?),
        }
    }
}

/// Fully composed context for CLI commands.
pub struct CliContext {
    /// The device signal collector.
    pub settings: DeviceSettings,
    /// Install-scoped identifier.
    pub stdid: Uuid,
    /// Advertising identifier store, for resets.
    pub advertising: FileAdvertisingId,
    /// Directory holding persisted identifiers.
    pub data_dir: PathBuf,
}

/// Identity of this binary as reported in the app dictionary.
pub fn app_info() -> AppInfo {
    AppInfo::new(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
    )
}

/// Wire the runtime adapters into a `CliContext`.
pub fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let data_dir = config.resolve_data_dir()?;
    debug!(data_dir = %data_dir.display(), "Resolved data directory");

    let advertising = FileAdvertisingId::new(data_dir.join(ADVERTISING_ID_FILE))
        .with_limit_ad_tracking(config.limit_ad_tracking);
    let stdid = PersistentId::new(data_dir.join(INSTALL_ID_FILE)).load_or_create();

    let probe = DefaultDeviceProbe::new()
        .with_carrier(config.carrier.clone())
        .with_advertising_id(advertising.clone())
        .with_fallback_id(PersistentId::new(data_dir.join(DEVICE_ID_FILE)));

    let permission = if config.deny_location {
        LocationPermission::Denied
    } else {
        LocationPermission::Granted
    };
    let provider: Arc<dyn LocationProvider> =
        Arc::new(StaticLocationProvider::new(config.location).with_permission(permission));

    let settings = DeviceSettings::new(
        &probe,
        app_info(),
        Some(provider),
        config.disable_location,
    );

    Ok(CliContext {
        settings,
        stdid,
        advertising,
        data_dir,
    })
}
