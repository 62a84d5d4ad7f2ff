//! File-backed advertising identifier.

use std::path::PathBuf;

use loopy_core::AdvertisingId;
use tracing::info;
use uuid::Uuid;

use super::{IdentityError, PersistentId};

/// A user-resettable advertising identifier stored in a file.
///
/// When ad tracking is limited the stored value is neither read nor
/// created and [`AdvertisingId::LimitedTracking`] is reported.
#[derive(Debug, Clone)]
pub struct FileAdvertisingId {
    store: PersistentId,
    limit_ad_tracking: bool,
}

impl FileAdvertisingId {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: PersistentId::new(path),
            limit_ad_tracking: false,
        }
    }

    #[must_use]
    pub const fn with_limit_ad_tracking(mut self, limit: bool) -> Self {
        self.limit_ad_tracking = limit;
        self
    }

    pub fn advertising_id(&self) -> AdvertisingId {
        if self.limit_ad_tracking {
            return AdvertisingId::LimitedTracking;
        }
        AdvertisingId::from_uuid(self.store.load_or_create())
    }

    /// Issue a fresh identifier, unlinking past activity from future activity.
    pub fn reset(&self) -> Result<Uuid, IdentityError> {
        let id = self.store.regenerate()?;
        info!("Advertising identifier reset");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_available_and_stable() {
        let dir = TempDir::new().unwrap();
        let ad = FileAdvertisingId::new(dir.path().join("idfa"));

        let first = ad.advertising_id();
        assert!(matches!(first, AdvertisingId::Available(_)));
        assert_eq!(first, ad.advertising_id());
    }

    #[test]
    fn test_limited_tracking_does_not_touch_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("idfa");
        let ad = FileAdvertisingId::new(&path).with_limit_ad_tracking(true);

        assert_eq!(ad.advertising_id(), AdvertisingId::LimitedTracking);
        assert!(!path.exists());
    }

    #[test]
    fn test_reset_issues_new_identifier() {
        let dir = TempDir::new().unwrap();
        let ad = FileAdvertisingId::new(dir.path().join("idfa"));

        let before = ad.advertising_id().as_uuid().unwrap();
        let reset = ad.reset().unwrap();

        assert_ne!(before, reset);
        assert_eq!(ad.advertising_id().as_uuid(), Some(reset));
    }
}
