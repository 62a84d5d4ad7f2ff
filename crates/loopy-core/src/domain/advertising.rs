//! Advertising identifier availability.

use uuid::Uuid;

/// State of the platform advertising identifier.
///
/// Platforms report an all-zero identifier when the user limited ad
/// tracking, so [`AdvertisingId::from_uuid`] maps the nil UUID to
/// [`AdvertisingId::LimitedTracking`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvertisingId {
    /// A usable, user-resettable identifier.
    Available(Uuid),
    /// The user opted out of ad tracking.
    LimitedTracking,
    /// The platform has no advertising identifier.
    Unavailable,
}

impl AdvertisingId {
    /// Classify a raw identifier reported by the platform.
    pub fn from_uuid(id: Uuid) -> Self {
        if id.is_nil() {
            Self::LimitedTracking
        } else {
            Self::Available(id)
        }
    }

    /// The identifier, if it may be reported.
    pub const fn as_uuid(&self) -> Option<Uuid> {
        match self {
            Self::Available(id) => Some(*id),
            Self::LimitedTracking | Self::Unavailable => None,
        }
    }
}
