//! Where the user is, as far as the host platform is willing to say.

use crate::types::station::LatLon;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use thiserror::Error;

/// The platform refused or failed to provide a position.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Location unavailable: {reason}")]
pub struct LocationDenied {
    pub reason: String,
}

/// Source of the user's coordinate, e.g. a browser or OS geolocation service.
pub trait LocationProvider: Send + Sync {
    fn request_location(&self) -> BoxFuture<'_, Result<LatLon, LocationDenied>>;
}

/// A provider that always answers the same way.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedLocation(Result<LatLon, LocationDenied>);

impl FixedLocation {
    pub fn at(coordinate: LatLon) -> Self {
        Self(Ok(coordinate))
    }

    pub fn denied(reason: impl Into<String>) -> Self {
        Self(Err(LocationDenied {
            reason: reason.into(),
        }))
    }
}

impl LocationProvider for FixedLocation {
    fn request_location(&self) -> BoxFuture<'_, Result<LatLon, LocationDenied>> {
        futures_util::future::ready(self.0.clone()).boxed()
    }
}
