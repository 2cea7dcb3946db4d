//! Location lookup: permission, one position fix, reverse geocoding

pub mod geocode;
pub mod provider;

pub use geocode::Geocoder;
pub use provider::{IpLocator, LocationProvider, PermissionStatus, PositionSource, SystemLocation};

use tracing::{debug, warn};

use crate::core::{Coordinates, LocationError, LocationLabel};

/// Run permission -> position -> geocode, strictly in that order.
///
/// A denied permission stops the sequence before any position request.
pub async fn locate(
    provider: &dyn LocationProvider,
) -> Result<(Coordinates, LocationLabel), LocationError> {
    if provider.request_permission().await == PermissionStatus::Denied {
        warn!("Location permission denied");
        return Err(LocationError::PermissionDenied);
    }

    let coords = provider.current_position().await?;
    debug!("Position fix: {}", coords);

    let label = provider.reverse_geocode(coords).await?;
    Ok((coords, label))
}
