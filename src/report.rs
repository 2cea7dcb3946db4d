//! Location + weather lookup behind the UV Index tab

use tracing::{info, warn};

use crate::core::{Coordinates, LocationLabel, Result};
use crate::location::{locate, LocationProvider};
use crate::weather::{WeatherSnapshot, WeatherSource};

/// Everything the UV Index tab shows for one visit
#[derive(Debug, Clone, PartialEq)]
pub struct UvReport {
    pub label: LocationLabel,
    pub coordinates: Coordinates,
    pub snapshot: WeatherSnapshot,
}

impl UvReport {
    /// UV index for the gauge: the pinned value if one is configured,
    /// otherwise the fetched current index rounded to a whole number.
    pub fn gauge_index(&self, pinned: Option<f64>) -> f64 {
        pinned.unwrap_or_else(|| {
            self.snapshot
                .current_uv_index()
                .map(|uv| crate::weather::round_half_up(uv) as f64)
                .unwrap_or(0.0)
        })
    }
}

/// Permission -> position -> geocode -> weather, one call after another
pub async fn load_uv_report(
    location: &dyn LocationProvider,
    weather: &dyn WeatherSource,
) -> Result<UvReport> {
    let (coordinates, label) = locate(location).await?;
    info!("Loading weather for {} ({})", label, coordinates);

    let snapshot = weather.fetch(coordinates).await.map_err(|e| {
        warn!("Error fetching location or weather data: {}", e);
        e
    })?;

    Ok(UvReport {
        label,
        coordinates,
        snapshot,
    })
}
