use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::{LocationConfig, LocationSource};
use crate::core::{Coordinates, LocationError, LocationLabel};
use crate::location::Geocoder;

/// Outcome of a location permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// Host location services: permission, one-shot fix, reverse geocode
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn request_permission(&self) -> PermissionStatus;

    async fn current_position(&self) -> Result<Coordinates, LocationError>;

    async fn reverse_geocode(&self, coords: Coordinates) -> Result<LocationLabel, LocationError>;
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

/// Position fix from the caller's public IP address
#[derive(Debug, Clone)]
pub struct IpLocator {
    client: Client,
    url: String,
}

impl IpLocator {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, LocationError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LocationError::Position(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub async fn locate(&self) -> Result<Coordinates, LocationError> {
        debug!("Looking up position from {}", self.url);

        let body: IpApiResponse = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| LocationError::Position(e.to_string()))?
            .json()
            .await
            .map_err(|e| LocationError::Position(e.to_string()))?;

        if body.status != "success" {
            let reason = body.message.unwrap_or_else(|| body.status.clone());
            return Err(LocationError::Position(reason));
        }

        match (body.lat, body.lon) {
            (Some(lat), Some(lon)) => Ok(Coordinates::new(lat, lon)),
            _ => Err(LocationError::Position(
                "response had no coordinates".to_string(),
            )),
        }
    }
}

/// Where `SystemLocation` gets its fix from
#[derive(Debug, Clone)]
pub enum PositionSource {
    Fixed(Coordinates),
    Ip(IpLocator),
}

/// Location provider backed by configuration and network lookups
#[derive(Debug, Clone)]
pub struct SystemLocation {
    enabled: bool,
    source: PositionSource,
    label: Option<LocationLabel>,
    geocoder: Geocoder,
}

impl SystemLocation {
    pub fn new(
        enabled: bool,
        source: PositionSource,
        label: Option<LocationLabel>,
        geocoder: Geocoder,
    ) -> Self {
        Self {
            enabled,
            source,
            label,
            geocoder,
        }
    }

    /// Build from the `[location]` settings
    pub fn from_config(config: &LocationConfig) -> Result<Self, LocationError> {
        let timeout = Duration::from_secs(config.timeout_seconds);

        let source = match (config.source, config.latitude, config.longitude) {
            (LocationSource::Fixed, Some(lat), Some(lon)) => {
                PositionSource::Fixed(Coordinates::new(lat, lon))
            }
            (LocationSource::Fixed, _, _) => {
                return Err(LocationError::Position(
                    "fixed location needs latitude and longitude".to_string(),
                ))
            }
            (LocationSource::Ip, _, _) => {
                PositionSource::Ip(IpLocator::new(config.ip_lookup_url.clone(), timeout)?)
            }
        };

        let label = match (&config.city, &config.region) {
            (Some(city), Some(region)) => Some(LocationLabel::new(city.clone(), region.clone())),
            _ => None,
        };

        info!(
            "Location provider: {:?} source, enabled={}",
            config.source, config.enabled
        );

        Ok(Self::new(
            config.enabled,
            source,
            label,
            Geocoder::new(config.geocode_url.clone(), timeout)?,
        ))
    }
}

#[async_trait]
impl LocationProvider for SystemLocation {
    async fn request_permission(&self) -> PermissionStatus {
        if self.enabled {
            PermissionStatus::Granted
        } else {
            warn!("Location access is disabled in configuration");
            PermissionStatus::Denied
        }
    }

    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        match &self.source {
            PositionSource::Fixed(coords) => Ok(*coords),
            PositionSource::Ip(locator) => locator.locate().await,
        }
    }

    async fn reverse_geocode(&self, coords: Coordinates) -> Result<LocationLabel, LocationError> {
        if let Some(label) = &self.label {
            return Ok(label.clone());
        }
        self.geocoder.reverse(coords).await
    }
}
