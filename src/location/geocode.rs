//! Reverse geocoding: convert coordinates to a city and region.
//! Uses Nominatim (OpenStreetMap) - free, no API key required.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::core::{Coordinates, LocationError, LocationLabel};

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    address: Option<NominatimAddress>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    municipality: Option<String>,
    county: Option<String>,
    state: Option<String>,
    #[serde(rename = "state_district")]
    state_district: Option<String>,
    country: Option<String>,
}

impl NominatimAddress {
    fn into_label(self) -> Option<LocationLabel> {
        let city = self
            .city
            .or(self.town)
            .or(self.village)
            .or(self.municipality)
            .or(self.county)?;

        let region = self
            .state
            .or(self.state_district)
            .or(self.country)
            .unwrap_or_default();

        Some(LocationLabel { city, region })
    }
}

/// Nominatim reverse geocoder
#[derive(Debug, Clone)]
pub struct Geocoder {
    client: Client,
    url: String,
}

impl Geocoder {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, LocationError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("sunsafe/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LocationError::Geocode(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Resolve coordinates to a place name
    pub async fn reverse(&self, coords: Coordinates) -> Result<LocationLabel, LocationError> {
        let params = [
            ("lat", coords.latitude.to_string()),
            ("lon", coords.longitude.to_string()),
            ("format", "json".to_string()),
            ("addressdetails", "1".to_string()),
            ("zoom", "10".to_string()),
        ];

        let response = self
            .client
            .get(&self.url)
            .query(&params)
            .send()
            .await
            .map_err(|e| LocationError::Geocode(e.to_string()))?;

        if !response.status().is_success() {
            debug!("Reverse geocode returned status {}", response.status());
            return Err(LocationError::Geocode(format!(
                "geocoder returned {}",
                response.status()
            )));
        }

        let body: NominatimResponse = response
            .json()
            .await
            .map_err(|e| LocationError::Geocode(e.to_string()))?;

        let label = body
            .address
            .and_then(NominatimAddress::into_label)
            .ok_or_else(|| LocationError::Geocode(format!("no place found at {}", coords)))?;

        info!("Reverse geocoded to: {}", label);
        Ok(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(json: &str) -> NominatimAddress {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_prefers_city_and_state() {
        let label = address(r#"{"city": "Toronto", "state": "Ontario", "country": "Canada"}"#)
            .into_label()
            .unwrap();
        assert_eq!(label, LocationLabel::new("Toronto", "Ontario"));
    }

    #[test]
    fn test_falls_back_to_town_and_country() {
        let label = address(r#"{"town": "Hallstatt", "country": "Austria"}"#)
            .into_label()
            .unwrap();
        assert_eq!(label, LocationLabel::new("Hallstatt", "Austria"));
    }

    #[test]
    fn test_no_place_name() {
        assert!(address(r#"{"country": "Antarctica"}"#).into_label().is_none());
    }
}
