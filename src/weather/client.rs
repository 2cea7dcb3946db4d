use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info, warn};

use crate::config::WeatherConfig;
use crate::core::{Coordinates, WeatherError};
use crate::weather::WeatherSnapshot;

/// Anything that can produce a weather snapshot for a position
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn fetch(&self, coords: Coordinates) -> Result<WeatherSnapshot, WeatherError>;
}

/// One-call weather API client
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
    units: String,
    exclude: String,
}

impl WeatherClient {
    /// Create a client from the weather settings
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        info!("Creating weather client for {}", config.base_url);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("sunsafe/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let api_key = config.api_key.clone().unwrap_or_default();
        if api_key.is_empty() {
            warn!("No weather API key configured; requests will be rejected by the provider");
        }

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key,
            units: config.units.clone(),
            exclude: config.exclude.clone(),
        })
    }

    /// Fetch current conditions and the daily forecast.
    ///
    /// Exactly one GET is issued; failures are logged and handed back unchanged.
    pub async fn fetch_weather_data(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherSnapshot, WeatherError> {
        debug!("Fetching weather for {}, {}", latitude, longitude);

        let result = self.request(latitude, longitude).await;
        match &result {
            Ok(snapshot) => debug!(
                "Weather received: {} daily entries, current {}°",
                snapshot.daily.len(),
                snapshot.current.temp
            ),
            Err(e) => error!("Error fetching weather: {}", e),
        }
        result
    }

    async fn request(&self, latitude: f64, longitude: f64) -> Result<WeatherSnapshot, WeatherError> {
        let params = [
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("appid", self.api_key.clone()),
            ("units", self.units.clone()),
            ("exclude", self.exclude.clone()),
        ];

        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl WeatherSource for WeatherClient {
    async fn fetch(&self, coords: Coordinates) -> Result<WeatherSnapshot, WeatherError> {
        self.fetch_weather_data(coords.latitude, coords.longitude)
            .await
    }
}
