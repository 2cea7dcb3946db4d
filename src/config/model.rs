use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub gauge: GaugeConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LogConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Event loop tick in milliseconds (drives the gauge animation)
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// How long toast notifications stay on screen
    #[serde(default = "default_toast_seconds")]
    pub toast_seconds: i64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            toast_seconds: default_toast_seconds(),
        }
    }
}

/// Weather provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    #[serde(default = "default_weather_url")]
    pub base_url: String,
    /// Provider API key; `SUNSAFE_API_KEY` overrides it
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    #[serde(default = "default_units")]
    pub units: String,
    #[serde(default = "default_exclude")]
    pub exclude: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_url(),
            api_key: None,
            units: default_units(),
            exclude: default_exclude(),
            timeout_seconds: default_timeout(),
        }
    }
}

/// Where position fixes come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LocationSource {
    /// Coordinates from this file or the command line
    Fixed,
    /// One lookup against an IP geolocation service
    #[default]
    Ip,
}

/// Location lookup settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Permission to use the location at all
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub source: LocationSource,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Fixed place name; skips reverse geocoding when both are set
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default = "default_ip_lookup_url")]
    pub ip_lookup_url: String,
    #[serde(default = "default_geocode_url")]
    pub geocode_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            source: LocationSource::default(),
            latitude: None,
            longitude: None,
            city: None,
            region: None,
            ip_lookup_url: default_ip_lookup_url(),
            geocode_url: default_geocode_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

/// Local notification settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Permission to show notifications
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Ring the terminal bell when a notification fires
    #[serde(default)]
    pub bell: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bell: false,
        }
    }
}

/// UV gauge settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaugeConfig {
    #[serde(default = "default_max_uv_index")]
    pub max_uv_index: f64,
    #[serde(default = "default_animation_ms")]
    pub animation_ms: u64,
    /// Pin the gauge to this value instead of the fetched UV index
    #[serde(default)]
    pub fixed_uv_index: Option<f64>,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            max_uv_index: default_max_uv_index(),
            animation_ms: default_animation_ms(),
            fixed_uv_index: None,
        }
    }
}

/// UI customization settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Minimum time the startup splash stays up
    #[serde(default = "default_splash_ms")]
    pub splash_ms: u64,
    #[serde(default = "default_true")]
    pub show_header: bool,
    #[serde(default = "default_true")]
    pub show_footer: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            splash_ms: default_splash_ms(),
            show_header: true,
            show_footer: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

// Default value functions
fn default_tick_rate() -> u64 {
    50
}

fn default_toast_seconds() -> i64 {
    5
}

fn default_weather_url() -> String {
    "https://api.openweathermap.org/data/3.0/onecall".to_string()
}

fn default_units() -> String {
    "metric".to_string()
}

fn default_exclude() -> String {
    "minutely,hourly".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_ip_lookup_url() -> String {
    "http://ip-api.com/json".to_string()
}

fn default_geocode_url() -> String {
    "https://nominatim.openstreetmap.org/reverse".to_string()
}

fn default_max_uv_index() -> f64 {
    10.0
}

fn default_animation_ms() -> u64 {
    1000
}

fn default_splash_ms() -> u64 {
    800
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}
