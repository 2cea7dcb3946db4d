use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use tracing::{debug, info};

use crate::core::{ConfigError, Coordinates};

pub mod model;

pub use model::*;

/// Environment variable holding the weather API key
pub const API_KEY_ENV: &str = "SUNSAFE_API_KEY";

impl Config {
    /// Load configuration from a specific file path.
    ///
    /// Not validated here: env and command-line overrides come first.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        debug!("Configuration loaded successfully");

        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load_default() -> Result<Self> {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                return Self::load(&config_path);
            }
        }

        // Try current directory
        let local_config = PathBuf::from("config.toml");
        if local_config.exists() {
            return Self::load(&local_config);
        }

        info!("No configuration file found, using defaults");
        Ok(Config::default())
    }

    /// Path of the per-user configuration file
    pub fn default_path() -> Option<PathBuf> {
        use directories::ProjectDirs;

        ProjectDirs::from("com", "sunsafe", "sunsafe")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Save configuration to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        info!("Saving configuration to: {}", path.display());

        let contents = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        info!("Configuration saved successfully");
        Ok(())
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            debug!("Using weather API key from {}", API_KEY_ENV);
            self.weather.api_key = Some(key);
        }
        self
    }

    /// Configured fixed coordinates, when both halves are present
    pub fn fixed_coordinates(&self) -> Option<Coordinates> {
        match (self.location.latitude, self.location.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| -> Result<()> { Err(ConfigError::Validation(msg).into()) };

        if self.general.tick_rate_ms == 0 {
            return invalid("tick_rate_ms must be greater than 0".to_string());
        }

        let max = self.gauge.max_uv_index;
        if !max.is_finite() || max <= 0.0 {
            return invalid("max_uv_index must be a finite number greater than 0".to_string());
        }

        if let Some(fixed) = self.gauge.fixed_uv_index {
            if !(0.0..=max).contains(&fixed) {
                return invalid(format!("fixed_uv_index must be between 0 and {}", max));
            }
        }

        if self.weather.timeout_seconds == 0 || self.location.timeout_seconds == 0 {
            return invalid("timeout_seconds must be greater than 0".to_string());
        }

        if let Some(coords) = self.fixed_coordinates() {
            if !coords.is_valid() {
                return invalid(format!("latitude/longitude out of range: {}", coords));
            }
        }

        if self.location.source == LocationSource::Fixed && self.fixed_coordinates().is_none() {
            return invalid(
                "location source \"fixed\" needs both latitude and longitude".to_string(),
            );
        }

        Ok(())
    }

    /// Key/value rows describing the effective configuration
    pub fn summary(&self, source: Option<&Path>) -> Vec<(String, String)> {
        let location = match (self.location.enabled, self.location.source) {
            (false, _) => "disabled".to_string(),
            (true, LocationSource::Ip) => "IP geolocation".to_string(),
            (true, LocationSource::Fixed) => match self.fixed_coordinates() {
                Some(coords) => format!("fixed ({})", coords),
                None => "fixed".to_string(),
            },
        };
        let on_off = |flag: bool| if flag { "enabled" } else { "disabled" }.to_string();

        vec![
            ("Units".to_string(), self.weather.units.clone()),
            ("Weather API".to_string(), self.weather.base_url.clone()),
            (
                "API key".to_string(),
                if self.weather.api_key.is_some() { "set" } else { "missing" }.to_string(),
            ),
            ("Location".to_string(), location),
            ("Notifications".to_string(), on_off(self.notifications.enabled)),
            ("Terminal bell".to_string(), on_off(self.notifications.bell)),
            (
                "Max UV index".to_string(),
                format!("{}", self.gauge.max_uv_index),
            ),
            (
                "Config file".to_string(),
                source
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(defaults)".to_string()),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.location.source, LocationSource::Ip);
    }

    #[test]
    fn test_config_validation() {
        let invalid_config = Config {
            gauge: GaugeConfig {
                max_uv_index: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(invalid_config.validate().is_err());

        let out_of_range = Config {
            location: LocationConfig {
                latitude: Some(120.0),
                longitude: Some(0.0),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(out_of_range.validate().is_err());
    }

    #[test]
    fn test_gauge_scale_validation() {
        let infinite = Config {
            gauge: GaugeConfig {
                max_uv_index: f64::INFINITY,
                ..Default::default()
            },
            ..Default::default()
        };
        let err = infinite.validate().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Validation(_))
        ));

        let pinned_above_max = Config {
            gauge: GaugeConfig {
                max_uv_index: 10.0,
                fixed_uv_index: Some(12.0),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(pinned_above_max.validate().is_err());

        let pinned_at_max = Config {
            gauge: GaugeConfig {
                max_uv_index: 10.0,
                fixed_uv_index: Some(10.0),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(pinned_at_max.validate().is_ok());
    }

    #[test]
    fn test_load_defers_validation_to_overrides() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[location]\nsource = \"fixed\"").unwrap();

        let mut config = Config::load(temp_file.path()).unwrap();
        assert_eq!(config.location.source, LocationSource::Fixed);
        assert!(config.validate().is_err());

        config.location.latitude = Some(43.7);
        config.location.longitude = Some(-79.42);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_error_is_config_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[gauge\nmax_uv_index = ").unwrap();

        let err = Config::load(temp_file.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_fixed_source_requires_coordinates() {
        let config = Config {
            location: LocationConfig {
                source: LocationSource::Fixed,
                latitude: Some(43.7),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_override() {
        let config = Config::default().with_overrides_from(|key| {
            (key == API_KEY_ENV).then(|| "abc123".to_string())
        });
        assert_eq!(config.weather.api_key.as_deref(), Some("abc123"));

        let config = Config::default().with_overrides_from(|_| Some("  ".to_string()));
        assert!(config.weather.api_key.is_none());
    }

    #[test]
    fn test_summary_rows() {
        let mut config = Config::default();
        config.location.source = LocationSource::Fixed;
        config.location.latitude = Some(43.7);
        config.location.longitude = Some(-79.42);

        let rows = config.summary(None);
        let get = |key: &str| {
            rows.iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_eq!(get("Units"), "metric");
        assert_eq!(get("API key"), "missing");
        assert_eq!(get("Location"), "fixed (43.7000, -79.4200)");
        assert_eq!(get("Config file"), "(defaults)");
    }

    #[test]
    fn test_config_save_and_load() {
        let mut config = Config::default();
        config.gauge.fixed_uv_index = Some(7.0);
        let temp_file = NamedTempFile::new().unwrap();

        config.save(temp_file.path()).unwrap();

        let loaded = Config::load(temp_file.path()).unwrap();
        assert_eq!(loaded.gauge.fixed_uv_index, Some(7.0));
        assert_eq!(loaded.weather.base_url, config.weather.base_url);
    }
}
