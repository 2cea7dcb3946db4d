use thiserror::Error;

/// Main error type for SunSafe
#[derive(Error, Debug)]
pub enum SunSafeError {
    /// Weather provider errors
    #[error("Weather error: {0}")]
    Weather(#[from] WeatherError),

    /// Location lookup errors
    #[error("Location error: {0}")]
    Location(#[from] LocationError),

    /// Notification errors
    #[error("Notification error: {0}")]
    Notification(#[from] NotificationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Weather client errors
#[derive(Error, Debug)]
pub enum WeatherError {
    /// Transport failure or non-success HTTP status
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body did not match the expected payload
    #[error("Failed to decode weather response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Location lookup errors
#[derive(Error, Debug)]
pub enum LocationError {
    #[error("Permission to access location was denied.")]
    PermissionDenied,

    /// Could not obtain a position fix
    #[error("Could not determine position: {0}")]
    Position(String),

    /// Could not turn coordinates into a place name
    #[error("Reverse geocoding failed: {0}")]
    Geocode(String),
}

/// Notification scheduling errors
#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("Permission for notifications is required!")]
    PermissionDenied,

    /// The delivery side has gone away
    #[error("Notification channel closed")]
    ChannelClosed,
}

/// Configuration errors, carried inside `anyhow` by the config loader
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Parse errors
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// Validation errors
    #[error("Configuration validation failed: {0}")]
    Validation(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, SunSafeError>;

impl SunSafeError {
    /// Whether this error came from a refused permission
    pub fn is_permission_denied(&self) -> bool {
        matches!(
            self,
            SunSafeError::Location(LocationError::PermissionDenied)
                | SunSafeError::Notification(NotificationError::PermissionDenied)
        )
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            SunSafeError::Location(err @ LocationError::PermissionDenied) => err.to_string(),
            SunSafeError::Notification(err @ NotificationError::PermissionDenied) => {
                err.to_string()
            }
            SunSafeError::Weather(WeatherError::Network(_)) => {
                "Could not reach the weather service. Check your connection and API key."
                    .to_string()
            }
            SunSafeError::Weather(WeatherError::Decode(_)) => {
                "The weather service sent an unexpected response.".to_string()
            }
            _ => self.to_string(),
        }
    }
}
