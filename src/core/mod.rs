use serde::{Deserialize, Serialize};

pub mod errors;
pub mod types;

pub use errors::*;
pub use types::{
    new_notification_id, Alert, NotificationId, NotificationLevel, ScreenState, Tab, VisitId,
};

/// A single position fix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components are within their geographic ranges
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Human-readable place name for a position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationLabel {
    pub city: String,
    pub region: String,
}

impl LocationLabel {
    pub fn new(city: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            region: region.into(),
        }
    }
}

impl std::fmt::Display for LocationLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.city, self.region)
    }
}

/// UI Actions that need the async side of the application
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    /// Start the location and weather lookup for a UV tab visit
    LoadUvReport(VisitId),
    /// Ask for notification permission (first Home visit)
    RequestNotificationPermission,
    /// Schedule the test sunscreen reminder
    ScheduleTestNotification,
}
