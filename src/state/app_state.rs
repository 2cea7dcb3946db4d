//! Application state management

use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{debug, info};

use crate::core::{Alert, NotificationLevel, ScreenState, SunSafeError, Tab, VisitId};
use crate::gauge::UvGauge;
use crate::quiz::QuizState;
use crate::report::UvReport;
use crate::skin::SkinSelection;
use crate::weather::ConditionAsset;

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    // Navigation
    pub current_tab: Tab,
    pub previous_tab: Option<Tab>,

    // Per-tab state
    pub home: HomeState,
    pub uv: UvState,
    pub quiz: QuizState,
    pub skin: SkinSelection,
    pub settings: Vec<(String, String)>,

    // UI state
    pub terminal_size: (u16, u16),
    pub show_header: bool,
    pub show_footer: bool,
    pub show_help: bool,
    pub notifications: Vec<Notification>,
    pub alert: Option<Alert>,
}

/// Home tab state
#[derive(Debug, Clone, Default)]
pub struct HomeState {
    /// `None` until permission has been requested
    pub notifications_permitted: Option<bool>,
    /// Set once the request has been queued, answered or not
    pub permission_requested: bool,
    pub reminders_sent: usize,
}

/// UV Index tab state
#[derive(Debug, Clone)]
pub struct UvState {
    /// Increases on every visit; results for older visits are dropped
    pub visit: VisitId,
    pub screen: ScreenState<UvReport>,
    pub gauge: Option<UvGauge>,
    pub max_uv_index: f64,
    pub pinned_uv_index: Option<f64>,
    pub animation: Duration,
}

impl Default for UvState {
    fn default() -> Self {
        Self {
            visit: 0,
            screen: ScreenState::Loading,
            gauge: None,
            max_uv_index: 10.0,
            pinned_uv_index: None,
            animation: Duration::from_secs(1),
        }
    }
}

/// Toast message
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: uuid::Uuid,
    pub message: String,
    pub level: NotificationLevel,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    /// Create new app state
    pub fn new() -> Self {
        Self {
            current_tab: Tab::Home,
            previous_tab: None,
            home: HomeState::default(),
            uv: UvState::default(),
            quiz: QuizState::new(),
            skin: SkinSelection::default(),
            settings: vec![],
            terminal_size: (80, 24),
            show_header: true,
            show_footer: true,
            show_help: false,
            notifications: vec![],
            alert: None,
        }
    }

    /// Add a notification
    pub fn add_notification(&mut self, message: impl Into<String>, level: NotificationLevel) {
        let notification = Notification {
            id: uuid::Uuid::new_v4(),
            message: message.into(),
            level,
            timestamp: Utc::now(),
        };
        self.notifications.push(notification);

        // Keep only last 10 notifications
        if self.notifications.len() > 10 {
            self.notifications.remove(0);
        }
    }

    /// Clear old notifications (older than threshold)
    pub fn clear_old_notifications(&mut self, max_age_seconds: i64) {
        let cutoff = Utc::now() - chrono::Duration::seconds(max_age_seconds);
        self.notifications.retain(|n| n.timestamp > cutoff);
    }

    /// Show a blocking alert
    pub fn show_alert(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.alert = Some(Alert::new(title, message));
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Record the outcome of the notification permission request
    pub fn set_notification_permission(&mut self, granted: bool) {
        self.home.notifications_permitted = Some(granted);
    }

    /// Start a new UV tab visit and return its id
    pub fn begin_uv_visit(&mut self) -> VisitId {
        self.uv.visit += 1;
        self.uv.screen = ScreenState::Loading;
        debug!("Starting UV visit {}", self.uv.visit);
        self.uv.visit
    }

    /// Apply a finished location/weather lookup.
    ///
    /// Returns `false` when the result belongs to a superseded visit.
    pub fn apply_uv_result(
        &mut self,
        visit: VisitId,
        result: Result<UvReport, SunSafeError>,
        now: Instant,
    ) -> bool {
        if visit != self.uv.visit {
            info!(
                "Dropping UV result for visit {} (current {})",
                visit, self.uv.visit
            );
            return false;
        }

        self.uv.screen = match result {
            Ok(report) => {
                let asset = ConditionAsset::for_description(report.snapshot.current_condition());
                debug!("Conditions for {}: {}", report.label, asset.file_name());
                let index = report.gauge_index(self.uv.pinned_uv_index);
                match self.uv.gauge.as_mut() {
                    Some(gauge) => gauge.set_uv_index(index, now),
                    None => {
                        self.uv.gauge = Some(UvGauge::new(
                            index,
                            self.uv.max_uv_index,
                            self.uv.animation,
                            now,
                        ))
                    }
                }
                ScreenState::Ready(report)
            }
            Err(e) if e.is_permission_denied() => ScreenState::PermissionDenied(e.user_message()),
            Err(e) => ScreenState::Failed(e.user_message()),
        };
        true
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
