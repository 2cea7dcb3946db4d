//! Core type definitions and shared types

/// Identifier for one visit of a screen that loads data
pub type VisitId = u64;

/// Type alias for notification IDs
pub type NotificationId = uuid::Uuid;

use uuid::Uuid;

/// Generate a new unique notification ID
pub fn new_notification_id() -> NotificationId {
    Uuid::new_v4()
}

/// Notification level for status messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
}

impl std::fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationLevel::Info => write!(f, "INFO"),
            NotificationLevel::Success => write!(f, "SUCCESS"),
            NotificationLevel::Warning => write!(f, "WARNING"),
        }
    }
}

/// Application tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Home,
    UvIndex,
    Quiz,
    MySkin,
    Settings,
}

impl Tab {
    /// Get all available tabs
    pub fn all() -> &'static [Tab] {
        &[
            Tab::Home,
            Tab::UvIndex,
            Tab::Quiz,
            Tab::MySkin,
            Tab::Settings,
        ]
    }

    /// Get the display name for this tab
    pub fn name(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::UvIndex => "UV Index",
            Tab::Quiz => "Sunscreen Quiz",
            Tab::MySkin => "My Skin",
            Tab::Settings => "Settings",
        }
    }

    /// Get the shortcut key for this tab (1-5)
    pub fn shortcut(&self) -> char {
        match self {
            Tab::Home => '1',
            Tab::UvIndex => '2',
            Tab::Quiz => '3',
            Tab::MySkin => '4',
            Tab::Settings => '5',
        }
    }

    /// Look up a tab by its shortcut key
    pub fn from_shortcut(c: char) -> Option<Tab> {
        Tab::all().iter().copied().find(|t| t.shortcut() == c)
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Lifecycle of a screen that loads data asynchronously
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenState<T> {
    Loading,
    PermissionDenied(String),
    Ready(T),
    Failed(String),
}

impl<T> ScreenState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ScreenState::Loading)
    }

    /// The loaded data, if any
    pub fn ready(&self) -> Option<&T> {
        match self {
            ScreenState::Ready(data) => Some(data),
            _ => None,
        }
    }
}

impl<T> Default for ScreenState<T> {
    fn default() -> Self {
        ScreenState::Loading
    }
}

/// Blocking alert content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}
