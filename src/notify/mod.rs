//! Local reminder notifications
//!
//! Notifications are scheduled on a background task and handed to a
//! [`Notifier`] once their delay has elapsed. The TUI uses a
//! [`ChannelNotifier`] so delivered reminders come back into the event loop.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::core::{new_notification_id, NotificationError, NotificationId};

pub const TEST_NOTIFICATION_TITLE: &str = "Sunscreen Reminder";
pub const TEST_NOTIFICATION_BODY: &str = "The UV index is high. Don't forget to apply sunscreen!";
pub const TEST_NOTIFICATION_DELAY: Duration = Duration::from_secs(1);

/// A notification ready to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalNotification {
    pub id: NotificationId,
    pub title: String,
    pub body: String,
    pub scheduled_at: DateTime<Utc>,
}

/// Handle for a scheduled notification
#[derive(Debug)]
pub struct ScheduledNotification {
    pub id: NotificationId,
    pub delay: Duration,
    handle: JoinHandle<()>,
}

impl ScheduledNotification {
    /// Drop the notification if it has not fired yet
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Delivery side of the notification service
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, notification: LocalNotification) -> Result<(), NotificationError>;

    /// Whether deliveries can no longer succeed
    fn is_closed(&self) -> bool {
        false
    }
}

/// Delivers notifications over an mpsc channel
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<LocalNotification>,
}

impl ChannelNotifier {
    pub fn new(tx: mpsc::UnboundedSender<LocalNotification>) -> Self {
        Self { tx }
    }

    /// Create a notifier together with its receiving end
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<LocalNotification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

#[async_trait]
impl Notifier for ChannelNotifier {
    async fn deliver(&self, notification: LocalNotification) -> Result<(), NotificationError> {
        self.tx
            .send(notification)
            .map_err(|_| NotificationError::ChannelClosed)
    }

    fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Permission handling and scheduling of local notifications
#[derive(Clone)]
pub struct NotificationService {
    allowed: bool,
    notifier: Arc<dyn Notifier>,
}

impl NotificationService {
    pub fn new(allowed: bool, notifier: Arc<dyn Notifier>) -> Self {
        Self { allowed, notifier }
    }

    /// Ask for permission to show notifications
    pub fn request_permissions(&self) -> bool {
        if self.allowed {
            debug!("Notification permission granted");
        } else {
            warn!("Notification permission denied by configuration");
        }
        self.allowed
    }

    /// Schedule one notification to fire after `delay`
    pub fn schedule(
        &self,
        title: impl Into<String>,
        body: impl Into<String>,
        delay: Duration,
    ) -> Result<ScheduledNotification, NotificationError> {
        if !self.allowed {
            return Err(NotificationError::PermissionDenied);
        }
        if self.notifier.is_closed() {
            return Err(NotificationError::ChannelClosed);
        }

        let notification = LocalNotification {
            id: new_notification_id(),
            title: title.into(),
            body: body.into(),
            scheduled_at: Utc::now(),
        };
        let id = notification.id;

        // Deadline is fixed now, not when the task first runs
        let deadline = tokio::time::Instant::now() + delay;
        let notifier = Arc::clone(&self.notifier);

        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let id = notification.id;
            match notifier.deliver(notification).await {
                Ok(()) => debug!("Delivered notification {}", id),
                Err(e) => warn!("Could not deliver notification {}: {}", id, e),
            }
        });

        Ok(ScheduledNotification { id, delay, handle })
    }

    /// Schedule the fixed sunscreen reminder one second from now
    pub fn schedule_test_notification(&self) -> Result<ScheduledNotification, NotificationError> {
        info!("Scheduling test notification...");

        let result = self.schedule(
            TEST_NOTIFICATION_TITLE,
            TEST_NOTIFICATION_BODY,
            TEST_NOTIFICATION_DELAY,
        );
        if let Err(e) = &result {
            error!("Error scheduling test notification: {}", e);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_notification_fires_once_after_one_second() {
        let (notifier, mut rx) = ChannelNotifier::channel();
        let service = NotificationService::new(true, Arc::new(notifier));

        let start = Instant::now();
        let scheduled = tokio_test::assert_ok!(service.schedule_test_notification());

        let delivered = rx.recv().await.unwrap();
        let elapsed = start.elapsed();

        assert!(elapsed >= Duration::from_secs(1));
        assert!(elapsed < Duration::from_millis(1010));
        assert_eq!(delivered.id, scheduled.id);
        assert_eq!(delivered.title, "Sunscreen Reminder");
        assert_eq!(
            delivered.body,
            "The UV index is high. Don't forget to apply sunscreen!"
        );

        let second = tokio::time::timeout(Duration::from_secs(10), rx.recv()).await;
        assert!(second.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_before_delay() {
        let (notifier, mut rx) = ChannelNotifier::channel();
        let service = NotificationService::new(true, Arc::new(notifier));

        service.schedule_test_notification().unwrap();

        let early = tokio::time::timeout(Duration::from_millis(900), rx.recv()).await;
        assert!(early.is_err());
        assert!(rx.recv().await.is_some());
    }

    #[tokio::test]
    async fn test_denied_permission_fails_scheduling() {
        let (notifier, _rx) = ChannelNotifier::channel();
        let service = NotificationService::new(false, Arc::new(notifier));

        assert!(!service.request_permissions());
        let err = tokio_test::assert_err!(service.schedule_test_notification());
        assert!(matches!(err, NotificationError::PermissionDenied));
    }

    #[tokio::test]
    async fn test_closed_channel_fails_scheduling() {
        let (notifier, rx) = ChannelNotifier::channel();
        drop(rx);
        let service = NotificationService::new(true, Arc::new(notifier));

        let err = tokio_test::assert_err!(service.schedule_test_notification());
        assert!(matches!(err, NotificationError::ChannelClosed));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_notification_never_fires() {
        let (notifier, mut rx) = ChannelNotifier::channel();
        let service = NotificationService::new(true, Arc::new(notifier));

        let scheduled = service.schedule_test_notification().unwrap();
        scheduled.cancel();

        let result = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
        assert!(result.is_err());
    }
}
