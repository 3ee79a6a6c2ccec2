//! Port for publishing notifications.

use async_trait::async_trait;

use super::domain::{Notification, NotifyError};

/// Result type for sink operations.
pub type NotifyResult<T> = Result<T, NotifyError>;

/// Destination for operator notifications.
///
/// Delivery is best effort: callers log a failure and carry on.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Publishes a notification.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError`] when the notice could not be delivered.
    async fn publish(&self, notification: &Notification) -> NotifyResult<()>;
}
