//! Logging and in-memory notification sinks.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::domain::{Notification, NotificationLevel, NotifyError};
use super::ports::{NotificationSink, NotifyResult};

/// Writes each notification to the log at a level matching its severity.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotificationSink;

#[async_trait]
impl NotificationSink for TracingNotificationSink {
    async fn publish(&self, notification: &Notification) -> NotifyResult<()> {
        let footer = notification.footer.as_deref().unwrap_or_default();
        match notification.level {
            NotificationLevel::Info => tracing::info!(
                title = %notification.title,
                footer,
                "{}",
                notification.description
            ),
            NotificationLevel::Warning => tracing::warn!(
                title = %notification.title,
                footer,
                "{}",
                notification.description
            ),
            NotificationLevel::Danger => tracing::error!(
                title = %notification.title,
                footer,
                "{}",
                notification.description
            ),
        }
        Ok(())
    }
}

/// Keeps every published notification in memory.
///
/// Thread-safe via internal [`RwLock`]. Intended for tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryNotificationSink {
    published: Arc<RwLock<Vec<Notification>>>,
}

impl InMemoryNotificationSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the notifications published so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Poisoned`] if the internal lock is poisoned.
    pub fn published(&self) -> NotifyResult<Vec<Notification>> {
        self.published
            .read()
            .map(|guard| guard.clone())
            .map_err(|err| NotifyError::Poisoned(err.to_string()))
    }
}

#[async_trait]
impl NotificationSink for InMemoryNotificationSink {
    async fn publish(&self, notification: &Notification) -> NotifyResult<()> {
        self.published
            .write()
            .map_err(|err| NotifyError::Poisoned(err.to_string()))?
            .push(notification.clone());
        Ok(())
    }
}
