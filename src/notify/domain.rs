//! Notification payloads and errors.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Severity of a notification, which selects its accent colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    /// Routine lifecycle event.
    Info,
    /// Degraded but still serving.
    Warning,
    /// Serving has stopped or is failing.
    Danger,
}

impl NotificationLevel {
    /// Returns the RGB accent colour used when the notice is rendered.
    #[must_use]
    pub const fn colour(self) -> u32 {
        match self {
            Self::Info => 0x00FE_D883,
            Self::Warning => 0x00FF_C007,
            Self::Danger => 0x00DC_3545,
        }
    }
}

/// A short notice for operators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Headline.
    pub title: String,
    /// Body text.
    pub description: String,
    /// Trailing line, usually the emitting host.
    pub footer: Option<String>,
    /// Severity.
    pub level: NotificationLevel,
    /// When the event happened.
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    /// Creates a notice without a footer.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        level: NotificationLevel,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            footer: None,
            level,
            timestamp,
        }
    }

    /// Sets the footer line.
    #[must_use]
    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }
}

/// Errors raised by notification sinks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotifyError {
    /// The sink's internal state lock was poisoned.
    #[error("notification sink lock poisoned: {0}")]
    Poisoned(String),

    /// The downstream service refused or failed the delivery.
    #[error("notification delivery failed: {0}")]
    Delivery(String),
}
