//! Outbound operator notifications.
//!
//! Lifecycle events are announced through a [`NotificationSink`]. The crate
//! ships a sink that writes to the log and an in-memory sink for tests;
//! deployments supply their own adapter for chat webhooks or paging.

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::{InMemoryNotificationSink, TracingNotificationSink};
pub use domain::{Notification, NotificationLevel, NotifyError};
pub use ports::{NotificationSink, NotifyResult};

#[cfg(test)]
mod tests;
