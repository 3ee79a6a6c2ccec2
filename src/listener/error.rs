//! Errors raised by the component listener registry.

use thiserror::Error;

use crate::dispatch::SharedError;

/// Failure registering, cancelling, or delivering to a listener.
#[derive(Debug, Clone, Error)]
pub enum ListenerError {
    /// No live listener occupies the key.
    #[error("no component listener is registered for '{key}'")]
    NotFound {
        /// Component custom ID.
        key: String,
    },

    /// The waiting consumer dropped its handle before delivery.
    #[error("component listener consumer for '{key}' is no longer waiting")]
    ConsumerGone {
        /// Component custom ID.
        key: String,
    },

    /// The registry lock was poisoned by a panicking writer.
    #[error("component listener registry unavailable: {0}")]
    Poisoned(String),

    /// The listener's handler returned an error.
    #[error("component handler failed: {0}")]
    Handler(#[source] SharedError),
}

/// Result type for listener registry operations.
pub type ListenerResult<T> = Result<T, ListenerError>;
