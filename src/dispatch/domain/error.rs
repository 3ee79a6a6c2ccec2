//! Error types for interaction dispatch and engine assembly.

use std::error::Error;
use std::sync::Arc;

use thiserror::Error;

use crate::argument::domain::{ArgumentError, ArgumentType};
use crate::cog::CogError;
use crate::command::CommandTreeError;
use crate::interaction::InteractionType;
use crate::listener::ListenerError;

/// Shared, clonable error raised by user-supplied code.
pub type SharedError = Arc<dyn Error + Send + Sync>;

/// Failure of one dispatched interaction.
///
/// The error is handed to every error handler along the resolved command's
/// ancestry, so it is cheap to clone.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    /// The interaction carried no command or component data.
    #[error("interaction carries no command data")]
    MissingData,

    /// No invocable command matches the request path.
    #[error("command '{name}' was not found")]
    CommandNotFound {
        /// Path named by the request.
        name: String,
    },

    /// No live component listener is registered for the key.
    #[error("no component listener is waiting for '{key}'")]
    ComponentListenerNotFound {
        /// Component custom ID.
        key: String,
    },

    /// The resolved command declares no autocomplete handler.
    #[error("command '{name}' has no autocomplete handler")]
    AutocompleteNotFound {
        /// Qualified command name.
        name: String,
    },

    /// The interaction type has no dispatch route.
    #[error("interaction type {0:?} is not handled")]
    UnsupportedInteraction(InteractionType),

    /// A check refused the invocation or failed while deciding.
    #[error("command checks did not pass")]
    CheckFailure {
        /// Error raised by the failing check, if any.
        #[source]
        source: Option<SharedError>,
    },

    /// A declared parameter could not be converted.
    #[error(transparent)]
    Conversion(#[from] ArgumentError),

    /// The handler returned an error.
    #[error("handler failed: {0}")]
    Handler(#[source] SharedError),

    /// The handler panicked; the panic was contained.
    #[error("handler panicked: {message}")]
    HandlerPanicked {
        /// Panic payload rendered as text.
        message: String,
    },

    /// A before or after interaction hook failed.
    #[error("interaction hook failed: {0}")]
    Hook(#[source] SharedError),

    /// The component listener registry could not be used.
    #[error(transparent)]
    Listener(ListenerError),
}

impl DispatchError {
    /// Returns whether the error is a routing failure.
    #[must_use]
    pub const fn is_routing(&self) -> bool {
        matches!(
            self,
            Self::CommandNotFound { .. }
                | Self::ComponentListenerNotFound { .. }
                | Self::AutocompleteNotFound { .. }
                | Self::UnsupportedInteraction(_)
                | Self::MissingData
        )
    }
}

/// Failure assembling an [`crate::dispatch::Engine`].
#[derive(Debug, Error)]
pub enum EngineBuildError {
    /// A declared parameter type has no registered converter.
    #[error("command '{command}' parameter '{parameter}' needs a converter for {argument_type}")]
    ConverterNotFound {
        /// Qualified command name.
        command: String,
        /// Parameter name.
        parameter: String,
        /// The unsupported type tag.
        argument_type: ArgumentType,
    },

    /// A cog could not be registered.
    #[error(transparent)]
    Cog(#[from] CogError),

    /// A command could not be added to the tree.
    #[error(transparent)]
    Command(#[from] CommandTreeError),
}
