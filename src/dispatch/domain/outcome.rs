//! Result of dispatching one interaction.

use super::DispatchError;
use crate::interaction::InteractionResponse;

/// What dispatch produced for one interaction.
///
/// A failed dispatch may still carry a response: the one chosen by the error
/// handler chain.
#[derive(Debug, Clone, Default)]
pub struct DispatchOutcome {
    response: Option<InteractionResponse>,
    error: Option<DispatchError>,
}

impl DispatchOutcome {
    /// A successful dispatch.
    #[must_use]
    pub const fn success(response: Option<InteractionResponse>) -> Self {
        Self {
            response,
            error: None,
        }
    }

    /// A failed dispatch with the response chosen by error propagation.
    #[must_use]
    pub const fn failure(error: DispatchError, response: Option<InteractionResponse>) -> Self {
        Self {
            response,
            error: Some(error),
        }
    }

    /// Returns the response to send, if any.
    #[must_use]
    pub const fn response(&self) -> Option<&InteractionResponse> {
        self.response.as_ref()
    }

    /// Returns the dispatch error, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&DispatchError> {
        self.error.as_ref()
    }

    /// Returns whether dispatch completed without error.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Splits the outcome into response and error.
    #[must_use]
    pub fn into_parts(self) -> (Option<InteractionResponse>, Option<DispatchError>) {
        (self.response, self.error)
    }

    /// Converts the outcome into a `Result`, discarding any error response.
    ///
    /// # Errors
    ///
    /// Returns the dispatch error when dispatch failed.
    pub fn into_result(self) -> Result<Option<InteractionResponse>, DispatchError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.response),
        }
    }
}
