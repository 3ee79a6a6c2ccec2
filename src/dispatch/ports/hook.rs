//! Engine-wide interaction hooks.

use async_trait::async_trait;

use super::HandlerResult;
use crate::dispatch::domain::{DispatchOutcome, RequestContext};

/// Runs around every routed command invocation.
///
/// Both methods default to doing nothing. A failing hook is reported as
/// [`crate::dispatch::DispatchError::Hook`] and propagated from the root
/// error handler.
#[async_trait]
pub trait InteractionHooks: Send + Sync {
    /// Runs after routing, before checks and the handler.
    ///
    /// # Errors
    ///
    /// An error aborts the invocation.
    async fn before(&self, ctx: &RequestContext) -> HandlerResult<()> {
        let _ = ctx;
        Ok(())
    }

    /// Observes the outcome of the invocation.
    ///
    /// # Errors
    ///
    /// An error replaces the outcome with a hook failure.
    async fn after(&self, ctx: &RequestContext, outcome: &DispatchOutcome) -> HandlerResult<()> {
        let _ = (ctx, outcome);
        Ok(())
    }
}
