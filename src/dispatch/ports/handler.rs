//! Extension points implemented by command authors.

use std::error::Error;
use std::fmt;

use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::dispatch::domain::{DispatchError, RequestContext};
use crate::interaction::{InteractionResponse, OptionChoice};

/// Error type returned by user-supplied code.
pub type HandlerError = Box<dyn Error + Send + Sync>;

/// Result type returned by user-supplied code.
pub type HandlerResult<T> = Result<T, HandlerError>;

/// Handles an invoked command or a delivered component.
#[async_trait]
pub trait InteractionHandler: Send + Sync {
    /// Produces the response for the interaction.
    ///
    /// `Ok(None)` acknowledges the request without a response body.
    ///
    /// # Errors
    ///
    /// Any error is propagated through the command's error handlers.
    async fn handle(&self, ctx: &RequestContext) -> HandlerResult<Option<InteractionResponse>>;
}

/// Supplies choices while the user is typing an option.
#[async_trait]
pub trait AutocompleteHandler: Send + Sync {
    /// Returns the choices offered for the focused option.
    ///
    /// # Errors
    ///
    /// Any error is propagated through the command's error handlers.
    async fn complete(&self, ctx: &RequestContext) -> HandlerResult<Vec<OptionChoice>>;
}

/// Observes dispatch failures for a node and its descendants.
#[async_trait]
pub trait ErrorHandler: Send + Sync {
    /// Reacts to an error, optionally producing a user-visible response.
    ///
    /// # Errors
    ///
    /// An error from an error handler is logged and otherwise ignored.
    async fn handle_error(
        &self,
        ctx: &RequestContext,
        error: &DispatchError,
    ) -> HandlerResult<Option<InteractionResponse>>;
}

/// Decides whether a command may run.
#[async_trait]
pub trait Check: Send + Sync {
    /// Returns `true` when the command may run.
    ///
    /// # Errors
    ///
    /// An error aborts dispatch with [`DispatchError::CheckFailure`].
    async fn can_run(&self, ctx: &RequestContext) -> HandlerResult<bool>;
}

/// [`InteractionHandler`] backed by a closure returning a boxed future.
pub struct HandlerFn<F>(F);

/// Wraps a closure as an [`InteractionHandler`].
///
/// ```ignore
/// let handler = handler_fn(|ctx| Box::pin(async move {
///     Ok(Some(InteractionResponse::message("pong")))
/// }));
/// ```
pub const fn handler_fn<F>(handler: F) -> HandlerFn<F>
where
    F: for<'a> Fn(&'a RequestContext) -> BoxFuture<'a, HandlerResult<Option<InteractionResponse>>>
        + Send
        + Sync,
{
    HandlerFn(handler)
}

#[async_trait]
impl<F> InteractionHandler for HandlerFn<F>
where
    F: for<'a> Fn(&'a RequestContext) -> BoxFuture<'a, HandlerResult<Option<InteractionResponse>>>
        + Send
        + Sync,
{
    async fn handle(&self, ctx: &RequestContext) -> HandlerResult<Option<InteractionResponse>> {
        (self.0)(ctx).await
    }
}

impl<F> fmt::Debug for HandlerFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HandlerFn")
    }
}

/// [`AutocompleteHandler`] backed by a synchronous closure.
pub struct AutocompleteFn<F>(F);

/// Wraps a synchronous closure as an [`AutocompleteHandler`].
pub const fn autocomplete_fn<F>(handler: F) -> AutocompleteFn<F>
where
    F: Fn(&RequestContext) -> HandlerResult<Vec<OptionChoice>> + Send + Sync,
{
    AutocompleteFn(handler)
}

#[async_trait]
impl<F> AutocompleteHandler for AutocompleteFn<F>
where
    F: Fn(&RequestContext) -> HandlerResult<Vec<OptionChoice>> + Send + Sync,
{
    async fn complete(&self, ctx: &RequestContext) -> HandlerResult<Vec<OptionChoice>> {
        (self.0)(ctx)
    }
}

/// [`ErrorHandler`] backed by a synchronous closure.
pub struct ErrorHandlerFn<F>(F);

/// Wraps a synchronous closure as an [`ErrorHandler`].
pub const fn error_handler_fn<F>(handler: F) -> ErrorHandlerFn<F>
where
    F: Fn(&RequestContext, &DispatchError) -> HandlerResult<Option<InteractionResponse>>
        + Send
        + Sync,
{
    ErrorHandlerFn(handler)
}

#[async_trait]
impl<F> ErrorHandler for ErrorHandlerFn<F>
where
    F: Fn(&RequestContext, &DispatchError) -> HandlerResult<Option<InteractionResponse>>
        + Send
        + Sync,
{
    async fn handle_error(
        &self,
        ctx: &RequestContext,
        error: &DispatchError,
    ) -> HandlerResult<Option<InteractionResponse>> {
        (self.0)(ctx, error)
    }
}

/// [`Check`] backed by a synchronous predicate.
pub struct CheckFn<F>(F);

/// Wraps a synchronous predicate as a [`Check`].
pub const fn check_fn<F>(check: F) -> CheckFn<F>
where
    F: Fn(&RequestContext) -> HandlerResult<bool> + Send + Sync,
{
    CheckFn(check)
}

#[async_trait]
impl<F> Check for CheckFn<F>
where
    F: Fn(&RequestContext) -> HandlerResult<bool> + Send + Sync,
{
    async fn can_run(&self, ctx: &RequestContext) -> HandlerResult<bool> {
        (self.0)(ctx)
    }
}
