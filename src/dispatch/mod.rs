//! Interaction dispatch: routing, checks, argument conversion, handler
//! invocation, and error propagation.
//!
//! An [`Engine`] is assembled once with an [`EngineBuilder`] and then
//! shared by every request. Each dispatched interaction produces a
//! [`DispatchOutcome`]; failures are handed to the error handlers of the
//! node they arose at and of its ancestors, root first.
//!
//! - Request state and errors in [`domain`]
//! - Handler, check, and hook traits in [`ports`]
//! - The engine in [`services`]

pub mod domain;
pub mod ports;
pub mod services;

pub use domain::{
    DispatchError, DispatchMetrics, DispatchOutcome, EngineBuildError, MetricsSnapshot,
    RequestContext, SharedError,
};
pub use ports::{
    AutocompleteHandler, Check, ErrorHandler, HandlerError, HandlerResult, InteractionHandler,
    InteractionHooks, autocomplete_fn, check_fn, error_handler_fn, handler_fn,
};
pub use services::{Engine, EngineBuilder};

#[cfg(test)]
mod tests;
