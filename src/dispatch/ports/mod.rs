//! Traits implemented by command authors and embedding applications.

mod handler;
mod hook;

pub use handler::{
    AutocompleteFn, AutocompleteHandler, Check, CheckFn, ErrorHandler, ErrorHandlerFn,
    HandlerError, HandlerFn, HandlerResult, InteractionHandler, autocomplete_fn, check_fn,
    error_handler_fn, handler_fn,
};
pub use hook::InteractionHooks;
