//! Component listeners: short-lived registrations awaiting exactly one
//! follow-up interaction tied to a component's custom ID.
//!
//! A listener either runs a handler when its component is activated or
//! hands the interaction to a task waiting on [`ComponentListener::recv`].
//! Expired listeners are removed by a background sweeper started with
//! [`spawn_sweeper`].

mod error;
mod registry;
mod sweeper;

pub use error::{ListenerError, ListenerResult};
pub use registry::{ComponentListener, ComponentListenerRegistry};
pub use sweeper::spawn_sweeper;

#[cfg(test)]
mod tests;
