//! Cogs: plugins that bundle commands with lifecycle hooks.
//!
//! A cog declares the optional hooks it supplies through [`CogHooks`] and is
//! registered with [`crate::dispatch::EngineBuilder::register_cog`].

mod builtin;
mod domain;
mod ports;

pub use builtin::PingCog;
pub use domain::{CogCommands, CogError, CogHooks, CogInfo};
pub use ports::Cog;
