//! Interchange: a signed-webhook interaction engine.
//!
//! The crate verifies inbound interaction webhooks, routes each one through
//! a tree of commands, converts its options into typed arguments, and runs
//! the matching handler. Failures travel up the command ancestry to every
//! registered error handler, and follow-up component interactions are
//! delivered to short-lived listeners.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: pure types and rules with no infrastructure dependencies
//! - **Ports**: trait interfaces for handlers, lookups, and sinks
//! - **Adapters**: in-memory and logging implementations of those ports
//!
//! # Modules
//!
//! - [`interaction`]: wire model for interactions and responses
//! - [`signature`]: Ed25519 request verification
//! - [`command`]: the command tree and path resolution
//! - [`argument`]: typed argument conversion
//! - [`listener`]: component listeners and their expiry sweeper
//! - [`dispatch`]: the engine and its error propagation
//! - [`cog`]: plugins bundling commands with lifecycle hooks
//! - [`notify`]: operator notifications
//! - [`http`]: the signed `POST` route
//! - [`config`]: TOML configuration with environment overrides
//! - [`telemetry`]: log subscriber installation

pub mod argument;
pub mod cog;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod http;
pub mod interaction;
pub mod listener;
pub mod notify;
pub mod signature;
pub mod telemetry;
