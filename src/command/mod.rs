//! Command tree: registration, type promotion, and path resolution.
//!
//! Commands are registered once at start-up into a [`domain::CommandTree`]
//! and then read concurrently by every request. Each node is a command, a
//! subcommand, or a subcommand group; a node that gains children stops being
//! directly invocable.
//!
//! - Domain types in [`domain`]

pub mod domain;

pub use domain::{
    ArgumentParameter, CommandKind, CommandNode, CommandTree, CommandTreeError, NodeId,
    ParameterBound, ParameterConstraints, RawOptions, Resolution, build_path_from_options,
    command_path, flatten_options,
};

#[cfg(test)]
mod tests;
