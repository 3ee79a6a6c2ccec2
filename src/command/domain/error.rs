//! Error types for command registration.

use thiserror::Error;

use super::NodeId;

/// Errors raised while building or editing the command tree.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandTreeError {
    /// A sibling with the same case-insensitive name already exists.
    #[error("command '{name}' is already registered")]
    AlreadyRegistered {
        /// The rejected name as supplied.
        name: String,
    },

    /// The parent node does not exist or has been removed.
    #[error("command node {0} does not exist")]
    UnknownNode(NodeId),

    /// A command name is empty or contains whitespace.
    #[error("invalid command name '{0}'")]
    InvalidName(String),
}
