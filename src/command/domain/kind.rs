//! Node kinds.

use serde::{Deserialize, Serialize};

/// Position of a node in the command hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    /// A top-level invocable command.
    Command,
    /// A container of subcommands; never invoked directly.
    SubcommandGroup,
    /// An invocable command nested under a group.
    Subcommand,
}

impl CommandKind {
    /// Returns whether nodes of this kind hold children.
    #[must_use]
    pub const fn is_group(self) -> bool {
        matches!(self, Self::SubcommandGroup)
    }
}
