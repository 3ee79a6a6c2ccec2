//! Cog metadata, hook declarations, and errors.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::command::{CommandNode, CommandTreeError};
use crate::dispatch::{Check, SharedError};

/// Name and description of a cog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CogInfo {
    /// Unique cog name.
    pub name: String,
    /// Human-readable summary.
    pub description: String,
}

impl CogInfo {
    /// Creates cog metadata.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Optional lifecycle hooks a cog supplies.
///
/// The declaration is read once when the cog is registered; undeclared
/// hooks are never called.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CogHooks {
    /// Call [`super::Cog::load`] on registration.
    pub load: bool,
    /// Call [`super::Cog::unload`] on engine shutdown.
    pub unload: bool,
    /// Register the commands returned by [`super::Cog::commands`].
    pub commands: bool,
}

impl CogHooks {
    /// Declares no hooks.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            load: false,
            unload: false,
            commands: false,
        }
    }

    /// Declares the load hook.
    #[must_use]
    pub const fn with_load(mut self) -> Self {
        self.load = true;
        self
    }

    /// Declares the unload hook.
    #[must_use]
    pub const fn with_unload(mut self) -> Self {
        self.unload = true;
        self
    }

    /// Declares the commands provider.
    #[must_use]
    pub const fn with_commands(mut self) -> Self {
        self.commands = true;
        self
    }
}

/// Commands supplied by a cog, with checks applied to every one of them.
#[derive(Clone, Default)]
pub struct CogCommands {
    /// Top-level commands to register.
    pub commands: Vec<CommandNode>,
    /// Checks run before each command's own checks.
    pub checks: Vec<Arc<dyn Check>>,
}

impl CogCommands {
    /// Creates an empty command set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a top-level command.
    #[must_use]
    pub fn with_command(mut self, command: CommandNode) -> Self {
        self.commands.push(command);
        self
    }

    /// Adds a cog-wide check.
    #[must_use]
    pub fn with_check(mut self, check: impl Check + 'static) -> Self {
        self.checks.push(Arc::new(check));
        self
    }
}

impl fmt::Debug for CogCommands {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CogCommands")
            .field("commands", &self.commands)
            .field("checks", &self.checks.len())
            .finish()
    }
}

/// Failure registering or unloading a cog.
#[derive(Debug, Clone, Error)]
pub enum CogError {
    /// A cog with the same name is already registered.
    #[error("cog '{name}' is already registered")]
    AlreadyRegistered {
        /// Cog name.
        name: String,
    },

    /// The cog's load hook failed.
    #[error("cog '{name}' failed to load: {source}")]
    Load {
        /// Cog name.
        name: String,
        /// Error raised by the hook.
        #[source]
        source: SharedError,
    },

    /// The cog's unload hook failed.
    #[error("cog '{name}' failed to unload: {source}")]
    Unload {
        /// Cog name.
        name: String,
        /// Error raised by the hook.
        #[source]
        source: SharedError,
    },

    /// One of the cog's commands could not be registered.
    #[error("cog '{name}' command could not be registered: {source}")]
    Command {
        /// Cog name.
        name: String,
        /// Tree failure.
        #[source]
        source: CommandTreeError,
    },
}
