//! Per-request state threaded through checks, handlers, and hooks.

use std::sync::Arc;

use crate::argument::domain::{Argument, ArgumentAccessError, Arguments};
use crate::command::{NodeId, RawOptions};
use crate::interaction::{DataOption, Interaction, User};
use crate::listener::ComponentListenerRegistry;

/// Everything known about the interaction being dispatched.
///
/// The context is built by the engine as routing proceeds and is passed by
/// reference to every check, handler, error handler, and hook.
#[derive(Debug, Clone)]
pub struct RequestContext {
    interaction: Interaction,
    command: Option<NodeId>,
    command_name: Option<String>,
    command_path: Vec<String>,
    unresolved_path: Vec<String>,
    raw_options: RawOptions,
    arguments: Arguments,
    listener_key: Option<String>,
    listeners: Arc<ComponentListenerRegistry>,
}

impl RequestContext {
    /// Creates an unrouted context for an interaction.
    #[must_use]
    pub fn new(interaction: Interaction, listeners: Arc<ComponentListenerRegistry>) -> Self {
        Self {
            interaction,
            command: None,
            command_name: None,
            command_path: Vec::new(),
            unresolved_path: Vec::new(),
            raw_options: RawOptions::new(),
            arguments: Arguments::new(),
            listener_key: None,
            listeners,
        }
    }

    /// Sets the request path and flattened option values.
    #[must_use]
    pub fn with_request(mut self, command_path: Vec<String>, raw_options: RawOptions) -> Self {
        self.command_path = command_path;
        self.raw_options = raw_options;
        self
    }

    /// Records the resolved command node.
    #[must_use]
    pub fn with_command(
        mut self,
        node: NodeId,
        qualified_name: impl Into<String>,
        unresolved_path: Vec<String>,
    ) -> Self {
        self.command = Some(node);
        self.command_name = Some(qualified_name.into());
        self.unresolved_path = unresolved_path;
        self
    }

    /// Records the component listener key being delivered.
    #[must_use]
    pub fn with_listener_key(mut self, key: impl Into<String>) -> Self {
        self.listener_key = Some(key.into());
        self
    }

    /// Replaces the converted arguments.
    #[must_use]
    pub fn with_arguments(mut self, arguments: Arguments) -> Self {
        self.arguments = arguments;
        self
    }

    pub(crate) fn set_arguments(&mut self, arguments: Arguments) {
        self.arguments = arguments;
    }

    /// Returns the inbound interaction.
    #[must_use]
    pub const fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    /// Returns the user who triggered the interaction.
    #[must_use]
    pub fn invoker(&self) -> Option<&User> {
        self.interaction.invoker()
    }

    /// Returns the resolved command node, if routing reached one.
    #[must_use]
    pub const fn command(&self) -> Option<NodeId> {
        self.command
    }

    /// Returns the space-separated name of the resolved command.
    #[must_use]
    pub fn command_name(&self) -> Option<&str> {
        self.command_name.as_deref()
    }

    /// Returns the path named by the request, top-level name first.
    #[must_use]
    pub fn command_path(&self) -> &[String] {
        &self.command_path
    }

    /// Returns path segments left over after resolution stopped at a
    /// non-group node.
    #[must_use]
    pub fn unresolved_path(&self) -> &[String] {
        &self.unresolved_path
    }

    /// Returns the flattened option values keyed by name.
    #[must_use]
    pub const fn raw_options(&self) -> &RawOptions {
        &self.raw_options
    }

    /// Returns the option the user is typing during autocomplete.
    #[must_use]
    pub fn focused_option(&self) -> Option<&DataOption> {
        self.raw_options.values().find(|option| option.focused)
    }

    /// Returns the converted arguments.
    #[must_use]
    pub const fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    /// Returns one converted argument.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentAccessError::NotFound`] when the argument is absent.
    pub fn argument(&self, name: &str) -> Result<&Argument, ArgumentAccessError> {
        self.arguments.require(name)
    }

    /// Returns the custom ID of the component being delivered.
    #[must_use]
    pub fn listener_key(&self) -> Option<&str> {
        self.listener_key.as_deref()
    }

    /// Returns the registry used to await follow-up components.
    #[must_use]
    pub const fn listeners(&self) -> &Arc<ComponentListenerRegistry> {
        &self.listeners
    }
}
