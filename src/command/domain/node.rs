//! Command node definitions.

use std::fmt;
use std::sync::Arc;

use super::{ArgumentParameter, CommandKind};
use crate::dispatch::{AutocompleteHandler, Check, ErrorHandler, InteractionHandler};

/// One command, subcommand, or subcommand group.
///
/// Nodes are assembled with the `with_*` builders and handed to
/// [`super::CommandTree::add_command`], which assigns the node kind from its
/// position. Nested subcommands declared with [`Self::with_subcommand`] are
/// registered along with their parent.
#[derive(Clone)]
pub struct CommandNode {
    name: String,
    description: String,
    kind: CommandKind,
    parameters: Vec<ArgumentParameter>,
    handler: Option<Arc<dyn InteractionHandler>>,
    autocomplete: Option<Arc<dyn AutocompleteHandler>>,
    error_handler: Option<Arc<dyn ErrorHandler>>,
    checks: Vec<Arc<dyn Check>>,
    subcommands: Vec<CommandNode>,
}

impl CommandNode {
    /// Creates a node with a name and description.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind: CommandKind::Command,
            parameters: Vec::new(),
            handler: None,
            autocomplete: None,
            error_handler: None,
            checks: Vec::new(),
            subcommands: Vec::new(),
        }
    }

    pub(crate) fn root() -> Self {
        let mut root = Self::new("", "");
        root.kind = CommandKind::SubcommandGroup;
        root
    }

    /// Appends a declared parameter.
    #[must_use]
    pub fn with_parameter(mut self, parameter: ArgumentParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Sets the primary handler.
    #[must_use]
    pub fn with_handler(mut self, handler: impl InteractionHandler + 'static) -> Self {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Sets the autocomplete handler.
    #[must_use]
    pub fn with_autocomplete(mut self, handler: impl AutocompleteHandler + 'static) -> Self {
        self.autocomplete = Some(Arc::new(handler));
        self
    }

    /// Sets the error handler.
    #[must_use]
    pub fn with_error_handler(mut self, handler: impl ErrorHandler + 'static) -> Self {
        self.error_handler = Some(Arc::new(handler));
        self
    }

    /// Appends a pre-execution check.
    #[must_use]
    pub fn with_check(mut self, check: impl Check + 'static) -> Self {
        self.checks.push(Arc::new(check));
        self
    }

    /// Declares a nested subcommand registered together with this node.
    #[must_use]
    pub fn with_subcommand(mut self, subcommand: Self) -> Self {
        self.subcommands.push(subcommand);
        self
    }

    /// Returns the name as registered.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the node kind.
    #[must_use]
    pub const fn kind(&self) -> CommandKind {
        self.kind
    }

    /// Returns the declared parameters in declaration order.
    #[must_use]
    pub fn parameters(&self) -> &[ArgumentParameter] {
        &self.parameters
    }

    /// Returns the primary handler.
    #[must_use]
    pub const fn handler(&self) -> Option<&Arc<dyn InteractionHandler>> {
        self.handler.as_ref()
    }

    /// Returns the autocomplete handler.
    #[must_use]
    pub const fn autocomplete(&self) -> Option<&Arc<dyn AutocompleteHandler>> {
        self.autocomplete.as_ref()
    }

    /// Returns the error handler.
    #[must_use]
    pub const fn error_handler(&self) -> Option<&Arc<dyn ErrorHandler>> {
        self.error_handler.as_ref()
    }

    /// Returns the pre-execution checks in declaration order.
    #[must_use]
    pub fn checks(&self) -> &[Arc<dyn Check>] {
        &self.checks
    }

    /// Returns subcommands declared but not yet registered.
    #[must_use]
    pub fn subcommands(&self) -> &[Self] {
        &self.subcommands
    }

    pub(crate) const fn set_kind(&mut self, kind: CommandKind) {
        self.kind = kind;
    }

    pub(crate) fn take_subcommands(&mut self) -> Vec<Self> {
        std::mem::take(&mut self.subcommands)
    }

    pub(crate) fn set_error_handler(&mut self, handler: Arc<dyn ErrorHandler>) {
        self.error_handler = Some(handler);
    }

    pub(crate) fn push_check(&mut self, check: Arc<dyn Check>) {
        self.checks.push(check);
    }

    /// Inserts checks ahead of the node's own checks.
    pub(crate) fn prepend_checks(&mut self, checks: &[Arc<dyn Check>]) {
        let own = std::mem::take(&mut self.checks);
        self.checks = checks.iter().cloned().chain(own).collect();
    }
}

impl fmt::Debug for CommandNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandNode")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("parameters", &self.parameters)
            .field("has_handler", &self.handler.is_some())
            .field("has_autocomplete", &self.autocomplete.is_some())
            .field("has_error_handler", &self.error_handler.is_some())
            .field("checks", &self.checks.len())
            .field("subcommands", &self.subcommands)
            .finish()
    }
}
