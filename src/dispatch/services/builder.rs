//! Start-up assembly of an [`Engine`].

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use mockable::{Clock, DefaultClock};

use super::Engine;
use crate::argument::adapters::InMemoryDirectory;
use crate::argument::domain::ArgumentType;
use crate::argument::ports::DirectoryLookup;
use crate::argument::services::{ArgumentConversionService, Converter, ConverterRegistry};
use crate::cog::{Cog, CogCommands, CogError, CogHooks, CogInfo};
use crate::command::{CommandNode, CommandTree, CommandTreeError, NodeId};
use crate::config::EngineConfig;
use crate::dispatch::domain::{DispatchMetrics, EngineBuildError};
use crate::dispatch::ports::{Check, ErrorHandler, InteractionHooks};
use crate::listener::ComponentListenerRegistry;

const DEFAULT_LISTENER_TTL: Duration = Duration::from_secs(900);
const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(2);

/// A cog accepted by the builder, with its hook declaration.
pub(crate) struct RegisteredCog {
    pub(crate) info: CogInfo,
    pub(crate) hooks: CogHooks,
    pub(crate) cog: Arc<dyn Cog>,
}

/// Collects commands, cogs, converters, and collaborators before serving.
///
/// Registration happens here, single-threaded, so the built [`Engine`] can
/// share its command tree across requests without locking.
pub struct EngineBuilder {
    tree: CommandTree,
    converters: ConverterRegistry,
    directory: Arc<dyn DirectoryLookup>,
    clock: Arc<dyn Clock + Send + Sync>,
    listener_ttl: Duration,
    lookup_timeout: Duration,
    hooks: Option<Arc<dyn InteractionHooks>>,
    cogs: Vec<RegisteredCog>,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineBuilder {
    /// Creates a builder with the built-in converters, an empty in-memory
    /// directory, and the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: CommandTree::new(),
            converters: ConverterRegistry::builtin(),
            directory: Arc::new(InMemoryDirectory::new()),
            clock: Arc::new(DefaultClock),
            listener_ttl: DEFAULT_LISTENER_TTL,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
            hooks: None,
            cogs: Vec::new(),
        }
    }

    /// Creates a builder using the listener and directory settings of a
    /// loaded configuration.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new()
            .with_listener_ttl(config.listeners.default_ttl())
            .with_lookup_timeout(config.directory.lookup_timeout())
    }

    /// Sets the directory used for lookups by name.
    #[must_use]
    pub fn with_directory(mut self, directory: Arc<dyn DirectoryLookup>) -> Self {
        self.directory = directory;
        self
    }

    /// Sets the clock used for listener expiry.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        self.clock = clock;
        self
    }

    /// Sets the lifetime of listeners registered without one.
    #[must_use]
    pub fn with_listener_ttl(mut self, ttl: Duration) -> Self {
        self.listener_ttl = ttl;
        self
    }

    /// Bounds every directory lookup made during conversion.
    #[must_use]
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    /// Replaces the whole converter registry.
    #[must_use]
    pub fn with_converters(mut self, converters: ConverterRegistry) -> Self {
        self.converters = converters;
        self
    }

    /// Registers or replaces the converter for a type tag.
    #[must_use]
    pub fn with_converter(
        mut self,
        argument_type: ArgumentType,
        converter: impl Converter + 'static,
    ) -> Self {
        self.converters.register(argument_type, converter);
        self
    }

    /// Installs hooks run around every command invocation.
    #[must_use]
    pub fn with_hooks(mut self, hooks: impl InteractionHooks + 'static) -> Self {
        self.hooks = Some(Arc::new(hooks));
        self
    }

    /// Sets the root error handler, which observes every dispatch error.
    #[must_use]
    pub fn with_error_handler(mut self, handler: impl ErrorHandler + 'static) -> Self {
        if let Some(root) = self.tree.node_mut(NodeId::ROOT) {
            root.set_error_handler(Arc::new(handler));
        }
        self
    }

    /// Adds a global check, run before every command's own checks.
    #[must_use]
    pub fn with_check(mut self, check: impl Check + 'static) -> Self {
        if let Some(root) = self.tree.node_mut(NodeId::ROOT) {
            root.push_check(Arc::new(check));
        }
        self
    }

    /// Registers a top-level command.
    ///
    /// # Errors
    ///
    /// Returns [`CommandTreeError`] as [`CommandTree::add_command`] does.
    pub fn add_command(&mut self, command: CommandNode) -> Result<NodeId, CommandTreeError> {
        self.tree.add_command(NodeId::ROOT, command)
    }

    /// Registers a top-level command, panicking on failure.
    ///
    /// # Panics
    ///
    /// Panics when [`Self::add_command`] would return an error.
    pub fn must_add_command(&mut self, command: CommandNode) -> NodeId {
        self.tree.must_add_command(NodeId::ROOT, command)
    }

    /// Returns the command tree for nested registration.
    pub const fn tree_mut(&mut self) -> &mut CommandTree {
        &mut self.tree
    }

    /// Registers a cog and the hooks it declares.
    ///
    /// The cog's commands are staged first, then its load hook runs; the
    /// builder is unchanged if either fails. Cog-wide checks run before each
    /// command's own checks.
    ///
    /// # Errors
    ///
    /// Returns [`CogError::AlreadyRegistered`] for a duplicate name,
    /// [`CogError::Command`] if a command cannot be registered, and
    /// [`CogError::Load`] if the load hook fails.
    pub fn register_cog(&mut self, cog: impl Cog + 'static) -> Result<(), CogError> {
        let info = cog.info();
        if self.cogs.iter().any(|registered| registered.info.name == info.name) {
            return Err(CogError::AlreadyRegistered { name: info.name });
        }
        let hooks = cog.hooks();

        let staged = if hooks.commands {
            Some(stage_commands(&self.tree, &info, cog.commands())?)
        } else {
            None
        };

        if hooks.load {
            cog.load().map_err(|source| CogError::Load {
                name: info.name.clone(),
                source: Arc::from(source),
            })?;
        }

        if let Some(tree) = staged {
            self.tree = tree;
        }
        tracing::info!(cog = %info.name, ?hooks, "registered cog");
        self.cogs.push(RegisteredCog {
            info,
            hooks,
            cog: Arc::new(cog),
        });
        Ok(())
    }

    /// Registers a cog, panicking on failure.
    ///
    /// # Panics
    ///
    /// Panics when [`Self::register_cog`] would return an error.
    pub fn must_register_cog(&mut self, cog: impl Cog + 'static) {
        if let Err(error) = self.register_cog(cog) {
            panic!("failed to register cog: {error}");
        }
    }

    /// Validates the registrations and produces the engine.
    ///
    /// # Errors
    ///
    /// Returns [`EngineBuildError::ConverterNotFound`] when a declared
    /// parameter type has no converter.
    pub fn build(self) -> Result<Engine, EngineBuildError> {
        for (id, node) in self.tree.nodes() {
            let missing = node
                .parameters()
                .iter()
                .find(|parameter| !self.converters.contains(parameter.argument_type));
            if let Some(parameter) = missing {
                return Err(EngineBuildError::ConverterNotFound {
                    command: self.tree.qualified_name(id),
                    parameter: parameter.name.clone(),
                    argument_type: parameter.argument_type,
                });
            }
        }

        let listeners = Arc::new(ComponentListenerRegistry::new(
            self.clock,
            self.listener_ttl,
        ));
        let conversion = ArgumentConversionService::new(
            Arc::new(self.converters),
            self.directory,
            self.lookup_timeout,
        );
        tracing::debug!(
            commands = self.tree.len(),
            cogs = self.cogs.len(),
            "built interaction engine"
        );
        Ok(Engine {
            tree: self.tree,
            conversion,
            listeners,
            hooks: self.hooks,
            metrics: DispatchMetrics::new(),
            cogs: self.cogs,
        })
    }
}

fn stage_commands(
    tree: &CommandTree,
    info: &CogInfo,
    provided: CogCommands,
) -> Result<CommandTree, CogError> {
    let mut staged = tree.clone();
    for mut command in provided.commands {
        command.prepend_checks(&provided.checks);
        tracing::debug!(cog = %info.name, command = %command.name(), "registering cog command");
        staged
            .add_command(NodeId::ROOT, command)
            .map_err(|source| CogError::Command {
                name: info.name.clone(),
                source,
            })?;
    }
    Ok(staged)
}

impl fmt::Debug for EngineBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineBuilder")
            .field("commands", &self.tree.len())
            .field("converters", &self.converters)
            .field("listener_ttl", &self.listener_ttl)
            .field("lookup_timeout", &self.lookup_timeout)
            .field("has_hooks", &self.hooks.is_some())
            .field("cogs", &self.cogs.len())
            .finish_non_exhaustive()
    }
}
