//! Routes inbound interactions to handlers and propagates failures.

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;

use super::builder::RegisteredCog;
use crate::argument::domain::{Argument, ArgumentType, ArgumentValue, Arguments};
use crate::argument::services::{ArgumentConversionService, ConversionMode};
use crate::cog::{CogError, CogInfo};
use crate::command::{CommandNode, CommandTree, NodeId, command_path, flatten_options};
use crate::dispatch::domain::{DispatchError, DispatchMetrics, DispatchOutcome, RequestContext};
use crate::dispatch::ports::{HandlerResult, InteractionHooks};
use crate::interaction::{Interaction, InteractionResponse, InteractionType};
use crate::listener::{ComponentListenerRegistry, ListenerError};

/// How a routed command is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Invoke,
    Autocomplete,
}

/// The interaction dispatch engine.
///
/// Built once at start-up by [`super::EngineBuilder`] and shared by every
/// request task. The command tree is read-only after construction; only the
/// component listener registry is mutated while serving.
pub struct Engine {
    pub(super) tree: CommandTree,
    pub(super) conversion: ArgumentConversionService,
    pub(super) listeners: Arc<ComponentListenerRegistry>,
    pub(super) hooks: Option<Arc<dyn InteractionHooks>>,
    pub(super) metrics: DispatchMetrics,
    pub(super) cogs: Vec<RegisteredCog>,
}

impl Engine {
    /// Starts assembling an engine.
    #[must_use]
    pub fn builder() -> super::EngineBuilder {
        super::EngineBuilder::new()
    }

    /// Returns the registered command tree.
    #[must_use]
    pub const fn tree(&self) -> &CommandTree {
        &self.tree
    }

    /// Returns the component listener registry.
    #[must_use]
    pub const fn listeners(&self) -> &Arc<ComponentListenerRegistry> {
        &self.listeners
    }

    /// Returns the outcome counters.
    #[must_use]
    pub const fn metrics(&self) -> &DispatchMetrics {
        &self.metrics
    }

    /// Iterates over the registered cogs.
    pub fn cogs(&self) -> impl Iterator<Item = &CogInfo> {
        self.cogs.iter().map(|registered| &registered.info)
    }

    /// Dispatches one verified interaction.
    ///
    /// Pings are answered directly and are not counted. Every other
    /// interaction is routed, counted as successful or failed, and any
    /// failure is passed through the error handlers of the node it arose at
    /// and its ancestors, root first.
    pub async fn dispatch(&self, interaction: Interaction) -> DispatchOutcome {
        let kind = interaction.kind;
        if kind == InteractionType::Ping {
            return DispatchOutcome::success(Some(InteractionResponse::pong()));
        }

        let outcome = match kind {
            InteractionType::ApplicationCommand => {
                self.dispatch_command(interaction, Route::Invoke).await
            }
            InteractionType::Autocomplete => {
                self.dispatch_command(interaction, Route::Autocomplete).await
            }
            InteractionType::MessageComponent | InteractionType::ModalSubmit => {
                self.dispatch_component(interaction).await
            }
            InteractionType::Ping | InteractionType::Other(_) => {
                tracing::warn!(interaction_type = ?kind, "no route for interaction type");
                let ctx = RequestContext::new(interaction, Arc::clone(&self.listeners));
                self.fail(&ctx, NodeId::ROOT, DispatchError::UnsupportedInteraction(kind))
                    .await
            }
        };

        self.metrics.record(outcome.is_success());
        match outcome.error() {
            Some(error) => tracing::error!(%error, "failed to process interaction"),
            None if outcome.response().is_none() => {
                tracing::debug!("interaction processed without a response");
            }
            None => tracing::debug!("interaction processed"),
        }
        outcome
    }

    /// Runs the unload hook of every cog that declared one.
    ///
    /// Failures are logged and returned; every cog is still unloaded.
    pub async fn shutdown(&self) -> Vec<CogError> {
        let mut failures = Vec::new();
        for registered in self.cogs.iter().filter(|registered| registered.hooks.unload) {
            let name = &registered.info.name;
            match registered.cog.unload().await {
                Ok(()) => tracing::info!(cog = %name, "unloaded cog"),
                Err(source) => {
                    let error = CogError::Unload {
                        name: name.clone(),
                        source: Arc::from(source),
                    };
                    tracing::warn!(%error, "cog unload failed");
                    failures.push(error);
                }
            }
        }
        failures
    }

    async fn dispatch_command(&self, interaction: Interaction, route: Route) -> DispatchOutcome {
        let request = interaction
            .data
            .as_ref()
            .map(|data| (command_path(data), flatten_options(&data.options)));
        let unrouted = RequestContext::new(interaction, Arc::clone(&self.listeners));
        let Some((path, raw_options)) = request else {
            return self
                .fail(&unrouted, NodeId::ROOT, DispatchError::MissingData)
                .await;
        };

        let name = path.join(" ");
        let resolution = self.tree.resolve(&path);
        let routed = unrouted.with_request(path, raw_options);
        let Some(resolution) = resolution else {
            return self
                .fail(&routed, NodeId::ROOT, DispatchError::CommandNotFound { name })
                .await;
        };

        if resolution.is_malformed() {
            tracing::warn!(
                command = %name,
                unresolved = ?resolution.unresolved,
                "request path continues past a command that has no subcommands"
            );
        }
        let node = resolution.node;
        let ctx = routed.with_command(node, self.tree.qualified_name(node), resolution.unresolved);
        if self.tree.is_group(node) {
            return self
                .fail(&ctx, node, DispatchError::CommandNotFound { name })
                .await;
        }
        self.invoke(ctx, node, route).await
    }

    async fn invoke(&self, mut ctx: RequestContext, node: NodeId, route: Route) -> DispatchOutcome {
        if let Some(hooks) = &self.hooks {
            if let Err(error) = guarded(hooks.before(&ctx)).await {
                return self.fail(&ctx, NodeId::ROOT, hook_failure(error)).await;
            }
        }

        let outcome = self.run_command(&mut ctx, node, route).await;

        let Some(hooks) = &self.hooks else {
            return outcome;
        };
        match guarded(hooks.after(&ctx, &outcome)).await {
            Ok(()) => outcome,
            Err(error) => self.fail(&ctx, NodeId::ROOT, hook_failure(error)).await,
        }
    }

    async fn run_command(
        &self,
        ctx: &mut RequestContext,
        node_id: NodeId,
        route: Route,
    ) -> DispatchOutcome {
        let Some(node) = self.tree.node(node_id) else {
            let name = ctx.command_name().unwrap_or_default().to_owned();
            return self
                .fail(ctx, NodeId::ROOT, DispatchError::CommandNotFound { name })
                .await;
        };

        if let Err(error) = self.run_checks(ctx, node_id).await {
            return self.fail(ctx, node_id, error).await;
        }

        let mode = match route {
            Route::Invoke => ConversionMode::Strict,
            Route::Autocomplete => ConversionMode::Lenient,
        };
        let converted = self
            .conversion
            .convert(ctx.interaction(), ctx.raw_options(), node.parameters(), mode)
            .await;
        match converted {
            Ok(arguments) => ctx.set_arguments(arguments),
            Err(error) => return self.fail(ctx, node_id, DispatchError::from(error)).await,
        }

        let result = match route {
            Route::Invoke => Self::run_handler(ctx, node).await,
            Route::Autocomplete => Self::run_autocomplete(ctx, node).await,
        };
        match result {
            Ok(response) => DispatchOutcome::success(response),
            Err(error) => self.fail(ctx, node_id, error).await,
        }
    }

    async fn run_handler(
        ctx: &RequestContext,
        node: &CommandNode,
    ) -> Result<Option<InteractionResponse>, DispatchError> {
        let Some(handler) = node.handler() else {
            return Err(DispatchError::CommandNotFound {
                name: ctx.command_name().unwrap_or(node.name()).to_owned(),
            });
        };
        guarded(handler.handle(ctx)).await
    }

    async fn run_autocomplete(
        ctx: &RequestContext,
        node: &CommandNode,
    ) -> Result<Option<InteractionResponse>, DispatchError> {
        let Some(handler) = node.autocomplete() else {
            return Err(DispatchError::AutocompleteNotFound {
                name: ctx.command_name().unwrap_or(node.name()).to_owned(),
            });
        };
        let choices = guarded(handler.complete(ctx)).await?;
        Ok(Some(InteractionResponse::autocomplete(choices)))
    }

    /// Runs inherited checks root first, then the node's own.
    async fn run_checks(&self, ctx: &RequestContext, node_id: NodeId) -> Result<(), DispatchError> {
        for ancestor in self.tree.ancestry(node_id) {
            let Some(node) = self.tree.node(ancestor) else {
                continue;
            };
            for check in node.checks() {
                match guarded(check.can_run(ctx)).await {
                    Ok(true) => {}
                    Ok(false) => return Err(DispatchError::CheckFailure { source: None }),
                    Err(DispatchError::Handler(source)) => {
                        return Err(DispatchError::CheckFailure {
                            source: Some(source),
                        });
                    }
                    Err(error) => return Err(error),
                }
            }
        }
        Ok(())
    }

    async fn dispatch_component(&self, interaction: Interaction) -> DispatchOutcome {
        let (key, values) = interaction
            .data
            .as_ref()
            .map_or((None, Vec::new()), |data| {
                (data.custom_id.clone(), data.values.clone())
            });
        let Some(key) = key else {
            let ctx = RequestContext::new(interaction, Arc::clone(&self.listeners));
            return self.fail(&ctx, NodeId::ROOT, DispatchError::MissingData).await;
        };

        let mut arguments = Arguments::new();
        arguments.insert(
            key.clone(),
            Argument::new(ArgumentType::Strings, ArgumentValue::Strings(values)),
        );
        let ctx = RequestContext::new(interaction, Arc::clone(&self.listeners))
            .with_listener_key(key.clone())
            .with_arguments(arguments);

        let delivered = AssertUnwindSafe(self.listeners.deliver(&key, &ctx))
            .catch_unwind()
            .await;
        let error = match delivered {
            Ok(Ok(response)) => return DispatchOutcome::success(response),
            Ok(Err(ListenerError::NotFound { .. } | ListenerError::ConsumerGone { .. })) => {
                DispatchError::ComponentListenerNotFound { key }
            }
            Ok(Err(ListenerError::Handler(source))) => DispatchError::Handler(source),
            Ok(Err(error @ ListenerError::Poisoned(_))) => DispatchError::Listener(error),
            Err(payload) => panicked(payload.as_ref()),
        };
        self.fail(&ctx, NodeId::ROOT, error).await
    }

    async fn fail(
        &self,
        ctx: &RequestContext,
        origin: NodeId,
        error: DispatchError,
    ) -> DispatchOutcome {
        let response = self.propagate_error(ctx, origin, &error).await;
        DispatchOutcome::failure(error, response)
    }

    /// Hands `error` to the error handlers from the root down to `origin`.
    ///
    /// Every handler runs; the response of the deepest handler that produced
    /// one wins. A root without an error handler logs the error.
    async fn propagate_error(
        &self,
        ctx: &RequestContext,
        origin: NodeId,
        error: &DispatchError,
    ) -> Option<InteractionResponse> {
        let mut response = None;
        for ancestor in self.tree.ancestry(origin) {
            let Some(handler) = self.tree.node(ancestor).and_then(CommandNode::error_handler)
            else {
                if ancestor == NodeId::ROOT {
                    tracing::error!(
                        %error,
                        command = ctx.command_name().unwrap_or_default(),
                        "unhandled interaction error"
                    );
                }
                continue;
            };
            match AssertUnwindSafe(handler.handle_error(ctx, error))
                .catch_unwind()
                .await
            {
                Ok(Ok(Some(produced))) => response = Some(produced),
                Ok(Ok(None)) => {}
                Ok(Err(failure)) => {
                    tracing::warn!(error = %failure, node = %ancestor, "error handler failed");
                }
                Err(payload) => {
                    tracing::error!(
                        panic = %panic_message(payload.as_ref()),
                        node = %ancestor,
                        "error handler panicked"
                    );
                }
            }
        }
        response
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("commands", &self.tree.len())
            .field("listeners", &self.listeners)
            .field("metrics", &self.metrics.snapshot())
            .field("cogs", &self.cogs.len())
            .finish_non_exhaustive()
    }
}

/// Runs user code, containing panics and wrapping its errors.
async fn guarded<T>(
    future: impl Future<Output = HandlerResult<T>>,
) -> Result<T, DispatchError> {
    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(error)) => Err(DispatchError::Handler(Arc::from(error))),
        Err(payload) => Err(panicked(payload.as_ref())),
    }
}

fn hook_failure(error: DispatchError) -> DispatchError {
    match error {
        DispatchError::Handler(source) => DispatchError::Hook(source),
        other => other,
    }
}

fn panicked(payload: &(dyn Any + Send)) -> DispatchError {
    let message = panic_message(payload);
    tracing::error!(panic = %message, "recovered panic in interaction handler");
    DispatchError::HandlerPanicked { message }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_owned())
}
