//! Cogs shipped with the engine.

use async_trait::async_trait;

use super::{Cog, CogCommands, CogHooks, CogInfo};
use crate::command::CommandNode;
use crate::dispatch::{HandlerResult, InteractionHandler, RequestContext};
use crate::interaction::InteractionResponse;

/// Liveness cog providing a `/ping` command.
#[derive(Debug, Clone, Copy, Default)]
pub struct PingCog;

struct Pong;

#[async_trait]
impl InteractionHandler for Pong {
    async fn handle(&self, ctx: &RequestContext) -> HandlerResult<Option<InteractionResponse>> {
        let content = ctx.invoker().map_or_else(
            || "Pong!".to_owned(),
            |user| format!("Pong, {}!", user.username),
        );
        Ok(Some(InteractionResponse::message(content)))
    }
}

impl Cog for PingCog {
    fn info(&self) -> CogInfo {
        CogInfo::new("ping", "Liveness check")
    }

    fn hooks(&self) -> CogHooks {
        CogHooks::none().with_commands()
    }

    fn commands(&self) -> CogCommands {
        CogCommands::new().with_command(
            CommandNode::new("ping", "Checks that the bot is responding").with_handler(Pong),
        )
    }
}
