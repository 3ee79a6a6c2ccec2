//! Plugin registration and cooperative shutdown.

use std::sync::Arc;

use async_trait::async_trait;
use interchange::cog::{Cog, CogCommands, CogError, CogHooks, CogInfo, PingCog};
use interchange::command::CommandNode;
use interchange::dispatch::{Engine, HandlerResult};
use interchange::interaction::{
    Interaction, InteractionData, InteractionResponse, InteractionType, Snowflake, User,
};
use rstest::rstest;

use super::helpers::Reply;

/// Cog whose unload hook always fails.
struct Stubborn;

#[async_trait]
impl Cog for Stubborn {
    fn info(&self) -> CogInfo {
        CogInfo::new("stubborn", "Refuses to unload")
    }

    fn hooks(&self) -> CogHooks {
        CogHooks::none().with_unload().with_commands()
    }

    async fn unload(&self) -> HandlerResult<()> {
        Err("still busy".into())
    }

    fn commands(&self) -> CogCommands {
        CogCommands::new().with_command(
            CommandNode::new("status", "Reports status").with_handler(Reply("busy")),
        )
    }
}

fn invoke(name: &str) -> Interaction {
    let mut interaction = Interaction::new(
        Snowflake::new(8),
        Snowflake::new(2),
        InteractionType::ApplicationCommand,
    )
    .with_data(InteractionData::command(name));
    interaction.user = Some(User::new(Snowflake::new(42), "ada"));
    interaction
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cogs_serve_their_commands_and_report_unload_failures() {
    let mut builder = Engine::builder();
    builder.must_register_cog(PingCog);
    builder.register_cog(Stubborn).expect("stubborn");
    let engine = Arc::new(builder.build().expect("engine"));

    let ping = engine.dispatch(invoke("ping")).await;
    let status = engine.dispatch(invoke("status")).await;
    let failures = engine.shutdown().await;

    assert_eq!(
        ping.response().and_then(InteractionResponse::content),
        Some("Pong, ada!")
    );
    assert_eq!(
        status.response().and_then(InteractionResponse::content),
        Some("busy")
    );
    assert_eq!(failures.len(), 1);
    assert!(matches!(
        failures.first(),
        Some(CogError::Unload { name, .. }) if name == "stubborn"
    ));
}
