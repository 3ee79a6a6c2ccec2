//! Given steps for interaction dispatch scenarios.

use std::sync::Arc;

use async_trait::async_trait;
use interchange::argument::domain::ArgumentType;
use interchange::command::{ArgumentParameter, CommandNode};
use interchange::dispatch::{Engine, HandlerResult, InteractionHandler, RequestContext};
use interchange::http::{AppState, router};
use interchange::interaction::InteractionResponse;
use interchange::signature::TrustedKeys;
use rstest_bdd_macros::given;

use super::world::{DispatchWorld, ROUTE, SilentRoot};

struct Roll;

#[async_trait]
impl InteractionHandler for Roll {
    async fn handle(&self, ctx: &RequestContext) -> HandlerResult<Option<InteractionResponse>> {
        let sides = ctx.argument("sides")?.int()?;
        Ok(Some(InteractionResponse::message(format!("rolled a d{sides}"))))
    }
}

#[given("an engine with a silent root error handler and a roll command")]
fn engine_with_roll(world: &mut DispatchWorld) -> Result<(), eyre::Report> {
    let mut builder =
        Engine::builder().with_error_handler(SilentRoot(Arc::clone(&world.observed)));
    builder.add_command(
        CommandNode::new("roll", "Rolls a die")
            .with_parameter(ArgumentParameter::required("sides", ArgumentType::Int))
            .with_handler(Roll),
    )?;
    let engine = Arc::new(builder.build()?);
    let keys = TrustedKeys::new(vec![world.key.verifying_key()]);
    world.app = Some(router(AppState::new(Arc::clone(&engine), keys), ROUTE));
    world.engine = Some(engine);
    Ok(())
}
