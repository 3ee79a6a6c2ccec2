//! When steps for interaction dispatch scenarios.

use axum::body::to_bytes;
use rstest_bdd_macros::when;
use serde_json::{Value, json};
use tower::ServiceExt;

use super::world::{DispatchWorld, run_async};

fn send(world: &mut DispatchWorld, body: &Value) -> Result<(), eyre::Report> {
    let app = world
        .app
        .clone()
        .ok_or_else(|| eyre::eyre!("missing router in scenario world"))?;
    let request = world.signed_request(body)?;
    let (status, bytes) = run_async(async move {
        let response = app.oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        Ok::<_, eyre::Report>((status, bytes))
    })?;
    world.responses.push((status, bytes));
    Ok(())
}

fn roll(options: Value) -> Value {
    json!({
        "id": "31",
        "application_id": "2",
        "type": 2,
        "data": {"name": "roll", "options": options}
    })
}

#[when("a signed ping request is received")]
fn ping_received(world: &mut DispatchWorld) -> Result<(), eyre::Report> {
    send(world, &json!({"id": "30", "application_id": "2", "type": 1}))
}

#[when("a signed request for an unregistered command is received")]
fn unknown_command_received(world: &mut DispatchWorld) -> Result<(), eyre::Report> {
    send(
        world,
        &json!({"id": "32", "application_id": "2", "type": 2, "data": {"name": "teleport"}}),
    )
}

#[when("a signed roll request with a non-numeric sides value is received")]
fn non_numeric_roll_received(world: &mut DispatchWorld) -> Result<(), eyre::Report> {
    send(world, &roll(json!([{"name": "sides", "type": 4, "value": "six"}])))
}

#[when("a signed roll request without a sides value is received")]
fn roll_without_sides_received(world: &mut DispatchWorld) -> Result<(), eyre::Report> {
    send(world, &roll(json!([])))
}
