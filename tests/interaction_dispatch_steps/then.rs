//! Then steps for interaction dispatch scenarios.

use axum::body::Bytes;
use axum::http::StatusCode;
use interchange::argument::domain::ConversionError;
use interchange::dispatch::{DispatchError, MetricsSnapshot};
use rstest_bdd_macros::then;
use serde_json::{Value, json};

use super::world::DispatchWorld;

fn last_response(world: &DispatchWorld) -> Result<&(StatusCode, Bytes), eyre::Report> {
    world
        .responses
        .last()
        .ok_or_else(|| eyre::eyre!("no response recorded in scenario world"))
}

fn metrics(world: &DispatchWorld) -> Result<MetricsSnapshot, eyre::Report> {
    world
        .engine
        .as_ref()
        .map(|engine| engine.metrics().snapshot())
        .ok_or_else(|| eyre::eyre!("missing engine in scenario world"))
}

fn conversion_failure(
    world: &DispatchWorld,
    index: usize,
) -> Result<(String, ConversionError), eyre::Report> {
    match world.observed()?.get(index) {
        Some(DispatchError::Conversion(error)) => {
            Ok((error.parameter.clone(), error.source.clone()))
        }
        other => Err(eyre::eyre!("expected a conversion error, found {other:?}")),
    }
}

#[then("the response status is 200")]
fn status_ok(world: &DispatchWorld) -> Result<(), eyre::Report> {
    let (status, _) = last_response(world)?;
    if *status != StatusCode::OK {
        return Err(eyre::eyre!("expected 200, found {status}"));
    }
    Ok(())
}

#[then("the response status is 204")]
fn status_no_content(world: &DispatchWorld) -> Result<(), eyre::Report> {
    let (status, _) = last_response(world)?;
    if *status != StatusCode::NO_CONTENT {
        return Err(eyre::eyre!("expected 204, found {status}"));
    }
    Ok(())
}

#[then("the response body is the pong acknowledgement")]
fn body_is_pong(world: &DispatchWorld) -> Result<(), eyre::Report> {
    let (_, bytes) = last_response(world)?;
    let body: Value = serde_json::from_slice(bytes)?;
    if body != json!({"type": 1}) {
        return Err(eyre::eyre!("expected pong acknowledgement, found {body}"));
    }
    Ok(())
}

#[then("the response body is empty")]
fn body_is_empty(world: &DispatchWorld) -> Result<(), eyre::Report> {
    let (_, bytes) = last_response(world)?;
    if !bytes.is_empty() {
        return Err(eyre::eyre!("expected an empty body, found {} bytes", bytes.len()));
    }
    Ok(())
}

#[then("no interaction has been counted")]
fn nothing_counted(world: &DispatchWorld) -> Result<(), eyre::Report> {
    let snapshot = metrics(world)?;
    if snapshot != MetricsSnapshot::default() {
        return Err(eyre::eyre!("expected no counted interactions, found {snapshot:?}"));
    }
    Ok(())
}

#[then("the failed counter is one")]
fn one_failure_counted(world: &DispatchWorld) -> Result<(), eyre::Report> {
    let snapshot = metrics(world)?;
    if snapshot.failed != 1 || snapshot.successful != 0 {
        return Err(eyre::eyre!("expected one failure, found {snapshot:?}"));
    }
    Ok(())
}

#[then("the root error handler observed that the command was not found")]
fn root_saw_command_not_found(world: &DispatchWorld) -> Result<(), eyre::Report> {
    let observed = world.observed()?;
    match observed.as_slice() {
        [DispatchError::CommandNotFound { name }] if name == "teleport" => Ok(()),
        other => Err(eyre::eyre!("expected one command-not-found error, found {other:?}")),
    }
}

#[then("the first failure is a bad integer for sides")]
fn first_failure_is_bad_int(world: &DispatchWorld) -> Result<(), eyre::Report> {
    match conversion_failure(world, 0)? {
        (parameter, ConversionError::BadInt) if parameter == "sides" => Ok(()),
        other => Err(eyre::eyre!("expected a bad integer for sides, found {other:?}")),
    }
}

#[then("the second failure is a missing argument for sides")]
fn second_failure_is_missing(world: &DispatchWorld) -> Result<(), eyre::Report> {
    match conversion_failure(world, 1)? {
        (parameter, ConversionError::MissingRequiredArgument) if parameter == "sides" => Ok(()),
        other => Err(eyre::eyre!("expected a missing argument for sides, found {other:?}")),
    }
}
