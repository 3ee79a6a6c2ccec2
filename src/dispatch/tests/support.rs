//! Handlers and fixtures shared by the dispatch tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::dispatch::{
    Check, DispatchError, ErrorHandler, HandlerResult, InteractionHandler, RequestContext,
};
use crate::interaction::{
    DataOption, Interaction, InteractionData, InteractionResponse, InteractionType, OptionType,
    Snowflake,
};

/// Ordered record of which test doubles ran.
#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().expect("journal lock").push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().expect("journal lock").clone()
    }
}

/// Replies with fixed content.
pub struct Respond(pub &'static str);

#[async_trait]
impl InteractionHandler for Respond {
    async fn handle(&self, _ctx: &RequestContext) -> HandlerResult<Option<InteractionResponse>> {
        Ok(Some(InteractionResponse::message(self.0)))
    }
}

/// Returns an error with fixed text.
pub struct Fail(pub &'static str);

#[async_trait]
impl InteractionHandler for Fail {
    async fn handle(&self, _ctx: &RequestContext) -> HandlerResult<Option<InteractionResponse>> {
        Err(self.0.into())
    }
}

/// Panics with fixed text.
pub struct Explode(pub &'static str);

#[async_trait]
impl InteractionHandler for Explode {
    async fn handle(&self, _ctx: &RequestContext) -> HandlerResult<Option<InteractionResponse>> {
        panic!("{}", self.0)
    }
}

/// Records the error it sees and optionally replies.
pub struct RecordError {
    pub label: &'static str,
    pub journal: Journal,
    pub reply: Option<&'static str>,
}

impl RecordError {
    pub fn new(label: &'static str, journal: &Journal) -> Self {
        Self {
            label,
            journal: journal.clone(),
            reply: None,
        }
    }

    pub fn replying(mut self, reply: &'static str) -> Self {
        self.reply = Some(reply);
        self
    }
}

#[async_trait]
impl ErrorHandler for RecordError {
    async fn handle_error(
        &self,
        _ctx: &RequestContext,
        error: &DispatchError,
    ) -> HandlerResult<Option<InteractionResponse>> {
        self.journal.push(format!("{}: {error}", self.label));
        Ok(self.reply.map(InteractionResponse::message))
    }
}

/// Records that it ran and returns a fixed verdict.
pub struct RecordCheck {
    pub label: &'static str,
    pub journal: Journal,
    pub verdict: bool,
}

impl RecordCheck {
    pub fn new(label: &'static str, journal: &Journal, verdict: bool) -> Self {
        Self {
            label,
            journal: journal.clone(),
            verdict,
        }
    }
}

#[async_trait]
impl Check for RecordCheck {
    async fn can_run(&self, _ctx: &RequestContext) -> HandlerResult<bool> {
        self.journal.push(self.label);
        Ok(self.verdict)
    }
}

/// Builds an application command interaction.
pub fn command(name: &str, options: Vec<DataOption>) -> Interaction {
    let data = options
        .into_iter()
        .fold(InteractionData::command(name), InteractionData::with_option);
    Interaction::new(
        Snowflake::new(900),
        Snowflake::new(1),
        InteractionType::ApplicationCommand,
    )
    .with_data(data)
}

/// Builds an autocomplete interaction.
pub fn autocomplete(name: &str, options: Vec<DataOption>) -> Interaction {
    let mut interaction = command(name, options);
    interaction.kind = InteractionType::Autocomplete;
    interaction
}

/// Builds a component interaction with selected values.
pub fn component(custom_id: &str, values: &[&str]) -> Interaction {
    let mut data = InteractionData::component(custom_id);
    data.values = values.iter().map(|value| (*value).to_owned()).collect();
    Interaction::new(
        Snowflake::new(901),
        Snowflake::new(1),
        InteractionType::MessageComponent,
    )
    .with_data(data)
}

pub fn string_option(name: &str, value: &str) -> DataOption {
    DataOption::value(name, OptionType::String, Value::from(value))
}

pub fn integer_option(name: &str, value: Value) -> DataOption {
    DataOption::value(name, OptionType::Integer, value)
}

pub fn subcommand(name: &str, options: Vec<DataOption>) -> DataOption {
    DataOption::group(name, OptionType::SubCommand, options)
}
