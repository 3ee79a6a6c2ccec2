//! Shared fixtures for listener tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::dispatch::{HandlerResult, InteractionHandler, RequestContext};
use crate::interaction::{
    Interaction, InteractionData, InteractionResponse, InteractionType, Snowflake,
};
use crate::listener::ComponentListenerRegistry;

pub const TTL: Duration = Duration::from_secs(60);

/// Clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new() -> Arc<Self> {
        let start = Utc
            .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .single()
            .expect("valid start time");
        Arc::new(Self {
            now: Mutex::new(start),
        })
    }

    pub fn advance(&self, delta: TimeDelta) {
        let mut now = self.now.lock().expect("clock lock");
        *now += delta;
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock")
    }
}

pub fn registry(clock: &Arc<ManualClock>) -> Arc<ComponentListenerRegistry> {
    let shared: Arc<dyn Clock + Send + Sync> = Arc::clone(clock) as Arc<dyn Clock + Send + Sync>;
    Arc::new(ComponentListenerRegistry::new(shared, TTL))
}

pub fn component(custom_id: &str) -> Interaction {
    Interaction::new(
        Snowflake::new(700),
        Snowflake::new(1),
        InteractionType::MessageComponent,
    )
    .with_data(InteractionData::component(custom_id))
}

pub fn context(
    registry: &Arc<ComponentListenerRegistry>,
    custom_id: &str,
) -> RequestContext {
    RequestContext::new(component(custom_id), Arc::clone(registry)).with_listener_key(custom_id)
}

/// Replies with fixed content.
pub struct Reply(pub &'static str);

#[async_trait]
impl InteractionHandler for Reply {
    async fn handle(&self, _ctx: &RequestContext) -> HandlerResult<Option<InteractionResponse>> {
        Ok(Some(InteractionResponse::message(self.0)))
    }
}

/// Always fails.
pub struct Refuse;

#[async_trait]
impl InteractionHandler for Refuse {
    async fn handle(&self, _ctx: &RequestContext) -> HandlerResult<Option<InteractionResponse>> {
        Err("component rejected".into())
    }
}
