//! Shared fixtures for the end-to-end tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::http::Request;
use axum::response::Response;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use ed25519_dalek::{Signer, SigningKey};
use interchange::dispatch::{
    DispatchError, ErrorHandler, HandlerResult, InteractionHandler, RequestContext,
};
use interchange::interaction::InteractionResponse;
use interchange::signature::{SIGNATURE_HEADER, TIMESTAMP_HEADER, TrustedKeys};
use mockable::Clock;
use serde_json::Value;

/// Path the test router serves.
pub const ROUTE: &str = "/interactions";

const TIMESTAMP: &str = "1714564800";

/// Signs request bodies with a fixed key.
pub struct Signer25519 {
    key: SigningKey,
}

impl Signer25519 {
    /// Creates a signer from a repeated seed byte.
    pub fn new(seed: u8) -> Self {
        Self {
            key: SigningKey::from_bytes(&[seed; 32]),
        }
    }

    /// Returns the key set trusting this signer.
    pub fn trusted_keys(&self) -> TrustedKeys {
        TrustedKeys::new(vec![self.key.verifying_key()])
    }

    /// Builds a signed `POST` carrying `body`.
    pub fn request(&self, body: &Value) -> Request<Body> {
        let bytes = body.to_string().into_bytes();
        let mut message = TIMESTAMP.as_bytes().to_vec();
        message.extend_from_slice(&bytes);
        let signature = hex::encode(self.key.sign(&message).to_bytes());
        Request::builder()
            .method("POST")
            .uri(ROUTE)
            .header(SIGNATURE_HEADER, signature)
            .header(TIMESTAMP_HEADER, TIMESTAMP)
            .header("content-type", "application/json")
            .body(Body::from(bytes))
            .expect("request")
    }
}

/// Reads a response body, returning `None` when it is empty.
pub async fn body_json(response: Response) -> Option<Value> {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    if bytes.is_empty() {
        None
    } else {
        Some(serde_json::from_slice(&bytes).expect("json body"))
    }
}

/// Returns the message content of a JSON response body.
pub fn content(body: Option<&Value>) -> Option<&str> {
    body.and_then(|value| value.pointer("/data/content"))
        .and_then(Value::as_str)
}

/// Clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Creates a clock fixed at 2024-05-01 12:00 UTC.
    pub fn new() -> Arc<Self> {
        let start = Utc
            .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .single()
            .expect("valid start time");
        Arc::new(Self {
            now: Mutex::new(start),
        })
    }

    /// Moves the clock forward.
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

/// Ordered record of which test doubles ran.
#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    /// Appends an entry.
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().expect("journal lock").push(entry.into());
    }

    /// Returns every entry so far.
    pub fn entries(&self) -> Vec<String> {
        self.0.lock().expect("journal lock").clone()
    }
}

/// Replies with fixed content.
pub struct Reply(pub &'static str);

#[async_trait]
impl InteractionHandler for Reply {
    async fn handle(&self, _ctx: &RequestContext) -> HandlerResult<Option<InteractionResponse>> {
        Ok(Some(InteractionResponse::message(self.0)))
    }
}

/// Fails with fixed text.
pub struct Fail(pub &'static str);

#[async_trait]
impl InteractionHandler for Fail {
    async fn handle(&self, _ctx: &RequestContext) -> HandlerResult<Option<InteractionResponse>> {
        Err(self.0.into())
    }
}

/// Records the errors it observes and optionally replies.
pub struct Observe {
    label: &'static str,
    journal: Journal,
    reply: Option<&'static str>,
}

impl Observe {
    /// Creates a silent observer.
    pub fn new(label: &'static str, journal: &Journal) -> Self {
        Self {
            label,
            journal: journal.clone(),
            reply: None,
        }
    }

    /// Makes the observer reply with `reply`.
    pub fn replying(mut self, reply: &'static str) -> Self {
        self.reply = Some(reply);
        self
    }
}

#[async_trait]
impl ErrorHandler for Observe {
    async fn handle_error(
        &self,
        _ctx: &RequestContext,
        error: &DispatchError,
    ) -> HandlerResult<Option<InteractionResponse>> {
        self.journal.push(format!("{}: {error}", self.label));
        Ok(self.reply.map(InteractionResponse::message))
    }
}
