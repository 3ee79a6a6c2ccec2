//! Shared world state for interaction dispatch scenarios.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{Request, StatusCode};
use ed25519_dalek::{Signer, SigningKey};
use interchange::dispatch::{
    DispatchError, Engine, ErrorHandler, HandlerResult, RequestContext,
};
use interchange::interaction::InteractionResponse;
use interchange::signature::{SIGNATURE_HEADER, TIMESTAMP_HEADER};
use rstest::fixture;
use serde_json::Value;

/// Path the scenario router serves.
pub const ROUTE: &str = "/interactions";

const TIMESTAMP: &str = "1714564800";

/// Errors seen by the root error handler, in arrival order.
pub type Observed = Arc<Mutex<Vec<DispatchError>>>;

/// Root error handler that records errors and never replies.
pub struct SilentRoot(pub Observed);

#[async_trait]
impl ErrorHandler for SilentRoot {
    async fn handle_error(
        &self,
        _ctx: &RequestContext,
        error: &DispatchError,
    ) -> HandlerResult<Option<InteractionResponse>> {
        self.0
            .lock()
            .map_err(|err| err.to_string())?
            .push(error.clone());
        Ok(None)
    }
}

/// Scenario world for dispatch behaviour tests.
pub struct DispatchWorld {
    pub key: SigningKey,
    pub engine: Option<Arc<Engine>>,
    pub app: Option<Router>,
    pub observed: Observed,
    pub responses: Vec<(StatusCode, Bytes)>,
}

impl DispatchWorld {
    /// Creates a world with a fixed signing key and nothing dispatched.
    #[must_use]
    pub fn new() -> Self {
        Self {
            key: SigningKey::from_bytes(&[21; 32]),
            engine: None,
            app: None,
            observed: Arc::default(),
            responses: Vec::new(),
        }
    }

    /// Builds a signed `POST` carrying `body`.
    pub fn signed_request(&self, body: &Value) -> eyre::Result<Request<Body>> {
        let bytes = body.to_string().into_bytes();
        let mut message = TIMESTAMP.as_bytes().to_vec();
        message.extend_from_slice(&bytes);
        let signature = hex::encode(self.key.sign(&message).to_bytes());
        Ok(Request::builder()
            .method("POST")
            .uri(ROUTE)
            .header(SIGNATURE_HEADER, signature)
            .header(TIMESTAMP_HEADER, TIMESTAMP)
            .body(Body::from(bytes))?)
    }

    /// Returns the errors observed so far.
    pub fn observed(&self) -> eyre::Result<Vec<DispatchError>> {
        self.observed
            .lock()
            .map(|guard| guard.clone())
            .map_err(|err| eyre::eyre!("observed errors lock poisoned: {err}"))
    }
}

impl Default for DispatchWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> DispatchWorld {
    DispatchWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
