//! The single signed `POST` route that feeds the engine.
//!
//! Each request is verified against the trusted keys before its body is
//! decoded. A dispatch that computes a response is answered with that
//! response as JSON; one that does not, such as a deferred follow-up, is
//! answered with `204 No Content`.

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::sync::watch;

use crate::dispatch::Engine;
use crate::interaction::Interaction;
use crate::signature::{SIGNATURE_HEADER, TIMESTAMP_HEADER, TrustedKeys, verify};

/// State shared by every request task.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The dispatch engine.
    pub engine: Arc<Engine>,
    /// Keys whose signatures are accepted.
    pub keys: Arc<TrustedKeys>,
}

impl AppState {
    /// Bundles an engine with its trusted keys.
    #[must_use]
    pub fn new(engine: Arc<Engine>, keys: TrustedKeys) -> Self {
        Self {
            engine,
            keys: Arc::new(keys),
        }
    }
}

/// Builds the router serving interactions at `route`.
///
/// Methods other than `POST` are answered with `405 Method Not Allowed`.
#[must_use]
pub fn router(state: AppState, route: &str) -> Router {
    Router::new()
        .route(route, post(receive_interaction))
        .with_state(state)
}

/// Serves `router` on `listener` until `shutdown` flips to `true` or its
/// sender is dropped. In-flight requests are allowed to finish.
///
/// # Errors
///
/// Returns the I/O error that stopped the server.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    mut shutdown: watch::Receiver<bool>,
) -> std::io::Result<()> {
    if let Ok(address) = listener.local_addr() {
        tracing::info!(%address, "serving interactions");
    }
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            while !*shutdown.borrow() {
                if shutdown.changed().await.is_err() {
                    break;
                }
            }
        })
        .await
}

async fn receive_interaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let signature = header_text(&headers, SIGNATURE_HEADER);
    let timestamp = header_text(&headers, TIMESTAMP_HEADER);
    let verified = signature
        .zip(timestamp)
        .is_some_and(|(sig, ts)| verify(sig, ts, &body, &state.keys));
    if !verified {
        tracing::warn!(
            has_signature = signature.is_some(),
            has_timestamp = timestamp.is_some(),
            "rejected request with invalid signature"
        );
        return (StatusCode::UNAUTHORIZED, "invalid request signature").into_response();
    }

    let interaction: Interaction = match serde_json::from_slice(&body) {
        Ok(interaction) => interaction,
        Err(error) => {
            tracing::warn!(%error, "failed to decode interaction body");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let id = interaction.id;
    let (response, _) = state.engine.dispatch(interaction).await.into_parts();
    if let Some(reply) = response {
        Json(reply).into_response()
    } else {
        tracing::warn!(interaction = %id, "no response computed");
        StatusCode::NO_CONTENT.into_response()
    }
}

fn header_text<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
}
