//! Signed requests through the router.

use std::sync::Arc;

use axum::http::StatusCode;
use interchange::command::CommandNode;
use interchange::dispatch::{Engine, MetricsSnapshot};
use interchange::http::{AppState, router};
use rstest::rstest;
use serde_json::json;
use tower::ServiceExt;

use super::helpers::{ROUTE, Reply, Signer25519, body_json, content};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ping_then_command_then_unknown_command() {
    let signer = Signer25519::new(11);
    let mut builder = Engine::builder();
    builder.must_add_command(CommandNode::new("echo", "Echoes").with_handler(Reply("echoed")));
    let engine = Arc::new(builder.build().expect("engine"));
    let app = router(AppState::new(Arc::clone(&engine), signer.trusted_keys()), ROUTE);

    let ping = app
        .clone()
        .oneshot(signer.request(&json!({"id": "1", "application_id": "2", "type": 1})))
        .await
        .expect("ping");
    assert_eq!(ping.status(), StatusCode::OK);
    assert_eq!(body_json(ping).await, Some(json!({"type": 1})));

    let echo = app
        .clone()
        .oneshot(signer.request(
            &json!({"id": "3", "application_id": "2", "type": 2, "data": {"name": "ECHO"}}),
        ))
        .await
        .expect("echo");
    assert_eq!(echo.status(), StatusCode::OK);
    assert_eq!(content(body_json(echo).await.as_ref()), Some("echoed"));

    let unknown = app
        .oneshot(signer.request(
            &json!({"id": "4", "application_id": "2", "type": 2, "data": {"name": "nope"}}),
        ))
        .await
        .expect("unknown");
    assert_eq!(unknown.status(), StatusCode::NO_CONTENT);
    assert_eq!(body_json(unknown).await, None);

    assert_eq!(
        engine.metrics().snapshot(),
        MetricsSnapshot {
            total: 2,
            successful: 1,
            failed: 1,
        }
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn requests_signed_by_an_untrusted_key_are_rejected() {
    let trusted = Signer25519::new(11);
    let stranger = Signer25519::new(12);
    let engine = Arc::new(Engine::builder().build().expect("engine"));
    let app = router(AppState::new(engine, trusted.trusted_keys()), ROUTE);

    let response = app
        .oneshot(stranger.request(&json!({"id": "1", "application_id": "2", "type": 1})))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
