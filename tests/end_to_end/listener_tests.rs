//! Follow-up delivery, replacement, and expiry through the engine.

use std::sync::Arc;
use std::time::Duration;

use chrono::TimeDelta;
use interchange::dispatch::{DispatchError, Engine};
use interchange::interaction::{
    Interaction, InteractionData, InteractionResponse, InteractionType, Snowflake,
};
use mockable::Clock;
use rstest::rstest;

use super::helpers::{ManualClock, Reply};

fn engine(clock: &Arc<ManualClock>) -> Engine {
    let shared: Arc<dyn Clock + Send + Sync> = Arc::clone(clock) as Arc<dyn Clock + Send + Sync>;
    Engine::builder()
        .with_clock(shared)
        .with_listener_ttl(Duration::from_secs(120))
        .build()
        .expect("engine")
}

fn select(custom_id: &str, values: &[&str]) -> Interaction {
    let mut data = InteractionData::component(custom_id);
    data.values = values.iter().map(|value| (*value).to_owned()).collect();
    Interaction::new(
        Snowflake::new(55),
        Snowflake::new(2),
        InteractionType::MessageComponent,
    )
    .with_data(data)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn replacing_a_waiting_listener_releases_the_first_consumer() {
    let clock = ManualClock::new();
    let engine = engine(&clock);
    let mut first = engine.listeners().wait_for("colour", None).expect("first");
    let mut second = engine.listeners().wait_for("colour", None).expect("second");

    assert!(first.recv_timeout(Duration::from_secs(1)).await.is_none());

    let outcome = engine.dispatch(select("colour", &["red", "blue"])).await;

    assert!(outcome.is_success());
    assert!(outcome.response().is_none());
    let delivered = second
        .recv_timeout(Duration::from_secs(1))
        .await
        .expect("second consumer receives");
    assert_eq!(
        delivered.data.map(|data| data.values),
        Some(vec!["red".to_owned(), "blue".to_owned()])
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn handler_listeners_answer_once() {
    let clock = ManualClock::new();
    let engine = engine(&clock);
    engine
        .listeners()
        .on_component("vote", None, Reply("counted"))
        .expect("listener");

    let first = engine.dispatch(select("vote", &[])).await;
    let second = engine.dispatch(select("vote", &[])).await;

    assert_eq!(
        first.response().and_then(InteractionResponse::content),
        Some("counted")
    );
    assert!(matches!(
        second.error(),
        Some(DispatchError::ComponentListenerNotFound { key }) if key == "vote"
    ));
}

#[rstest]
#[case::inside_the_window(120, true)]
#[case::past_the_window(121, false)]
#[tokio::test(flavor = "multi_thread")]
async fn listeners_expire_after_their_lifetime(#[case] elapsed: i64, #[case] delivered: bool) {
    let clock = ManualClock::new();
    let engine = engine(&clock);
    engine
        .listeners()
        .on_component("confirm", None, Reply("confirmed"))
        .expect("listener");

    clock.advance(TimeDelta::seconds(elapsed));
    let outcome = engine.dispatch(select("confirm", &[])).await;

    assert_eq!(outcome.is_success(), delivered);
    assert_eq!(engine.listeners().sweep().expect("sweep"), 0);
}
