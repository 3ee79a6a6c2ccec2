//! Error handler ordering across a root, group, and command chain.

use std::sync::Arc;

use interchange::command::{CommandNode, NodeId};
use interchange::dispatch::Engine;
use interchange::http::{AppState, router};
use rstest::rstest;
use serde_json::json;
use tower::ServiceExt;

use super::helpers::{Fail, Journal, Observe, ROUTE, Signer25519, body_json, content};

#[rstest]
#[case::command_replies(Some("retry later"), "retry later")]
#[case::command_silent(None, "something went wrong")]
#[tokio::test(flavor = "multi_thread")]
async fn root_runs_first_and_the_deepest_reply_wins(
    #[case] command_reply: Option<&'static str>,
    #[case] expected: &str,
) {
    let journal = Journal::default();
    let signer = Signer25519::new(3);
    let mut command_observer = Observe::new("command", &journal);
    if let Some(reply) = command_reply {
        command_observer = command_observer.replying(reply);
    }

    let mut builder = Engine::builder()
        .with_error_handler(Observe::new("root", &journal).replying("something went wrong"));
    let tree = builder.tree_mut();
    let group = tree.must_add_command(
        NodeId::ROOT,
        CommandNode::new("backup", "Backups").with_error_handler(Observe::new("group", &journal)),
    );
    tree.must_add_command(
        group,
        CommandNode::new("run", "Runs a backup")
            .with_error_handler(command_observer)
            .with_handler(Fail("volume offline")),
    );
    let engine = Arc::new(builder.build().expect("engine"));
    let app = router(AppState::new(engine, signer.trusted_keys()), ROUTE);

    let response = app
        .oneshot(signer.request(&json!({
            "id": "9",
            "application_id": "2",
            "type": 2,
            "data": {"name": "backup", "options": [{"name": "run", "type": 1}]}
        })))
        .await
        .expect("response");

    assert_eq!(content(body_json(response).await.as_ref()), Some(expected));
    assert_eq!(
        journal.entries(),
        vec![
            "root: handler failed: volume offline",
            "group: handler failed: volume offline",
            "command: handler failed: volume offline",
        ]
    );
}
