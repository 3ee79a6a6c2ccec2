//! Unit tests for notification sinks.

use chrono::{DateTime, TimeZone, Utc};
use rstest::{fixture, rstest};

use super::{
    InMemoryNotificationSink, Notification, NotificationLevel, NotificationSink,
    TracingNotificationSink,
};

#[fixture]
fn started_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

#[rstest]
#[case::info(NotificationLevel::Info, 16_701_571)]
#[case::warning(NotificationLevel::Warning, 16_760_839)]
#[case::danger(NotificationLevel::Danger, 14_431_557)]
fn levels_map_to_accent_colours(#[case] level: NotificationLevel, #[case] expected: u32) {
    assert_eq!(level.colour(), expected);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn in_memory_sink_keeps_publication_order(started_at: DateTime<Utc>) {
    let sink = InMemoryNotificationSink::new();
    let starting = Notification::new("Starting", "binding", NotificationLevel::Info, started_at)
        .with_footer("node-1");
    let stopping = Notification::new("Stopping", "ctrl-c", NotificationLevel::Danger, started_at);

    sink.publish(&starting).await.expect("publish starting");
    sink.publish(&stopping).await.expect("publish stopping");

    let published = sink.published().expect("published");
    assert_eq!(published, vec![starting, stopping]);
    assert_eq!(
        published.first().and_then(|notice| notice.footer.as_deref()),
        Some("node-1")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tracing_sink_always_accepts(started_at: DateTime<Utc>) {
    let notice = Notification::new("Degraded", "slow lookups", NotificationLevel::Warning, started_at);

    TracingNotificationSink
        .publish(&notice)
        .await
        .expect("tracing sink never fails");
}
