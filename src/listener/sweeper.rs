//! Background removal of expired listeners.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::ComponentListenerRegistry;

const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(10);

/// Spawns a task that sweeps `registry` every `interval`.
///
/// The task exits when `shutdown` becomes `true` or its sender is dropped.
pub fn spawn_sweeper(
    registry: Arc<ComponentListenerRegistry>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval.max(MIN_SWEEP_INTERVAL));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;

        while !*shutdown.borrow() {
            tokio::select! {
                _ = ticker.tick() => match registry.sweep() {
                    Ok(0) => {}
                    Ok(removed) => tracing::debug!(removed, "swept expired component listeners"),
                    Err(error) => tracing::warn!(%error, "component listener sweep failed"),
                },
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }
        tracing::debug!("component listener sweeper stopped");
    })
}
