//! Keyed registry of short-lived component listeners.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use tokio::sync::oneshot;
use uuid::Uuid;

use super::{ListenerError, ListenerResult};
use crate::dispatch::{InteractionHandler, RequestContext};
use crate::interaction::{Interaction, InteractionResponse};

/// Listeners awaiting follow-up component interactions, keyed by custom ID.
///
/// At most one listener occupies a key. Each listener receives at most one
/// interaction: delivery removes the entry before the handler runs or the
/// consumer is woken. Expired entries are never delivered to and are
/// removed by [`Self::sweep`].
pub struct ComponentListenerRegistry {
    entries: RwLock<HashMap<String, ListenerEntry>>,
    clock: Arc<dyn Clock + Send + Sync>,
    default_ttl: Duration,
}

struct ListenerEntry {
    id: Uuid,
    expires_at: DateTime<Utc>,
    sink: ListenerSink,
}

enum ListenerSink {
    Handler(Arc<dyn InteractionHandler>),
    Channel(oneshot::Sender<Interaction>),
}

impl ComponentListenerRegistry {
    /// Creates an empty registry.
    ///
    /// `default_ttl` applies to registrations that do not name a lifetime.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock + Send + Sync>, default_ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
            default_ttl,
        }
    }

    /// Returns the lifetime given to listeners registered without one.
    #[must_use]
    pub const fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Installs a listener under `key`, replacing any existing one.
    ///
    /// With a handler, delivery invokes it and returns its response. Without
    /// one, the returned [`ComponentListener`] receives the interaction. A
    /// replaced listener's waiting consumer is woken with no interaction.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::Poisoned`] if the registry lock is poisoned.
    pub fn register(
        &self,
        key: impl Into<String>,
        ttl: Option<Duration>,
        handler: Option<Arc<dyn InteractionHandler>>,
    ) -> ListenerResult<ComponentListener> {
        let listener_key = key.into();
        let created_at = self.clock.utc();
        let lifetime = TimeDelta::from_std(ttl.unwrap_or(self.default_ttl)).unwrap_or(TimeDelta::MAX);
        let expires_at = created_at
            .checked_add_signed(lifetime)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let id = Uuid::new_v4();

        let (sink, receiver) = match handler {
            Some(handler) => (ListenerSink::Handler(handler), None),
            None => {
                let (sender, receiver) = oneshot::channel();
                (ListenerSink::Channel(sender), Some(receiver))
            }
        };

        let replaced = self.write()?.insert(
            listener_key.clone(),
            ListenerEntry {
                id,
                expires_at,
                sink,
            },
        );
        if let Some(previous) = replaced {
            tracing::debug!(key = %listener_key, listener = %previous.id, "replaced component listener");
        }

        Ok(ComponentListener {
            key: listener_key,
            id,
            created_at,
            expires_at,
            receiver,
        })
    }

    /// Installs a listener whose follow-up is awaited through the handle.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::Poisoned`] if the registry lock is poisoned.
    pub fn wait_for(
        &self,
        key: impl Into<String>,
        ttl: Option<Duration>,
    ) -> ListenerResult<ComponentListener> {
        self.register(key, ttl, None)
    }

    /// Installs a listener that invokes `handler` on delivery.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::Poisoned`] if the registry lock is poisoned.
    pub fn on_component(
        &self,
        key: impl Into<String>,
        ttl: Option<Duration>,
        handler: impl InteractionHandler + 'static,
    ) -> ListenerResult<ComponentListener> {
        self.register(key, ttl, Some(Arc::new(handler)))
    }

    /// Removes the listener if it still occupies its key.
    ///
    /// Cancelling twice, or after the key was reused, does nothing. Returns
    /// whether an entry was removed.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::Poisoned`] if the registry lock is poisoned.
    pub fn cancel(&self, listener: &ComponentListener) -> ListenerResult<bool> {
        let removed = {
            let mut entries = self.write()?;
            let owned = entries
                .get(listener.key())
                .is_some_and(|entry| entry.id == listener.id());
            if owned {
                entries.remove(listener.key())
            } else {
                None
            }
        };
        Ok(removed.is_some())
    }

    /// Removes whichever listener occupies `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::Poisoned`] if the registry lock is poisoned.
    pub fn cancel_key(&self, key: &str) -> ListenerResult<bool> {
        let removed = self.write()?.remove(key);
        Ok(removed.is_some())
    }

    /// Hands a follow-up interaction to the listener registered for `key`.
    ///
    /// The entry is claimed under the lock; the handler runs and the consumer
    /// is woken after the lock is released. A channel consumer is not awaited:
    /// the call returns `Ok(None)` once the interaction is handed over.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::NotFound`] if no live listener occupies the
    /// key, [`ListenerError::ConsumerGone`] if its consumer stopped waiting,
    /// and [`ListenerError::Handler`] if its handler fails.
    pub async fn deliver(
        &self,
        key: &str,
        ctx: &RequestContext,
    ) -> ListenerResult<Option<InteractionResponse>> {
        let now = self.clock.utc();
        let claimed = self.write()?.remove(key);
        let entry = claimed
            .filter(|entry| now <= entry.expires_at)
            .ok_or_else(|| ListenerError::NotFound {
                key: key.to_owned(),
            })?;

        match entry.sink {
            ListenerSink::Handler(handler) => handler
                .handle(ctx)
                .await
                .map_err(|error| ListenerError::Handler(Arc::from(error))),
            ListenerSink::Channel(sender) => sender
                .send(ctx.interaction().clone())
                .map(|()| None)
                .map_err(|_| ListenerError::ConsumerGone {
                    key: key.to_owned(),
                }),
        }
    }

    /// Removes every listener whose expiry has passed.
    ///
    /// Returns the number removed. Waiting consumers of removed listeners
    /// are woken with no interaction.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::Poisoned`] if the registry lock is poisoned.
    pub fn sweep(&self) -> ListenerResult<usize> {
        let now = self.clock.utc();
        let expired: Vec<ListenerEntry> = {
            let mut entries = self.write()?;
            let keys: Vec<String> = entries
                .iter()
                .filter(|(_, entry)| now > entry.expires_at)
                .map(|(key, _)| key.clone())
                .collect();
            keys.iter().filter_map(|key| entries.remove(key)).collect()
        };
        Ok(expired.len())
    }

    /// Returns whether a live listener occupies `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::Poisoned`] if the registry lock is poisoned.
    pub fn contains(&self, key: &str) -> ListenerResult<bool> {
        let now = self.clock.utc();
        Ok(self
            .read()?
            .get(key)
            .is_some_and(|entry| now <= entry.expires_at))
    }

    /// Returns the number of entries, including expired ones not yet swept.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::Poisoned`] if the registry lock is poisoned.
    pub fn len(&self) -> ListenerResult<usize> {
        Ok(self.read()?.len())
    }

    /// Returns whether the registry holds no entries.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::Poisoned`] if the registry lock is poisoned.
    pub fn is_empty(&self) -> ListenerResult<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> ListenerResult<RwLockReadGuard<'_, HashMap<String, ListenerEntry>>> {
        self.entries
            .read()
            .map_err(|err| ListenerError::Poisoned(err.to_string()))
    }

    fn write(&self) -> ListenerResult<RwLockWriteGuard<'_, HashMap<String, ListenerEntry>>> {
        self.entries
            .write()
            .map_err(|err| ListenerError::Poisoned(err.to_string()))
    }
}

impl fmt::Debug for ComponentListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentListenerRegistry")
            .field("listeners", &self.len().ok())
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}

/// Handle to a registered listener.
///
/// Listeners registered without a handler deliver their follow-up through
/// [`Self::recv`]. Dropping the handle does not unregister the listener;
/// use [`ComponentListenerRegistry::cancel`].
#[derive(Debug)]
pub struct ComponentListener {
    key: String,
    id: Uuid,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    receiver: Option<oneshot::Receiver<Interaction>>,
}

impl ComponentListener {
    /// Returns the component custom ID.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the identity of this registration.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Returns when the listener was registered.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the listener stops accepting deliveries.
    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns whether the handle can still receive an interaction.
    #[must_use]
    pub const fn is_waiting(&self) -> bool {
        self.receiver.is_some()
    }

    /// Waits for the follow-up interaction.
    ///
    /// Returns `None` if the listener was registered with a handler, or was
    /// cancelled, replaced, or swept before delivery. Only the first call can
    /// yield an interaction.
    pub async fn recv(&mut self) -> Option<Interaction> {
        let receiver = self.receiver.take()?;
        receiver.await.ok()
    }

    /// Waits for the follow-up interaction for at most `timeout`.
    ///
    /// The handle stops waiting once the timeout elapses, even if the
    /// registry entry is still live.
    pub async fn recv_timeout(&mut self, timeout: Duration) -> Option<Interaction> {
        tokio::time::timeout(timeout, self.recv())
            .await
            .ok()
            .flatten()
    }
}
