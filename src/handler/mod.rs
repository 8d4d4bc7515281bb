//! Keyed handler registry and its dispatch loop.
//!
//! An [`EventHandler`] maps a routing key to a callback. The dispatch
//! loop classifies each incoming event, looks up the bound callback under
//! a short-lived lock, and launches it as a detached task so a slow
//! callback never delays the next event.
//!
//! The handle is cheaply clonable; callers may keep a clone and re-bind
//! keys while dispatch is running.

use std::panic::catch_unwind;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;
use tokio::sync::mpsc;
use tracing::trace;
use tracing::warn;

use crate::metrics::EVENTS_DISPATCHED_TOTAL;
use crate::metrics::EVENTS_DROPPED_TOTAL;
use crate::Event;

/// Caller-supplied function invoked for each matching event.
///
/// Callbacks run detached: a panic inside one is caught and logged, never
/// surfaced to the monitor session. Ordering across callbacks is launch
/// order only; completion order is not guaranteed.
pub type Callback = Arc<dyn Fn(Event) + Send + Sync>;

type Classifier = Box<dyn Fn(&Event) -> String + Send + Sync>;

/// Routing key reported for catch-all dispatch in logs and metrics.
const CATCH_ALL_KEY: &str = "*";

enum Routing {
    /// Single-slot mode: every event goes to the one bound callback.
    CatchAll(RwLock<Option<Callback>>),

    /// Keyed mode: the classifier output selects the callback.
    Keyed {
        classifier: Classifier,
        handlers: DashMap<String, Callback>,
    },
}

#[derive(Clone)]
pub struct EventHandler {
    routing: Arc<Routing>,
}

impl EventHandler {
    /// Keyed registry. The classifier must be deterministic: the same
    /// event must always classify to the same key within one session.
    pub fn new(classifier: impl Fn(&Event) -> String + Send + Sync + 'static) -> Self {
        EventHandler {
            routing: Arc::new(Routing::Keyed {
                classifier: Box::new(classifier),
                handlers: DashMap::new(),
            }),
        }
    }

    /// Single-key routing mode: every event is delivered to `callback`,
    /// with no classification step involved.
    pub fn catch_all(callback: impl Fn(Event) + Send + Sync + 'static) -> Self {
        EventHandler {
            routing: Arc::new(Routing::CatchAll(RwLock::new(Some(Arc::new(callback))))),
        }
    }

    /// Bind `callback` to `key`, replacing any existing binding. In
    /// catch-all mode the single slot is replaced regardless of `key`.
    pub fn handle(
        &self,
        key: impl Into<String>,
        callback: impl Fn(Event) + Send + Sync + 'static,
    ) {
        match self.routing.as_ref() {
            Routing::CatchAll(slot) => {
                *slot.write() = Some(Arc::new(callback));
            }
            Routing::Keyed { handlers, .. } => {
                handlers.insert(key.into(), Arc::new(callback));
            }
        }
    }

    /// Remove the binding for `key`. Returns whether a binding existed.
    /// In catch-all mode this clears the single slot.
    pub fn unbind(
        &self,
        key: &str,
    ) -> bool {
        match self.routing.as_ref() {
            Routing::CatchAll(slot) => slot.write().take().is_some(),
            Routing::Keyed { handlers, .. } => handlers.remove(key).is_some(),
        }
    }

    /// Consume events from `rx` until the channel closes, launching one
    /// detached task per matched event. Events whose key has no binding
    /// are dropped silently.
    pub async fn watch(
        &self,
        mut rx: mpsc::Receiver<Event>,
    ) {
        while let Some(event) = rx.recv().await {
            let (key, callback) = self.resolve(&event);
            let Some(callback) = callback else {
                EVENTS_DROPPED_TOTAL.inc();
                trace!(
                    key = %key,
                    event_type = %event.resource_type,
                    action = %event.action,
                    "no handler bound, event dropped"
                );
                continue;
            };

            EVENTS_DISPATCHED_TOTAL.with_label_values(&[&key]).inc();
            trace!(
                key = %key,
                event_type = %event.resource_type,
                action = %event.action,
                "dispatching event"
            );

            let event_type = event.resource_type.clone();
            let action = event.action.clone();
            tokio::spawn(async move {
                if catch_unwind(AssertUnwindSafe(|| callback(event))).is_err() {
                    warn!(
                        event_type = %event_type,
                        action = %action,
                        "event callback panicked"
                    );
                }
            });
        }
    }

    // Lock is held for the lookup only, never across a callback.
    fn resolve(
        &self,
        event: &Event,
    ) -> (String, Option<Callback>) {
        match self.routing.as_ref() {
            Routing::CatchAll(slot) => (CATCH_ALL_KEY.to_string(), slot.read().clone()),
            Routing::Keyed {
                classifier,
                handlers,
            } => {
                let key = classifier(event);
                let callback = handlers.get(&key).map(|entry| entry.value().clone());
                (key, callback)
            }
        }
    }
}
