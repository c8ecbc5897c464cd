//! # Emitter: the subscription registry and dispatch loop.
//!
//! The [`Emitter`] owns a [`Registry`] (event name → ordered handlers) behind a
//! read/write lock and implements subscribe, unsubscribe, one-shot subscribe,
//! emit, clear and count queries.
//!
//! ## Dispatch
//! ```text
//! emit::<E>(&payload)
//!   ├─► read lock ─► snapshot = registry[E::NAME].clone() ─► unlock
//!   ├─► payload type check (every entry must expect E::Payload)
//!   └─► for (pos, entry) in snapshot (registration order):
//!         ├─ one-shot? claim latch (skip if already fired) ─► write lock ─► remove ─► unlock
//!         ├─ entry.handler.call(&payload)
//!         └─ Err ─► FailFast: return EmitError::Handler{pos}
//!                   Collect:  remember, continue ─► EmitError::Aggregate at the end
//! ```
//!
//! ## Rules
//! - **Synchronous**: handlers run on the caller's thread, in registration order.
//! - **Snapshot**: mutations made while an emit is running (by handlers or other
//!   threads) apply to the next emit. Removed handlers still run in the current
//!   one; one-shot handlers never run twice.
//! - **Re-entrant**: no lock is held while a handler runs; handlers may call back
//!   into the emitter.
//! - **No isolation**: handler errors are returned, never swallowed; panics unwind
//!   through `emit`.
//! - **Independent instances**: every `Emitter::new()` has its own registry;
//!   clones share it.
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use eventvisor::{event, Emitter, Handler};
//!
//! event!(Ping => "ping", u32);
//!
//! let emitter = Emitter::new();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let sink = Arc::clone(&seen);
//! let h = Handler::new(move |n: &u32| sink.lock().unwrap().push(*n));
//!
//! let _sub = emitter.subscribe::<Ping>(h.clone());
//! emitter.emit::<Ping>(&42).unwrap();
//!
//! emitter.unsubscribe::<Ping>(&h);
//! emitter.emit::<Ping>(&43).unwrap();
//!
//! assert_eq!(*seen.lock().unwrap(), vec![42]);
//! ```

use std::any::TypeId;
use std::fmt;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, trace, warn};

use crate::core::builder::EmitterBuilder;
use crate::core::config::EmitterConfig;
use crate::core::registry::{Entry, EntryId, Registry};
use crate::core::subscription::Subscription;
use crate::error::{EmitError, HandlerError};
use crate::events::{Event, EventName};
use crate::handlers::{self, EventStream, Handler, HandlerOutput, Listen};

/// State shared by all clones of one emitter.
pub(crate) struct Shared {
    registry: RwLock<Registry>,
    cfg: EmitterConfig,
}

impl Shared {
    pub(crate) fn remove_entry(&self, event: &EventName, id: EntryId) -> bool {
        let removed = self.registry.write().remove_id(event.as_str(), id);
        if removed {
            debug!(event = %event, id, "subscription cancelled");
        }
        removed
    }

    pub(crate) fn contains_entry(&self, event: &EventName, id: EntryId) -> bool {
        self.registry.read().contains(event.as_str(), id)
    }
}

/// In-process publish/subscribe registry.
///
/// Cheap to clone; clones share the same registry. See the [module docs](self)
/// for dispatch semantics.
#[derive(Clone)]
pub struct Emitter {
    shared: Arc<Shared>,
}

impl Emitter {
    /// Creates an empty emitter with default configuration.
    pub fn new() -> Self {
        Self::with_config(EmitterConfig::default())
    }

    /// Creates an empty emitter with the given configuration.
    pub fn with_config(cfg: EmitterConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                registry: RwLock::new(Registry::default()),
                cfg,
            }),
        }
    }

    /// Returns a builder for an emitter with custom settings.
    pub fn builder() -> EmitterBuilder {
        EmitterBuilder::new(EmitterConfig::default())
    }

    /// Configuration this emitter was built with.
    pub fn config(&self) -> &EmitterConfig {
        &self.shared.cfg
    }

    // ---------------------------
    // Subscribe
    // ---------------------------

    /// Appends `handler` to the listeners of `E`.
    ///
    /// The same handler may be subscribed several times; each call creates an
    /// independent registration. The returned [`Subscription`] removes exactly
    /// this registration.
    pub fn subscribe<E: Event>(&self, handler: Handler<E::Payload>) -> Subscription {
        let (id, count) = {
            let mut registry = self.shared.registry.write();
            let id = registry.next_id();
            let count = registry.insert(E::name(), Entry::persistent(id, handler));
            (id, count)
        };
        debug!(event = E::NAME, id, listeners = count, "handler subscribed");
        self.check_threshold(E::NAME, count);
        Subscription::new(&self.shared, E::name(), id, None)
    }

    /// Subscribes a closure. Shorthand for `subscribe::<E>(Handler::new(f))`.
    ///
    /// The closure gets a fresh identity, so it can only be removed through the
    /// returned [`Subscription`] (or `clear`).
    pub fn on<E, F, R>(&self, f: F) -> Subscription
    where
        E: Event,
        F: Fn(&E::Payload) -> R + Send + Sync + 'static,
        R: HandlerOutput,
    {
        self.subscribe::<E>(Handler::new(f))
    }

    /// Subscribes a struct-based [`Listen`] implementation.
    ///
    /// `unsubscribe_listener` with the same `Arc` removes it again.
    pub fn subscribe_listener<E, L>(&self, listener: Arc<L>) -> Subscription
    where
        E: Event,
        L: Listen<E::Payload>,
    {
        self.subscribe::<E>(Handler::from_listener(listener))
    }

    /// Registers `handler` to run on the next emit of `E` only.
    ///
    /// The registration removes itself before `handler` is invoked. It is a
    /// distinct registration from any persistent subscription of the same
    /// handler: `unsubscribe::<E>(&handler)` does not cancel it, the returned
    /// [`Subscription`] does.
    pub fn once<E: Event>(&self, handler: Handler<E::Payload>) -> Subscription {
        let latch = Arc::new(AtomicBool::new(false));
        let (id, count) = {
            let mut registry = self.shared.registry.write();
            let id = registry.next_id();
            let entry = Entry::one_shot(id, handler, Arc::clone(&latch));
            let count = registry.insert(E::name(), entry);
            (id, count)
        };
        debug!(event = E::NAME, id, listeners = count, "one-shot handler subscribed");
        self.check_threshold(E::NAME, count);
        Subscription::new(&self.shared, E::name(), id, Some(latch))
    }

    /// Bridges `E` into async code.
    ///
    /// Every payload is cloned into the returned [`EventStream`]. The stream ends
    /// once the returned [`Subscription`] is cancelled or `E` is cleared.
    pub fn stream<E>(&self) -> (EventStream<E::Payload>, Subscription)
    where
        E: Event,
        E::Payload: Clone,
    {
        let (handler, stream) = handlers::channel::<E::Payload>();
        let sub = self.subscribe::<E>(handler);
        (stream, sub)
    }

    // ---------------------------
    // Unsubscribe / clear
    // ---------------------------

    /// Removes every registration of `handler` under `E`.
    ///
    /// Silent no-op if nothing matches. Returns the number of removed registrations.
    pub fn unsubscribe<E: Event>(&self, handler: &Handler<E::Payload>) -> usize {
        let removed = self
            .shared
            .registry
            .write()
            .remove_identity(E::NAME, handler.identity());
        if removed > 0 {
            debug!(event = E::NAME, handler = handler.name(), removed, "handler unsubscribed");
        }
        removed
    }

    /// Removes every registration of `listener` under `E`.
    pub fn unsubscribe_listener<E, L>(&self, listener: &Arc<L>) -> usize
    where
        E: Event,
        L: Listen<E::Payload>,
    {
        let identity = Arc::as_ptr(listener) as *const () as usize;
        let removed = self
            .shared
            .registry
            .write()
            .remove_identity(E::NAME, identity);
        if removed > 0 {
            debug!(event = E::NAME, listener = listener.name(), removed, "listener unsubscribed");
        }
        removed
    }

    /// Drops every handler of `E`.
    pub fn clear<E: Event>(&self) {
        self.clear_named(E::NAME);
    }

    /// Drops every handler registered under `name`.
    pub fn clear_named(&self, name: &str) {
        let removed = self.shared.registry.write().clear(name);
        if removed > 0 {
            debug!(event = name, removed, "event cleared");
        }
    }

    /// Drops every handler of every event.
    pub fn clear_all(&self) {
        let removed = self.shared.registry.write().clear_all();
        if removed > 0 {
            debug!(removed, "all events cleared");
        }
    }

    // ---------------------------
    // Emit
    // ---------------------------

    /// Synchronously invokes every handler of `E` with `payload`, in registration order.
    ///
    /// Returns `Ok(())` when there are no handlers.
    ///
    /// # Errors
    /// - [`EmitError::Handler`]: a handler failed (fail-fast policy); later handlers were skipped.
    /// - [`EmitError::Aggregate`]: one or more handlers failed (collect policy).
    /// - [`EmitError::PayloadMismatch`]: another event type registered a
    ///   listener under the same name with a different payload; nothing was invoked.
    pub fn emit<E: Event>(&self, payload: &E::Payload) -> Result<(), EmitError> {
        let snapshot = self.shared.registry.read().snapshot(E::NAME);
        trace!(event = E::NAME, listeners = snapshot.len(), "emit");
        if snapshot.is_empty() {
            return Ok(());
        }

        let expected = TypeId::of::<E::Payload>();
        if let Some(other) = snapshot.iter().find(|e| e.payload != expected) {
            return Err(EmitError::PayloadMismatch {
                event: E::NAME.to_string(),
                expected: other.payload_name,
                found: std::any::type_name::<E::Payload>(),
            });
        }

        let mut failures: Vec<(usize, HandlerError)> = Vec::new();
        for (position, entry) in snapshot.iter().enumerate() {
            if !entry.claim() {
                continue;
            }
            if entry.once.is_some() {
                self.shared.registry.write().remove_id(E::NAME, entry.id);
            }
            let Some(handler) = entry.handler::<E::Payload>() else {
                continue;
            };

            if let Err(err) = handler.call(payload) {
                debug!(
                    event = E::NAME,
                    handler = %entry.name,
                    position,
                    error = %err,
                    "handler failed"
                );
                if self.shared.cfg.fail_fast() {
                    return Err(EmitError::Handler {
                        event: E::NAME.to_string(),
                        position,
                        source: err,
                    });
                }
                failures.push((position, err));
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(EmitError::Aggregate {
                event: E::NAME.to_string(),
                failures,
            })
        }
    }

    /// Emits a payload-less event.
    pub fn notify<E>(&self) -> Result<(), EmitError>
    where
        E: Event<Payload = ()>,
    {
        self.emit::<E>(&())
    }

    // ---------------------------
    // Queries
    // ---------------------------

    /// Number of registrations for `E` (duplicates and pending one-shots included).
    pub fn listener_count<E: Event>(&self) -> usize {
        self.listener_count_named(E::NAME)
    }

    /// Number of registrations under `name`; `0` for unknown names.
    pub fn listener_count_named(&self, name: &str) -> usize {
        self.shared.registry.read().count(name)
    }

    /// Returns `true` if `E` has at least one registration.
    pub fn has_listeners<E: Event>(&self) -> bool {
        self.listener_count::<E>() > 0
    }

    /// Total number of registrations across all events.
    pub fn total_listeners(&self) -> usize {
        self.shared.registry.read().total()
    }

    /// Sorted names of the events that currently have listeners.
    pub fn event_names(&self) -> Vec<EventName> {
        self.shared.registry.read().names()
    }

    /// Returns `true` if no handler is registered at all.
    pub fn is_empty(&self) -> bool {
        self.shared.registry.read().is_empty()
    }

    /// Logs once when `count` crosses the configured threshold.
    fn check_threshold(&self, event: &'static str, count: usize) {
        let cfg = &self.shared.cfg;
        if cfg.crosses_threshold(count) {
            warn!(
                event,
                listeners = count,
                limit = cfg.warn_threshold,
                "listener count exceeds threshold; possible subscription leak"
            );
        }
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.shared.registry.read();
        let mut map = f.debug_map();
        for name in registry.names() {
            let count = registry.count(name.as_str());
            map.entry(&name, &count);
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ErrorPolicy;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    crate::event!(Ping => "ping", u32);
    crate::event!(Pong => "pong", u32);
    crate::event!(Ready => "ready");
    crate::event!(PingText => "ping", String);

    fn recorder() -> (Handler<u32>, Arc<Mutex<Vec<u32>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let h = Handler::new(move |n: &u32| sink.lock().unwrap().push(*n));
        (h, seen)
    }

    #[test]
    fn emit_without_listeners_is_noop() {
        let emitter = Emitter::new();
        assert!(emitter.emit::<Ping>(&1).is_ok());
        assert_eq!(emitter.listener_count::<Ping>(), 0);
        assert!(emitter.is_empty());
    }

    #[test]
    fn handlers_run_in_registration_order() {
        let emitter = Emitter::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for tag in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            let _ = emitter.on::<Ping, _, _>(move |n| order.lock().unwrap().push((tag, *n)));
        }
        emitter.emit::<Ping>(&5).unwrap();
        assert_eq!(
            *order.lock().unwrap(),
            vec![("first", 5), ("second", 5), ("third", 5)]
        );
    }

    #[test]
    fn duplicate_subscriptions_both_fire() {
        let emitter = Emitter::new();
        let (h, seen) = recorder();
        let _ = emitter.subscribe::<Ping>(h.clone());
        let _ = emitter.subscribe::<Ping>(h.clone());
        emitter.emit::<Ping>(&1).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![1, 1]);
        assert_eq!(emitter.listener_count::<Ping>(), 2);
    }

    #[test]
    fn unsubscribe_removes_identity_matches_only() {
        let emitter = Emitter::new();
        let (h, seen) = recorder();
        let (other, other_seen) = recorder();
        let _ = emitter.subscribe::<Ping>(h.clone());
        let _ = emitter.subscribe::<Ping>(other);

        assert_eq!(emitter.unsubscribe::<Ping>(&h), 1);
        assert_eq!(emitter.unsubscribe::<Ping>(&h), 0);
        emitter.emit::<Ping>(&9).unwrap();

        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(*other_seen.lock().unwrap(), vec![9]);
    }

    #[test]
    fn unsubscribe_is_scoped_to_event() {
        let emitter = Emitter::new();
        let (h, seen) = recorder();
        let _ = emitter.subscribe::<Ping>(h.clone());
        let _ = emitter.subscribe::<Pong>(h.clone());

        emitter.unsubscribe::<Ping>(&h);
        emitter.emit::<Ping>(&1).unwrap();
        emitter.emit::<Pong>(&2).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![2]);
    }

    #[test]
    fn subscription_removes_its_own_registration() {
        let emitter = Emitter::new();
        let (h, seen) = recorder();
        let _first = emitter.subscribe::<Ping>(h.clone());
        let second = emitter.subscribe::<Ping>(h.clone());

        assert!(second.unsubscribe());
        assert!(!second.unsubscribe());
        assert!(!second.is_active());
        emitter.emit::<Ping>(&3).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![3]);
    }

    #[test]
    fn once_fires_a_single_time() {
        let emitter = Emitter::new();
        let (h, seen) = recorder();
        let sub = emitter.once::<Ping>(h);
        assert!(sub.is_once());
        assert_eq!(emitter.listener_count::<Ping>(), 1);

        emitter.emit::<Ping>(&1).unwrap();
        emitter.emit::<Ping>(&2).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![1]);
        assert_eq!(emitter.listener_count::<Ping>(), 0);
        assert!(!sub.is_active());
        assert!(!sub.unsubscribe());
    }

    #[test]
    fn once_cancelled_before_firing() {
        let emitter = Emitter::new();
        let (h, seen) = recorder();
        let _persistent = emitter.subscribe::<Ping>(h.clone());
        let once = emitter.once::<Ping>(h.clone());

        assert!(once.unsubscribe());
        emitter.emit::<Ping>(&4).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![4]);
        assert_eq!(emitter.listener_count::<Ping>(), 1);
    }

    #[test]
    fn unsubscribe_by_handler_leaves_once_registration() {
        let emitter = Emitter::new();
        let (h, seen) = recorder();
        let _once = emitter.once::<Ping>(h.clone());
        assert_eq!(emitter.unsubscribe::<Ping>(&h), 0);
        emitter.emit::<Ping>(&8).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![8]);
    }

    #[test]
    fn once_does_not_refire_on_reentrant_emit() {
        let emitter = Emitter::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let inner = emitter.clone();
        let counter = Arc::clone(&calls);
        let _ = emitter.once::<Ready>(Handler::new(move |_: &()| {
            counter.fetch_add(1, Ordering::SeqCst);
            inner.notify::<Ready>()
        }));
        emitter.notify::<Ready>().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn fail_fast_stops_dispatch() {
        let emitter = Emitter::new();
        let (after, seen) = recorder();
        let _ = emitter.on::<Ping, _, _>(|_| Err::<(), _>("boom"));
        let _ = emitter.subscribe::<Ping>(after);

        let err = emitter.emit::<Ping>(&1).unwrap_err();
        assert!(matches!(err, EmitError::Handler { position: 0, .. }));
        assert_eq!(err.event(), "ping");
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn collect_policy_runs_everything() {
        let emitter = Emitter::builder()
            .with_error_policy(ErrorPolicy::Collect)
            .build();
        let (after, seen) = recorder();
        let _ = emitter.on::<Ping, _, _>(|_| Err::<(), _>("first"));
        let _ = emitter.subscribe::<Ping>(after);
        let _ = emitter.on::<Ping, _, _>(|_| Err::<(), _>("third"));

        let err = emitter.emit::<Ping>(&7).unwrap_err();
        match err {
            EmitError::Aggregate { failures, .. } => {
                let positions: Vec<usize> = failures.iter().map(|(p, _)| *p).collect();
                assert_eq!(positions, vec![0, 2]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(*seen.lock().unwrap(), vec![7]);
    }

    #[test]
    fn snapshot_defers_additions_to_next_emit() {
        let emitter = Emitter::new();
        let (late, seen) = recorder();
        let inner = emitter.clone();
        let _ = emitter.on::<Ping, _, _>(move |_| {
            let _ = inner.subscribe::<Ping>(late.clone());
        });

        emitter.emit::<Ping>(&1).unwrap();
        assert!(seen.lock().unwrap().is_empty());
        emitter.emit::<Ping>(&2).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![2]);
    }

    #[test]
    fn snapshot_still_runs_handlers_removed_mid_emit() {
        let emitter = Emitter::new();
        let (victim, seen) = recorder();
        let inner = emitter.clone();
        let target = victim.clone();
        let _ = emitter.on::<Ping, _, _>(move |_| {
            inner.unsubscribe::<Ping>(&target);
        });
        let _ = emitter.subscribe::<Ping>(victim);

        emitter.emit::<Ping>(&1).unwrap();
        emitter.emit::<Ping>(&2).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![1]);
    }

    #[test]
    fn clear_targets_one_event() {
        let emitter = Emitter::new();
        let (h, seen) = recorder();
        let _ = emitter.subscribe::<Ping>(h.clone());
        let _ = emitter.subscribe::<Pong>(h.clone());

        emitter.clear::<Ping>();
        emitter.emit::<Ping>(&1).unwrap();
        emitter.emit::<Pong>(&2).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![2]);
        assert_eq!(emitter.event_names(), vec![EventName::from("pong")]);

        emitter.clear_all();
        assert!(emitter.is_empty());
        emitter.clear_all();
        emitter.clear_named("never-used");
    }

    #[test]
    fn payload_mismatch_is_reported() {
        let emitter = Emitter::new();
        let _ = emitter.on::<Ping, _, _>(|_| {});
        let err = emitter.emit::<PingText>(&"x".to_string()).unwrap_err();
        assert_eq!(err.as_label(), "emit_payload_mismatch");
        assert_eq!(err.failure_count(), 0);
    }

    #[test]
    fn subscription_outliving_emitter_is_inert() {
        let emitter = Emitter::new();
        let sub = emitter.on::<Ping, _, _>(|_| {});
        drop(emitter);
        assert!(!sub.is_active());
        assert!(!sub.unsubscribe());
    }

    #[test]
    fn instances_are_independent() {
        let a = Emitter::new();
        let b = Emitter::new();
        let _ = a.on::<Ping, _, _>(|_| {});
        assert_eq!(a.listener_count::<Ping>(), 1);
        assert_eq!(b.listener_count::<Ping>(), 0);
        assert_eq!(a.clone().listener_count::<Ping>(), 1);
    }

    #[test]
    fn debug_lists_counts() {
        let emitter = Emitter::new();
        let _ = emitter.on::<Ping, _, _>(|_| {});
        let _ = emitter.on::<Ping, _, _>(|_| {});
        assert_eq!(format!("{emitter:?}"), "{\"ping\": 2}");
    }
}
