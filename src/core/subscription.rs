//! # Subscription handles.
//!
//! Every `subscribe`/`once` call returns a [`Subscription`]: the "unsubscribe
//! callable" for exactly that registration.
//!
//! ## Rules
//! - Removes **only its own** registration, identified by a registration id,
//!   never another entry that happens to share the same handler.
//! - Idempotent: the first successful call returns `true`, later calls return
//!   `false` and touch nothing.
//! - Holds a weak reference: an outstanding subscription never keeps a dropped
//!   emitter alive, and unsubscribing after that is a no-op.
//! - Dropping a `Subscription` does **not** unsubscribe; use
//!   [`Subscription::into_guard`] for scope-bound registrations.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use crate::core::emitter::Shared;
use crate::core::registry::EntryId;
use crate::events::EventName;

/// Handle that removes one registration.
#[derive(Clone)]
#[must_use = "dropping a Subscription leaves the handler registered; call `unsubscribe` or `into_guard`"]
pub struct Subscription {
    shared: Weak<Shared>,
    event: EventName,
    id: EntryId,
    once: Option<Arc<AtomicBool>>,
}

impl Subscription {
    pub(crate) fn new(
        shared: &Arc<Shared>,
        event: EventName,
        id: EntryId,
        once: Option<Arc<AtomicBool>>,
    ) -> Self {
        Self {
            shared: Arc::downgrade(shared),
            event,
            id,
            once,
        }
    }

    /// Removes this registration.
    ///
    /// Returns `true` if the registration was still present. For a one-shot
    /// registration this also prevents it from firing in an emit that already
    /// took its snapshot.
    pub fn unsubscribe(&self) -> bool {
        if let Some(latch) = &self.once {
            latch.store(true, Ordering::Release);
        }
        match self.shared.upgrade() {
            Some(shared) => shared.remove_entry(&self.event, self.id),
            None => false,
        }
    }

    /// Returns `true` while the registration is still present.
    ///
    /// A one-shot registration becomes inactive as soon as it fires.
    pub fn is_active(&self) -> bool {
        self.shared
            .upgrade()
            .is_some_and(|shared| shared.contains_entry(&self.event, self.id))
    }

    /// Event this registration belongs to.
    pub fn event(&self) -> &EventName {
        &self.event
    }

    /// Returns `true` for registrations created with `once`.
    pub fn is_once(&self) -> bool {
        self.once.is_some()
    }

    /// Converts into a guard that unsubscribes when dropped.
    pub fn into_guard(self) -> SubscriptionGuard {
        SubscriptionGuard {
            inner: self,
            armed: true,
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("event", &self.event)
            .field("id", &self.id)
            .field("once", &self.once.is_some())
            .finish()
    }
}

/// RAII wrapper: unsubscribes on drop.
///
/// ## Example
/// ```rust
/// use eventvisor::{event, Emitter};
///
/// event!(Tick => "tick");
///
/// let emitter = Emitter::new();
/// {
///     let _guard = emitter.on::<Tick, _, _>(|_| {}).into_guard();
///     assert_eq!(emitter.listener_count::<Tick>(), 1);
/// }
/// assert_eq!(emitter.listener_count::<Tick>(), 0);
/// ```
#[derive(Debug)]
#[must_use = "dropping the guard immediately unsubscribes"]
pub struct SubscriptionGuard {
    inner: Subscription,
    armed: bool,
}

impl SubscriptionGuard {
    /// Gives up the guard without unsubscribing.
    pub fn release(mut self) -> Subscription {
        self.armed = false;
        self.inner.clone()
    }

    /// The guarded subscription.
    pub fn subscription(&self) -> &Subscription {
        &self.inner
    }
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        if self.armed {
            self.inner.unsubscribe();
        }
    }
}
