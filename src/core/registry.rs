//! # Listener registry - the mapping from event names to ordered handlers.
//!
//! Pure data structure: every method is a mutation or read of the map. Locking,
//! dispatch and logging live in [`Emitter`](crate::Emitter).
//!
//! ## Layout
//! ```text
//! HashMap<EventName, Vec<Entry>>
//!   "ping"  ─► [ Entry{id:1, h1}, Entry{id:2, h2}, Entry{id:4, h1} ]
//!   "ready" ─► [ Entry{id:3, once} ]
//! ```
//!
//! ## Rules
//! - Entries keep insertion order; the same handler may appear more than once
//! - Every entry has a unique, never-reused registration id
//! - A name with no entries is removed from the map (absent ≡ empty)
//! - Entries are type-erased; the payload `TypeId` is kept for emit-time checks

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::events::EventName;
use crate::handlers::Handler;

/// Unique id of one registration.
pub(crate) type EntryId = u64;

/// One registration of a handler under an event name.
#[derive(Clone)]
pub(crate) struct Entry {
    /// Registration id (unique per registry).
    pub(crate) id: EntryId,
    /// Identity compared by `unsubscribe`.
    pub(crate) identity: usize,
    /// The `Handler<P>`, erased.
    pub(crate) handler: Arc<dyn Any + Send + Sync>,
    /// `TypeId` of `P`.
    pub(crate) payload: TypeId,
    /// `type_name` of `P` (for errors).
    pub(crate) payload_name: &'static str,
    /// Handler name (for logs).
    pub(crate) name: Arc<str>,
    /// One-shot latch; `Some` for entries registered with `once`.
    pub(crate) once: Option<Arc<AtomicBool>>,
}

impl Entry {
    /// Builds an entry for a persistent registration.
    pub(crate) fn persistent<P: Send + Sync + 'static>(id: EntryId, handler: Handler<P>) -> Self {
        Self {
            id,
            identity: handler.identity(),
            name: Arc::from(handler.name()),
            handler: Arc::new(handler),
            payload: TypeId::of::<P>(),
            payload_name: std::any::type_name::<P>(),
            once: None,
        }
    }

    /// Builds an entry for a one-shot registration.
    ///
    /// The entry gets its own identity (the latch address), so it is a distinct
    /// handler from `handler` as far as `unsubscribe` is concerned.
    pub(crate) fn one_shot<P: Send + Sync + 'static>(
        id: EntryId,
        handler: Handler<P>,
        latch: Arc<AtomicBool>,
    ) -> Self {
        let mut entry = Self::persistent(id, handler);
        entry.identity = Arc::as_ptr(&latch) as usize;
        entry.once = Some(latch);
        entry
    }

    /// Downcasts the stored handler back to `Handler<P>`.
    #[inline]
    pub(crate) fn handler<P: 'static>(&self) -> Option<&Handler<P>> {
        self.handler.downcast_ref::<Handler<P>>()
    }

    /// Claims the one-shot latch. Returns `false` if the entry already fired.
    ///
    /// Persistent entries can always be claimed.
    #[inline]
    pub(crate) fn claim(&self) -> bool {
        match &self.once {
            Some(latch) => !latch.swap(true, Ordering::AcqRel),
            None => true,
        }
    }
}

/// Event name → ordered handler entries.
#[derive(Default)]
pub(crate) struct Registry {
    listeners: HashMap<EventName, Vec<Entry>>,
    next_id: EntryId,
}

impl Registry {
    /// Allocates the next registration id.
    pub(crate) fn next_id(&mut self) -> EntryId {
        self.next_id += 1;
        self.next_id
    }

    /// Appends `entry` under `name`; returns the new listener count.
    pub(crate) fn insert(&mut self, name: EventName, entry: Entry) -> usize {
        let entries = self.listeners.entry(name).or_default();
        entries.push(entry);
        entries.len()
    }

    /// Removes the registration `id` under `name`. Returns `true` if it existed.
    pub(crate) fn remove_id(&mut self, name: &str, id: EntryId) -> bool {
        let Some(entries) = self.listeners.get_mut(name) else {
            return false;
        };
        let Some(pos) = entries.iter().position(|e| e.id == id) else {
            return false;
        };
        entries.remove(pos);
        if entries.is_empty() {
            self.listeners.remove(name);
        }
        true
    }

    /// Removes every entry under `name` whose identity equals `identity`.
    ///
    /// Returns the number of removed entries.
    pub(crate) fn remove_identity(&mut self, name: &str, identity: usize) -> usize {
        let Some(entries) = self.listeners.get_mut(name) else {
            return 0;
        };
        let before = entries.len();
        entries.retain(|e| e.identity != identity);
        let removed = before - entries.len();
        if entries.is_empty() {
            self.listeners.remove(name);
        }
        removed
    }

    /// Drops all entries under `name`. Returns how many were dropped.
    pub(crate) fn clear(&mut self, name: &str) -> usize {
        self.listeners.remove(name).map_or(0, |entries| entries.len())
    }

    /// Drops every entry. Returns how many were dropped.
    pub(crate) fn clear_all(&mut self) -> usize {
        let total = self.total();
        self.listeners.clear();
        total
    }

    /// Number of entries under `name`.
    pub(crate) fn count(&self, name: &str) -> usize {
        self.listeners.get(name).map_or(0, Vec::len)
    }

    /// Total number of entries across all names.
    pub(crate) fn total(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }

    /// Returns `true` if registration `id` is still present under `name`.
    pub(crate) fn contains(&self, name: &str, id: EntryId) -> bool {
        self.listeners
            .get(name)
            .is_some_and(|entries| entries.iter().any(|e| e.id == id))
    }

    /// Point-in-time copy of the entries under `name`, in registration order.
    pub(crate) fn snapshot(&self, name: &str) -> Vec<Entry> {
        self.listeners.get(name).cloned().unwrap_or_default()
    }

    /// Sorted list of names that currently have listeners.
    pub(crate) fn names(&self) -> Vec<EventName> {
        let mut names: Vec<EventName> = self.listeners.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// `true` if no handlers are registered at all.
    pub(crate) fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(reg: &mut Registry, h: &Handler<u32>) -> Entry {
        Entry::persistent(reg.next_id(), h.clone())
    }

    #[test]
    fn keeps_insertion_order_and_duplicates() {
        let mut reg = Registry::default();
        let a = Handler::new(|_: &u32| {});
        let b = Handler::new(|_: &u32| {});

        let e1 = entry(&mut reg, &a);
        let e2 = entry(&mut reg, &b);
        let e3 = entry(&mut reg, &a);
        reg.insert("ping".into(), e1);
        reg.insert("ping".into(), e2);
        assert_eq!(reg.insert("ping".into(), e3), 3);

        let ids: Vec<EntryId> = reg.snapshot("ping").iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn remove_identity_drops_all_matches_and_prunes() {
        let mut reg = Registry::default();
        let a = Handler::new(|_: &u32| {});
        let e1 = entry(&mut reg, &a);
        let e2 = entry(&mut reg, &a);
        reg.insert("ping".into(), e1);
        reg.insert("ping".into(), e2);

        assert_eq!(reg.remove_identity("ping", a.identity()), 2);
        assert_eq!(reg.remove_identity("ping", a.identity()), 0);
        assert!(reg.is_empty());
        assert!(reg.names().is_empty());
    }

    #[test]
    fn remove_id_targets_one_entry() {
        let mut reg = Registry::default();
        let a = Handler::new(|_: &u32| {});
        let e1 = entry(&mut reg, &a);
        let e2 = entry(&mut reg, &a);
        let (id1, id2) = (e1.id, e2.id);
        reg.insert("ping".into(), e1);
        reg.insert("ping".into(), e2);

        assert!(reg.remove_id("ping", id2));
        assert!(!reg.remove_id("ping", id2));
        assert!(reg.contains("ping", id1));
        assert_eq!(reg.count("ping"), 1);
    }

    #[test]
    fn one_shot_has_own_identity_and_latch() {
        let mut reg = Registry::default();
        let a = Handler::new(|_: &u32| {});
        let id = reg.next_id();
        let once = Entry::one_shot(id, a.clone(), Arc::new(AtomicBool::new(false)));
        assert_ne!(once.identity, a.identity());
        assert!(once.claim());
        assert!(!once.claim());

        let plain = entry(&mut reg, &a);
        assert!(plain.claim());
        assert!(plain.claim());
    }

    #[test]
    fn clear_and_counts() {
        let mut reg = Registry::default();
        let a = Handler::new(|_: &u32| {});
        for name in ["a", "b", "b"] {
            let e = entry(&mut reg, &a);
            reg.insert(name.into(), e);
        }
        assert_eq!(reg.total(), 3);
        assert_eq!(reg.names(), vec![EventName::from("a"), EventName::from("b")]);
        assert_eq!(reg.clear("b"), 2);
        assert_eq!(reg.clear("b"), 0);
        assert_eq!(reg.count("a"), 1);
        assert_eq!(reg.clear_all(), 1);
        assert_eq!(reg.count("missing"), 0);
    }

    #[test]
    fn downcast_checks_payload_type() {
        let mut reg = Registry::default();
        let e = entry(&mut reg, &Handler::new(|_: &u32| {}));
        assert!(e.handler::<u32>().is_some());
        assert!(e.handler::<String>().is_none());
        assert_eq!(e.payload, TypeId::of::<u32>());
    }
}
