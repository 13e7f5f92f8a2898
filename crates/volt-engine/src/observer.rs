//! Change notification for view layers and tests.
//!
//! Every mutation the registry performs emits a [`Change`]. Collaborators
//! either subscribe an [`Observer`] callback or drain a
//! [`change_feed`](crate::Registry::change_feed) channel. Both can be
//! scoped to a single entity.

use crossbeam_channel::Sender;
use indexmap::IndexMap;
use volt_core::{EntityId, Position, Value};

/// What happened to an entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ChangeKind {
    /// The entity was added to the registry.
    Created,
    /// A connector or wire took a new value.
    Value(Value),
    /// A component re-evaluated its gate.
    Recomputed,
    /// A connector or component was moved on the canvas.
    Moved(Position),
    /// The entity was removed from the registry.
    Destroyed,
}

/// One notification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Change {
    /// The entity that changed.
    pub entity: EntityId,
    /// What changed.
    pub kind: ChangeKind,
}

impl Change {
    pub(crate) fn new(entity: impl Into<EntityId>, kind: ChangeKind) -> Self {
        Self {
            entity: entity.into(),
            kind,
        }
    }
}

/// Receives changes synchronously, in the order they happen.
///
/// Implemented for every `FnMut(&Change) + Send` closure.
pub trait Observer: Send {
    /// Called once per change that passes the subscription's filter.
    fn on_change(&mut self, change: &Change);
}

impl<F> Observer for F
where
    F: FnMut(&Change) + Send,
{
    fn on_change(&mut self, change: &Change) {
        self(change)
    }
}

/// Handle returned by [`Registry::subscribe`](crate::Registry::subscribe).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u32);

enum Sink {
    Callback(Box<dyn Observer>),
    Channel(Sender<Change>),
}

struct Subscription {
    filter: Option<EntityId>,
    sink: Sink,
}

impl Subscription {
    /// Deliver `change` if it passes the filter. Returns `false` once a
    /// channel's receiver has been dropped.
    fn deliver(&mut self, change: &Change) -> bool {
        if self.filter.is_some_and(|f| f != change.entity) {
            return true;
        }
        match &mut self.sink {
            Sink::Callback(observer) => {
                observer.on_change(change);
                true
            }
            Sink::Channel(tx) => tx.send(*change).is_ok(),
        }
    }
}

/// Subscription table owned by the registry.
#[derive(Default)]
pub(crate) struct Observers {
    next: u32,
    entries: IndexMap<SubscriptionId, Subscription>,
}

impl Observers {
    fn insert(&mut self, filter: Option<EntityId>, sink: Sink) -> SubscriptionId {
        let id = SubscriptionId(self.next);
        self.next += 1;
        self.entries.insert(id, Subscription { filter, sink });
        id
    }

    pub(crate) fn subscribe(
        &mut self,
        filter: Option<EntityId>,
        observer: Box<dyn Observer>,
    ) -> SubscriptionId {
        self.insert(filter, Sink::Callback(observer))
    }

    pub(crate) fn feed(&mut self, filter: Option<EntityId>, tx: Sender<Change>) -> SubscriptionId {
        self.insert(filter, Sink::Channel(tx))
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.entries.shift_remove(&id).is_some()
    }

    pub(crate) fn emit(&mut self, change: Change) {
        if self.entries.is_empty() {
            return;
        }
        tracing::trace!(entity = %change.entity, kind = ?change.kind, "change");
        self.entries.retain(|_, sub| sub.deliver(&change));
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use volt_core::{ConnectorId, WireId};

    use super::*;

    #[test]
    fn filter_limits_delivery() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut obs = Observers::default();
        obs.subscribe(
            Some(EntityId::Wire(WireId(1))),
            Box::new(move |c: &Change| sink.lock().unwrap().push(*c)),
        );
        obs.emit(Change::new(ConnectorId(1), ChangeKind::Created));
        obs.emit(Change::new(WireId(1), ChangeKind::Value(Value::High)));
        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            [Change::new(WireId(1), ChangeKind::Value(Value::High))]
        );
    }

    #[test]
    fn dropped_feed_is_pruned() {
        let mut obs = Observers::default();
        let (tx, rx) = crossbeam_channel::unbounded();
        obs.feed(None, tx);
        obs.emit(Change::new(ConnectorId(0), ChangeKind::Created));
        assert_eq!(rx.try_recv().map(|c| c.kind), Ok(ChangeKind::Created));
        drop(rx);
        obs.emit(Change::new(ConnectorId(0), ChangeKind::Destroyed));
        assert_eq!(obs.len(), 0);
    }

    #[test]
    fn unsubscribe_removes_entry() {
        let mut obs = Observers::default();
        let id = obs.subscribe(None, Box::new(|_: &Change| {}));
        assert!(obs.unsubscribe(id));
        assert!(!obs.unsubscribe(id));
    }
}
