//! Wires: undirected edges between two connectors.

use volt_core::{ConnectorId, Value, WireId};

/// An edge caching the last value routed across it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wire {
    pub(crate) id: WireId,
    pub(crate) a: ConnectorId,
    pub(crate) b: ConnectorId,
    pub(crate) value: Value,
}

impl Wire {
    pub(crate) fn new(id: WireId, a: ConnectorId, b: ConnectorId) -> Self {
        Self {
            id,
            a,
            b,
            value: Value::Floating,
        }
    }

    /// This wire's id, or [`WireId::INVALID`] while it is being destroyed.
    pub fn id(&self) -> WireId {
        self.id
    }

    /// Both endpoints, in creation order.
    pub fn endpoints(&self) -> (ConnectorId, ConnectorId) {
        (self.a, self.b)
    }

    /// Last value routed across.
    pub fn value(&self) -> Value {
        self.value
    }

    /// `false` once destruction has started.
    pub fn is_valid(&self) -> bool {
        self.id.is_valid()
    }

    /// The endpoint opposite `from`, or `None` if `from` is not an
    /// endpoint.
    pub fn other(&self, from: ConnectorId) -> Option<ConnectorId> {
        if from == self.a {
            Some(self.b)
        } else if from == self.b {
            Some(self.a)
        } else {
            None
        }
    }
}
