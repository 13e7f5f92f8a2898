//! Error types for network mutation and propagation.
//!
//! Disconnection and multi-driver conflict are never errors: they are
//! [`Value::Floating`](crate::Value::Floating) and
//! [`Value::Conflict`](crate::Value::Conflict). What remains are caller
//! mistakes (bad pin index, stale id) and protocol violations, which
//! indicate a bug in whoever drove the network and abort the operation.

use crate::id::{Caller, ComponentId, ConnectorId, EntityId, PinDirection, WireId};

/// A breach of the connector propagation protocol.
///
/// These are programming errors, not user-facing conditions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolViolation {
    /// A component tried to write one of the input pins it reads from.
    #[error("component {component} wrote input pin {connector}")]
    ComponentWroteInput {
        /// The input pin.
        connector: ConnectorId,
        /// The offending component.
        component: ComponentId,
    },
    /// An output pin was driven by something other than its owner.
    #[error("output pin {connector} owned by {owner:?} driven by {caller}")]
    ForeignDriver {
        /// The output pin.
        connector: ConnectorId,
        /// The component that owns the pin, if bound.
        owner: Option<ComponentId>,
        /// Who attempted the write.
        caller: Caller,
    },
    /// A wire was asked to route relative to a connector that is not
    /// one of its endpoints.
    #[error("connector {connector} is not an endpoint of wire {wire}")]
    ForeignEndpoint {
        /// The wire.
        wire: WireId,
        /// The connector that claimed to be an endpoint.
        connector: ConnectorId,
    },
}

/// Errors from registry lookups, topology edits and propagation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NetError {
    /// A pin index outside a component's fixed pin count.
    #[error("{direction} pin {index} out of range for component {component} with {count} {direction}s")]
    PinOutOfRange {
        /// The component.
        component: ComponentId,
        /// Which side was requested.
        direction: PinDirection,
        /// The requested index.
        index: usize,
        /// How many pins of that direction the component has.
        count: usize,
    },
    /// The propagation protocol was violated.
    #[error("protocol violation: {0}")]
    Protocol(#[from] ProtocolViolation),
    /// No live entity with this id.
    #[error("{0} not found")]
    NotFound(EntityId),
    /// A connector of a different kind was expected.
    #[error("connector {connector} is {actual}, expected {expected}")]
    WrongKind {
        /// The connector.
        connector: ConnectorId,
        /// What the operation needed.
        expected: &'static str,
        /// What the connector is.
        actual: &'static str,
    },
    /// A wire was requested between a connector and itself.
    #[error("wire endpoints must differ, got connector {0} twice")]
    SelfLoop(ConnectorId),
    /// Writes to one connector nested past the configured limit within a
    /// single edit, typically because a feedback loop keeps flipping.
    #[error("connector {connector} hit the re-entry limit of {limit}")]
    ReentryLimit {
        /// The connector that kept being written.
        connector: ConnectorId,
        /// The configured limit.
        limit: usize,
    },
}

impl NetError {
    /// `true` for [`NetError::Protocol`].
    pub fn is_protocol_violation(&self) -> bool {
        matches!(self, Self::Protocol(_))
    }
}
