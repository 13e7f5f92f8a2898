//! Errors found while validating a snapshot.

use volt_core::{ComponentId, ConnectorId, EntityId, PinDirection, WireId};

/// A structural defect in a [`NetworkSnapshot`](crate::NetworkSnapshot).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    /// The snapshot was written by an unsupported format version.
    #[error("unsupported snapshot format version {found}")]
    UnsupportedVersion {
        /// The version found in the snapshot.
        found: u32,
    },
    /// Two records share an id.
    #[error("duplicate {0}")]
    DuplicateId(EntityId),
    /// A wire record uses the reserved invalid id.
    #[error("wire record uses the reserved invalid id")]
    InvalidWireId,
    /// A record references a connector that is not in the snapshot.
    #[error("{referrer} references missing connector {connector}")]
    DanglingConnector {
        /// The referring record.
        referrer: EntityId,
        /// The missing connector.
        connector: ConnectorId,
    },
    /// A component lists a connector on the wrong side, or a junction.
    #[error("component {component} lists connector {connector} as an {expected} pin")]
    PinKindMismatch {
        /// The component.
        component: ComponentId,
        /// The listed connector.
        connector: ConnectorId,
        /// The side it was listed on.
        expected: PinDirection,
    },
    /// A pin's recorded index disagrees with its position in the
    /// component's pin list.
    #[error("pin {connector} of component {component} recorded at index {recorded}, listed at {listed}")]
    PinIndexMismatch {
        /// The component.
        component: ComponentId,
        /// The pin.
        connector: ConnectorId,
        /// Index stored in the connector record.
        recorded: usize,
        /// Position in the component's pin list.
        listed: usize,
    },
    /// Two components claim the same pin.
    #[error("pin {connector} claimed by components {first} and {second}")]
    PinClaimedTwice {
        /// The pin.
        connector: ConnectorId,
        /// First claimant.
        first: ComponentId,
        /// Second claimant.
        second: ComponentId,
    },
    /// A wire joins a connector to itself.
    #[error("wire {wire} joins connector {connector} to itself")]
    SelfLoop {
        /// The wire.
        wire: WireId,
        /// Its only endpoint.
        connector: ConnectorId,
    },
    /// An input pin has more than one wire.
    #[error("input pin {connector} has wires {first} and {second}")]
    InputFanIn {
        /// The input pin.
        connector: ConnectorId,
        /// First wire.
        first: WireId,
        /// Second wire.
        second: WireId,
    },
}
