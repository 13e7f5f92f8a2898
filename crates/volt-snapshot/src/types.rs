//! Record types making up a [`NetworkSnapshot`].

use serde::{Deserialize, Serialize};
use volt_core::{ComponentId, ConnectorId, PinDirection, Position, Value, WireId};

use crate::FORMAT_VERSION;

/// What kind of connector a record describes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ConnectorKindRecord {
    /// An input pin at `index` on its component.
    Input {
        /// Pin index within the component's inputs.
        index: usize,
        /// Pin display name.
        name: String,
    },
    /// An output pin at `index` on its component.
    Output {
        /// Pin index within the component's outputs.
        index: usize,
        /// Pin display name.
        name: String,
    },
    /// A free-standing junction.
    Junction,
}

impl ConnectorKindRecord {
    /// Pin direction, or `None` for a junction.
    pub fn direction(&self) -> Option<PinDirection> {
        match self {
            Self::Input { .. } => Some(PinDirection::Input),
            Self::Output { .. } => Some(PinDirection::Output),
            Self::Junction => None,
        }
    }

    /// Pin index, or `None` for a junction.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Input { index, .. } | Self::Output { index, .. } => Some(*index),
            Self::Junction => None,
        }
    }
}

/// One connector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConnectorRecord {
    /// Connector id, preserved on restore.
    pub id: ConnectorId,
    /// Kind-specific data.
    #[serde(flatten)]
    pub kind: ConnectorKindRecord,
    /// Last resolved value.
    #[serde(default)]
    pub value: Value,
    /// Canvas position.
    #[serde(default)]
    pub position: Position,
}

impl ConnectorRecord {
    /// A junction record with no value or position.
    pub fn junction(id: ConnectorId) -> Self {
        Self {
            id,
            kind: ConnectorKindRecord::Junction,
            value: Value::Floating,
            position: Position::default(),
        }
    }

    /// An input pin record.
    pub fn input(id: ConnectorId, index: usize, name: impl Into<String>) -> Self {
        Self {
            id,
            kind: ConnectorKindRecord::Input {
                index,
                name: name.into(),
            },
            value: Value::Floating,
            position: Position::default(),
        }
    }

    /// An output pin record driving `value`.
    pub fn output(id: ConnectorId, index: usize, name: impl Into<String>, value: Value) -> Self {
        Self {
            id,
            kind: ConnectorKindRecord::Output {
                index,
                name: name.into(),
            },
            value,
            position: Position::default(),
        }
    }
}

/// One component.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    /// Component id, preserved on restore.
    pub id: ComponentId,
    /// Gate class tag, resolved through a gate library on restore.
    pub tag: String,
    /// Display name.
    pub name: String,
    /// Canvas position.
    #[serde(default)]
    pub position: Position,
    /// Input pin ids in pin-index order.
    pub inputs: Vec<ConnectorId>,
    /// Output pin ids in pin-index order.
    pub outputs: Vec<ConnectorId>,
}

/// One wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireRecord {
    /// Wire id, preserved on restore.
    pub id: WireId,
    /// First endpoint.
    pub a: ConnectorId,
    /// Second endpoint.
    pub b: ConnectorId,
    /// Cached value.
    #[serde(default)]
    pub value: Value,
}

impl WireRecord {
    /// A floating wire between `a` and `b`.
    pub fn new(id: WireId, a: ConnectorId, b: ConnectorId) -> Self {
        Self {
            id,
            a,
            b,
            value: Value::Floating,
        }
    }
}

/// A whole network, flattened into id-keyed records.
///
/// # Examples
///
/// ```
/// use volt_core::{ConnectorId, WireId};
/// use volt_snapshot::{ConnectorRecord, NetworkSnapshot, WireRecord};
///
/// let mut snap = NetworkSnapshot::default();
/// snap.connectors.push(ConnectorRecord::junction(ConnectorId(0)));
/// snap.connectors.push(ConnectorRecord::junction(ConnectorId(1)));
/// snap.wires.push(WireRecord::new(WireId(0), ConnectorId(0), ConnectorId(1)));
///
/// assert!(snap.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    /// Format version the snapshot was written with.
    pub version: u32,
    /// Every connector, including component pins.
    pub connectors: Vec<ConnectorRecord>,
    /// Every component.
    pub components: Vec<ComponentRecord>,
    /// Every wire.
    pub wires: Vec<WireRecord>,
}

impl Default for NetworkSnapshot {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            connectors: Vec::new(),
            components: Vec::new(),
            wires: Vec::new(),
        }
    }
}

impl NetworkSnapshot {
    /// `true` if the snapshot holds no entities.
    pub fn is_empty(&self) -> bool {
        self.connectors.is_empty() && self.components.is_empty() && self.wires.is_empty()
    }
}
