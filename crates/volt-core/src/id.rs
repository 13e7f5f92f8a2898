//! Strongly-typed identifiers, the [`Caller`] tag and [`Position`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies a connector (input pin, output pin or junction).
///
/// Minted by the registry from a monotonic per-category counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectorId(pub u32);

impl fmt::Display for ConnectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ConnectorId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a wire.
///
/// A destroyed wire carries [`WireId::INVALID`] for the short window in
/// which its endpoints run their post-disconnect hooks, so nothing can
/// route a value through it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WireId(pub u32);

impl WireId {
    /// Sentinel carried by a wire that has been destroyed.
    pub const INVALID: WireId = WireId(u32::MAX);

    /// `false` only for [`WireId::INVALID`].
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}", self.0)
        } else {
            f.write_str("invalid")
        }
    }
}

impl From<u32> for WireId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a component (a gate instance together with its pins).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(pub u32);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ComponentId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Any entity owned by the registry.
///
/// Used for lookups that can fail, for error reporting, and as the
/// subject of change notifications.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityId {
    /// A connector.
    Connector(ConnectorId),
    /// A wire.
    Wire(WireId),
    /// A component.
    Component(ComponentId),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connector(id) => write!(f, "connector {id}"),
            Self::Wire(id) => write!(f, "wire {id}"),
            Self::Component(id) => write!(f, "component {id}"),
        }
    }
}

impl From<ConnectorId> for EntityId {
    fn from(id: ConnectorId) -> Self {
        Self::Connector(id)
    }
}

impl From<WireId> for EntityId {
    fn from(id: WireId) -> Self {
        Self::Wire(id)
    }
}

impl From<ComponentId> for EntityId {
    fn from(id: ComponentId) -> Self {
        Self::Component(id)
    }
}

/// Who invoked a connector operation.
///
/// The propagation protocol behaves differently depending on whether a
/// read or write arrives over a wire, from a component, from the
/// connector itself (post-disconnect hooks) or from outside the network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Caller {
    /// A wire forwarding a value from its other endpoint.
    Wire(WireId),
    /// A component reading its inputs or driving its outputs.
    Component(ComponentId),
    /// A connector acting on itself.
    Connector(ConnectorId),
    /// The embedding application (UI, test harness).
    External,
}

impl Caller {
    /// The wire this call arrived on, if any.
    pub fn wire(self) -> Option<WireId> {
        match self {
            Self::Wire(w) => Some(w),
            _ => None,
        }
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wire(id) => write!(f, "wire {id}"),
            Self::Component(id) => write!(f, "component {id}"),
            Self::Connector(id) => write!(f, "connector {id}"),
            Self::External => f.write_str("external"),
        }
    }
}

/// Which side of a component a pin sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PinDirection {
    /// Consumes a value from the network.
    Input,
    /// Drives a value into the network.
    Output,
}

impl fmt::Display for PinDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => f.write_str("input"),
            Self::Output => f.write_str("output"),
        }
    }
}

/// Placement of an entity on the editor canvas.
///
/// The engine never interprets positions; it stores them, snapshots
/// them and notifies observers when they change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Position {
    /// Create a position.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
