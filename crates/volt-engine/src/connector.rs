//! Connectors: the nodes wires attach to.

use smallvec::SmallVec;
use volt_core::{ComponentId, ConnectorId, PinDirection, Position, Value, WireId};

/// Where a pin sits on its component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PinSlot {
    /// Index within the component's inputs or outputs.
    pub index: usize,
    /// Display name.
    pub name: String,
}

/// The closed set of connector variants.
#[derive(Clone, Debug, PartialEq)]
pub enum ConnectorKind {
    /// A component input. Accepts at most one wire; never drives.
    Input {
        /// The component this pin feeds, once bound.
        owner: Option<ComponentId>,
        /// Position on the owner.
        pin: PinSlot,
    },
    /// A component output. Any number of wires. Its value is the level
    /// the owner asserts and only the owner changes it.
    Output {
        /// The component allowed to drive this pin, once bound.
        owner: Option<ComponentId>,
        /// Position on the owner.
        pin: PinSlot,
    },
    /// A passive node joining any number of wires.
    Junction,
}

/// A node in the network.
#[derive(Clone, Debug)]
pub struct Connector {
    pub(crate) id: ConnectorId,
    pub(crate) kind: ConnectorKind,
    pub(crate) wires: SmallVec<[WireId; 4]>,
    pub(crate) value: Value,
    pub(crate) position: Position,
    pub(crate) in_progress: bool,
    pub(crate) entries: usize,
}

impl Connector {
    pub(crate) fn new(id: ConnectorId, kind: ConnectorKind) -> Self {
        Self {
            id,
            kind,
            wires: SmallVec::new(),
            value: Value::Floating,
            position: Position::default(),
            in_progress: false,
            entries: 0,
        }
    }

    /// This connector's id.
    pub fn id(&self) -> ConnectorId {
        self.id
    }

    /// Variant and variant data.
    pub fn kind(&self) -> &ConnectorKind {
        &self.kind
    }

    /// Attached wires, in attachment order.
    pub fn wires(&self) -> &[WireId] {
        &self.wires
    }

    /// Last resolved value. For an output pin, the level it drives.
    pub fn value(&self) -> Value {
        self.value
    }

    /// Canvas position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Owning component for pins, `None` for junctions and unbound pins.
    pub fn owner(&self) -> Option<ComponentId> {
        match self.kind {
            ConnectorKind::Input { owner, .. } | ConnectorKind::Output { owner, .. } => owner,
            ConnectorKind::Junction => None,
        }
    }

    /// Pin slot, `None` for junctions.
    pub fn pin(&self) -> Option<&PinSlot> {
        match &self.kind {
            ConnectorKind::Input { pin, .. } | ConnectorKind::Output { pin, .. } => Some(pin),
            ConnectorKind::Junction => None,
        }
    }

    /// Pin direction, `None` for junctions.
    pub fn direction(&self) -> Option<PinDirection> {
        match self.kind {
            ConnectorKind::Input { .. } => Some(PinDirection::Input),
            ConnectorKind::Output { .. } => Some(PinDirection::Output),
            ConnectorKind::Junction => None,
        }
    }

    /// `true` for an output pin asserting a non-floating level.
    pub fn is_driving(&self) -> bool {
        matches!(self.kind, ConnectorKind::Output { .. }) && self.value.is_driven()
    }

    /// Short variant name for messages.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            ConnectorKind::Input { .. } => "input pin",
            ConnectorKind::Output { .. } => "output pin",
            ConnectorKind::Junction => "junction",
        }
    }

    /// Append `wire`, dropping any earlier entry for it.
    pub(crate) fn attach(&mut self, wire: WireId) {
        self.detach(wire);
        self.wires.push(wire);
    }

    pub(crate) fn detach(&mut self, wire: WireId) {
        self.wires.retain(|w| *w != wire);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(level: Value) -> Connector {
        let mut c = Connector::new(
            ConnectorId(0),
            ConnectorKind::Output {
                owner: Some(ComponentId(1)),
                pin: PinSlot {
                    index: 0,
                    name: "Y".into(),
                },
            },
        );
        c.value = level;
        c
    }

    #[test]
    fn driving_requires_output_with_level() {
        assert!(output(Value::High).is_driving());
        assert!(output(Value::Conflict).is_driving());
        assert!(!output(Value::Floating).is_driving());
        let mut j = Connector::new(ConnectorId(1), ConnectorKind::Junction);
        j.value = Value::High;
        assert!(!j.is_driving());
    }

    #[test]
    fn attach_is_idempotent() {
        let mut c = Connector::new(ConnectorId(0), ConnectorKind::Junction);
        c.attach(WireId(1));
        c.attach(WireId(2));
        c.attach(WireId(1));
        assert_eq!(c.wires(), [WireId(2), WireId(1)]);
        c.detach(WireId(2));
        assert_eq!(c.wires(), [WireId(1)]);
    }

    #[test]
    fn pin_accessors() {
        let c = output(Value::Low);
        assert_eq!(c.owner(), Some(ComponentId(1)));
        assert_eq!(c.pin().map(|p| p.name.as_str()), Some("Y"));
        assert_eq!(c.direction(), Some(PinDirection::Output));
        assert_eq!(c.kind_name(), "output pin");
    }
}
