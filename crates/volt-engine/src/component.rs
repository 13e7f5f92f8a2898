//! Components: a gate instance bound to its pins.

use std::fmt;

use smallvec::SmallVec;
use volt_core::{ComponentId, ConnectorId, PinDirection, Position};
use volt_gate::Gate;

/// A gate together with the connectors it reads and drives.
pub struct Component {
    pub(crate) id: ComponentId,
    pub(crate) name: String,
    pub(crate) inputs: SmallVec<[ConnectorId; 4]>,
    pub(crate) outputs: SmallVec<[ConnectorId; 2]>,
    pub(crate) position: Position,
    pub(crate) gate: Box<dyn Gate>,
}

impl Component {
    /// This component's id.
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The gate's class tag.
    pub fn tag(&self) -> &str {
        self.gate.tag()
    }

    /// Input pins in pin-index order.
    pub fn inputs(&self) -> &[ConnectorId] {
        &self.inputs
    }

    /// Output pins in pin-index order.
    pub fn outputs(&self) -> &[ConnectorId] {
        &self.outputs
    }

    /// Pins on one side.
    pub fn pins(&self, direction: PinDirection) -> &[ConnectorId] {
        match direction {
            PinDirection::Input => &self.inputs,
            PinDirection::Output => &self.outputs,
        }
    }

    /// Canvas position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// The gate computing this component's outputs.
    pub fn gate(&self) -> &dyn Gate {
        self.gate.as_ref()
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("tag", &self.gate.tag())
            .field("inputs", &self.inputs)
            .field("outputs", &self.outputs)
            .field("position", &self.position)
            .finish()
    }
}
