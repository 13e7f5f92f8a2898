use indexmap::map::Entry;
use indexmap::{IndexMap, IndexSet};
use volt_core::{ComponentId, ConnectorId, EntityId, PinDirection, WireId};

use crate::error::SnapshotError;
use crate::types::{ConnectorKindRecord, NetworkSnapshot};
use crate::FORMAT_VERSION;

impl NetworkSnapshot {
    /// Check referential integrity.
    ///
    /// Verifies the format version, that ids are unique per category,
    /// that every referenced connector exists, that component pin lists
    /// agree with the connector records, and that no input pin has more
    /// than one wire. Restore calls this before any phase runs.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.version != FORMAT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
            });
        }

        let mut kinds: IndexMap<ConnectorId, &ConnectorKindRecord> =
            IndexMap::with_capacity(self.connectors.len());
        for rec in &self.connectors {
            if kinds.insert(rec.id, &rec.kind).is_some() {
                return Err(SnapshotError::DuplicateId(EntityId::Connector(rec.id)));
            }
        }

        let mut components = IndexSet::with_capacity(self.components.len());
        let mut owners: IndexMap<ConnectorId, ComponentId> = IndexMap::new();
        for comp in &self.components {
            if !components.insert(comp.id) {
                return Err(SnapshotError::DuplicateId(EntityId::Component(comp.id)));
            }
            let sides = [
                (PinDirection::Input, &comp.inputs),
                (PinDirection::Output, &comp.outputs),
            ];
            for (direction, pins) in sides {
                for (listed, &pin) in pins.iter().enumerate() {
                    let kind = kinds.get(&pin).ok_or(SnapshotError::DanglingConnector {
                        referrer: EntityId::Component(comp.id),
                        connector: pin,
                    })?;
                    if kind.direction() != Some(direction) {
                        return Err(SnapshotError::PinKindMismatch {
                            component: comp.id,
                            connector: pin,
                            expected: direction,
                        });
                    }
                    if let Some(recorded) = kind.index().filter(|&i| i != listed) {
                        return Err(SnapshotError::PinIndexMismatch {
                            component: comp.id,
                            connector: pin,
                            recorded,
                            listed,
                        });
                    }
                    match owners.entry(pin) {
                        Entry::Occupied(e) => {
                            return Err(SnapshotError::PinClaimedTwice {
                                connector: pin,
                                first: *e.get(),
                                second: comp.id,
                            });
                        }
                        Entry::Vacant(e) => {
                            e.insert(comp.id);
                        }
                    }
                }
            }
        }

        let mut wires = IndexSet::with_capacity(self.wires.len());
        let mut input_wires: IndexMap<ConnectorId, WireId> = IndexMap::new();
        for wire in &self.wires {
            if !wire.id.is_valid() {
                return Err(SnapshotError::InvalidWireId);
            }
            if !wires.insert(wire.id) {
                return Err(SnapshotError::DuplicateId(EntityId::Wire(wire.id)));
            }
            if wire.a == wire.b {
                return Err(SnapshotError::SelfLoop {
                    wire: wire.id,
                    connector: wire.a,
                });
            }
            for end in [wire.a, wire.b] {
                let kind = kinds.get(&end).ok_or(SnapshotError::DanglingConnector {
                    referrer: EntityId::Wire(wire.id),
                    connector: end,
                })?;
                if kind.direction() == Some(PinDirection::Input) {
                    if let Some(&first) = input_wires.get(&end) {
                        return Err(SnapshotError::InputFanIn {
                            connector: end,
                            first,
                            second: wire.id,
                        });
                    }
                    input_wires.insert(end, wire.id);
                }
            }
        }

        Ok(())
    }
}
