//! Export to and restore from [`NetworkSnapshot`]s.
//!
//! Restore runs in three phases whose order is fixed by the type of the
//! [`Restore`] builder: connectors first, then components (which bind
//! their pins), then wires (after which every junction re-resolves).

use std::marker::PhantomData;

use smallvec::SmallVec;
use volt_core::{ComponentId, ConnectorId, EntityId, NetError, PinDirection};
use volt_gate::GateLibrary;
use volt_snapshot::{
    ComponentRecord, ConnectorKindRecord, ConnectorRecord, NetworkSnapshot, SnapshotError,
    WireRecord,
};

use crate::component::Component;
use crate::config::{ConfigError, EngineConfig};
use crate::connector::{Connector, ConnectorKind, PinSlot};
use crate::registry::Registry;
use crate::wire::Wire;

// ── RestoreError ───────────────────────────────────────────────────

/// Errors raised while rebuilding a registry.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RestoreError {
    /// The engine configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The snapshot is structurally malformed.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    /// A record references something the registry rejects, or the
    /// final re-resolution failed.
    #[error(transparent)]
    Net(#[from] NetError),
}

// ── Export ─────────────────────────────────────────────────────────

impl Registry {
    /// Flatten the arena into id-keyed records, in creation order.
    pub fn export(&self) -> NetworkSnapshot {
        let connectors = self
            .connectors
            .values()
            .map(|c| ConnectorRecord {
                id: c.id,
                kind: match &c.kind {
                    ConnectorKind::Input { pin, .. } => ConnectorKindRecord::Input {
                        index: pin.index,
                        name: pin.name.clone(),
                    },
                    ConnectorKind::Output { pin, .. } => ConnectorKindRecord::Output {
                        index: pin.index,
                        name: pin.name.clone(),
                    },
                    ConnectorKind::Junction => ConnectorKindRecord::Junction,
                },
                value: c.value,
                position: c.position,
            })
            .collect();
        let components = self
            .components
            .values()
            .map(|c| ComponentRecord {
                id: c.id,
                tag: c.tag().to_owned(),
                name: c.name.clone(),
                position: c.position,
                inputs: c.inputs.to_vec(),
                outputs: c.outputs.to_vec(),
            })
            .collect();
        let wires = self
            .wires
            .values()
            .filter(|w| w.is_valid())
            .map(|w| WireRecord {
                id: w.id,
                a: w.a,
                b: w.b,
                value: w.value,
            })
            .collect();
        NetworkSnapshot {
            connectors,
            components,
            wires,
            ..NetworkSnapshot::default()
        }
    }

    /// Validate `snapshot` and run all three restore phases.
    ///
    /// Tags missing from `library` come back as
    /// [`Placeholder`](volt_gate::Placeholder) components.
    pub fn restore(
        snapshot: &NetworkSnapshot,
        library: &GateLibrary,
        config: EngineConfig,
    ) -> Result<Registry, RestoreError> {
        snapshot.validate()?;
        Restore::new(config)?
            .connectors(&snapshot.connectors)?
            .components(&snapshot.components, library)?
            .wires(&snapshot.wires)
    }
}

// ── Restore ────────────────────────────────────────────────────────

/// Phase marker: connectors come next.
#[derive(Debug)]
pub struct AwaitingConnectors;
/// Phase marker: components come next.
#[derive(Debug)]
pub struct AwaitingComponents;
/// Phase marker: wires come next.
#[derive(Debug)]
pub struct AwaitingWires;

/// Typestate builder rebuilding a [`Registry`] from records.
///
/// ```
/// use volt_core::{ComponentId, ConnectorId, Value};
/// use volt_engine::{EngineConfig, Restore};
/// use volt_snapshot::{ComponentRecord, ConnectorRecord};
///
/// let pins = [ConnectorRecord::output(ConnectorId(0), 0, "Y", Value::High)];
/// let comps = [ComponentRecord {
///     id: ComponentId(0),
///     tag: "Source".into(),
///     name: "clock".into(),
///     position: Default::default(),
///     inputs: vec![],
///     outputs: vec![ConnectorId(0)],
/// }];
///
/// let net = Restore::new(EngineConfig::default())?
///     .connectors(&pins)?
///     .components(&comps, &volt_gates::standard_library())?
///     .wires(&[])?;
/// assert_eq!(net.value(ConnectorId(0))?, Value::High);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Restore<P> {
    registry: Registry,
    _phase: PhantomData<P>,
}

impl<P> Restore<P> {
    fn advance<Q>(self) -> Restore<Q> {
        Restore {
            registry: self.registry,
            _phase: PhantomData,
        }
    }
}

impl Restore<AwaitingConnectors> {
    /// Start a restore into an empty registry.
    pub fn new(config: EngineConfig) -> Result<Self, RestoreError> {
        Ok(Self {
            registry: Registry::with_config(config)?,
            _phase: PhantomData,
        })
    }

    /// Phase 1: recreate every connector with its recorded id, value
    /// and position. Pins are left unbound.
    pub fn connectors(
        mut self,
        records: &[ConnectorRecord],
    ) -> Result<Restore<AwaitingComponents>, RestoreError> {
        let reg = &mut self.registry;
        for rec in records {
            if reg.connectors.contains_key(&rec.id) {
                return Err(SnapshotError::DuplicateId(EntityId::Connector(rec.id)).into());
            }
            let kind = match &rec.kind {
                ConnectorKindRecord::Input { index, name } => ConnectorKind::Input {
                    owner: None,
                    pin: PinSlot {
                        index: *index,
                        name: name.clone(),
                    },
                },
                ConnectorKindRecord::Output { index, name } => ConnectorKind::Output {
                    owner: None,
                    pin: PinSlot {
                        index: *index,
                        name: name.clone(),
                    },
                },
                ConnectorKindRecord::Junction => ConnectorKind::Junction,
            };
            let mut conn = Connector::new(rec.id, kind);
            conn.value = rec.value;
            conn.position = rec.position;
            reg.connectors.insert(rec.id, conn);
            reg.next_connector = reg.next_connector.max(rec.id.0.saturating_add(1));
        }
        tracing::debug!(count = records.len(), "restored connectors");
        Ok(self.advance())
    }
}

impl Restore<AwaitingComponents> {
    /// Phase 2: recreate components, bind their pins and instantiate
    /// their gates through `library`.
    pub fn components(
        mut self,
        records: &[ComponentRecord],
        library: &GateLibrary,
    ) -> Result<Restore<AwaitingWires>, RestoreError> {
        let reg = &mut self.registry;
        for rec in records {
            if reg.components.contains_key(&rec.id) {
                return Err(SnapshotError::DuplicateId(EntityId::Component(rec.id)).into());
            }
            let sides = [
                (PinDirection::Input, &rec.inputs),
                (PinDirection::Output, &rec.outputs),
            ];
            for (direction, pins) in sides {
                for &pin in pins {
                    bind_pin(reg, rec.id, pin, direction)?;
                }
            }
            let gate = library.instantiate(&rec.tag, rec.inputs.len(), rec.outputs.len());
            reg.components.insert(
                rec.id,
                Component {
                    id: rec.id,
                    name: rec.name.clone(),
                    inputs: SmallVec::from_slice(&rec.inputs),
                    outputs: SmallVec::from_slice(&rec.outputs),
                    position: rec.position,
                    gate,
                },
            );
            reg.next_component = reg.next_component.max(rec.id.0.saturating_add(1));
        }
        tracing::debug!(count = records.len(), "restored components");
        Ok(self.advance())
    }
}

fn bind_pin(
    reg: &mut Registry,
    component: ComponentId,
    pin: ConnectorId,
    direction: PinDirection,
) -> Result<(), RestoreError> {
    let conn = reg.connector_mut(pin)?;
    let actual = conn.kind_name();
    let owner = match (&mut conn.kind, direction) {
        (ConnectorKind::Input { owner, .. }, PinDirection::Input)
        | (ConnectorKind::Output { owner, .. }, PinDirection::Output) => owner,
        _ => {
            let expected = match direction {
                PinDirection::Input => "input pin",
                PinDirection::Output => "output pin",
            };
            return Err(NetError::WrongKind {
                connector: pin,
                expected,
                actual,
            }
            .into());
        }
    };
    if let Some(first) = *owner {
        return Err(SnapshotError::PinClaimedTwice {
            connector: pin,
            first,
            second: component,
        }
        .into());
    }
    *owner = Some(component);
    Ok(())
}

impl Restore<AwaitingWires> {
    /// Phase 3: reattach wires by id, then re-resolve every junction
    /// against the recorded drive levels. Returns the finished registry.
    pub fn wires(mut self, records: &[WireRecord]) -> Result<Registry, RestoreError> {
        let reg = &mut self.registry;
        for rec in records {
            if !rec.id.is_valid() {
                return Err(SnapshotError::InvalidWireId.into());
            }
            if reg.wires.contains_key(&rec.id) {
                return Err(SnapshotError::DuplicateId(EntityId::Wire(rec.id)).into());
            }
            if rec.a == rec.b {
                return Err(NetError::SelfLoop(rec.a).into());
            }
            for end in [rec.a, rec.b] {
                let conn = reg.connector_mut(end)?;
                if let (ConnectorKind::Input { .. }, Some(&first)) = (&conn.kind, conn.wires.first()) {
                    return Err(SnapshotError::InputFanIn {
                        connector: end,
                        first,
                        second: rec.id,
                    }
                    .into());
                }
                conn.attach(rec.id);
            }
            let mut wire = Wire::new(rec.id, rec.a, rec.b);
            wire.value = rec.value;
            reg.wires.insert(rec.id, wire);
            reg.next_wire = reg.next_wire.max(rec.id.0.saturating_add(1));
        }
        tracing::debug!(count = records.len(), "restored wires");

        // Output pins keep their recorded level; it is what drives the net.
        let junctions: Vec<ConnectorId> = reg
            .connectors
            .values()
            .filter(|c| c.kind == ConnectorKind::Junction)
            .map(|c| c.id)
            .collect();
        for id in junctions {
            reg.settle(id)?;
        }
        Ok(self.registry)
    }
}
