//! The [`Registry`] arena and its public editing surface.

use crossbeam_channel::Receiver;
use indexmap::IndexMap;
use smallvec::SmallVec;
use volt_core::{
    Caller, ComponentId, ConnectorId, EntityId, NetError, PinDirection, Position, Value, WireId,
};
use volt_gate::Gate;

use crate::component::Component;
use crate::config::{ConfigError, EngineConfig};
use crate::connector::{Connector, ConnectorKind, PinSlot};
use crate::observer::{Change, ChangeKind, Observer, Observers, SubscriptionId};
use crate::wire::Wire;

/// Sole owner of every connector, wire and component in one network.
///
/// All cross references between entities are ids into the registry's
/// maps. Every editing operation resolves values synchronously before
/// returning; on error, whatever propagation already happened stays
/// visible.
///
/// # Examples
///
/// ```
/// use volt_core::Value;
/// use volt_engine::Registry;
/// use volt_gates::{Inverter, Sink, Source};
///
/// let mut net = Registry::new();
/// let src = net.add_component(Source);
/// let inv = net.add_component(Inverter);
/// let out = net.add_component(Sink);
///
/// net.connect(net.output(src, 0)?, net.input(inv, 0)?)?;
/// net.connect(net.output(inv, 0)?, net.input(out, 0)?)?;
///
/// net.set_source(src, Value::High)?;
/// assert_eq!(net.sink_value(out)?, Value::Low);
/// # Ok::<(), volt_core::NetError>(())
/// ```
pub struct Registry {
    pub(crate) config: EngineConfig,
    pub(crate) connectors: IndexMap<ConnectorId, Connector>,
    pub(crate) wires: IndexMap<WireId, Wire>,
    pub(crate) components: IndexMap<ComponentId, Component>,
    pub(crate) next_connector: u32,
    pub(crate) next_wire: u32,
    pub(crate) next_component: u32,
    pub(crate) observers: Observers,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// An empty registry with the default configuration.
    pub fn new() -> Self {
        Self::build(EngineConfig::default())
    }

    /// An empty registry with a validated configuration.
    pub fn with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EngineConfig) -> Self {
        Self {
            connectors: IndexMap::with_capacity(config.connector_capacity),
            wires: IndexMap::with_capacity(config.wire_capacity),
            components: IndexMap::with_capacity(config.component_capacity),
            config,
            next_connector: 0,
            next_wire: 0,
            next_component: 0,
            observers: Observers::default(),
        }
    }

    /// The configuration this registry was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ── Id minting ─────────────────────────────────────────────────

    fn mint_connector(&mut self) -> ConnectorId {
        let id = ConnectorId(self.next_connector);
        self.next_connector += 1;
        id
    }

    fn mint_wire(&mut self) -> WireId {
        let id = WireId(self.next_wire);
        self.next_wire += 1;
        id
    }

    fn mint_component(&mut self) -> ComponentId {
        let id = ComponentId(self.next_component);
        self.next_component += 1;
        id
    }

    pub(crate) fn notify(&mut self, entity: impl Into<EntityId>, kind: ChangeKind) {
        self.observers.emit(Change::new(entity, kind));
    }

    // ── Creation ───────────────────────────────────────────────────

    /// Add a free-standing junction.
    pub fn create_junction(&mut self) -> ConnectorId {
        let id = self.mint_connector();
        self.connectors
            .insert(id, Connector::new(id, ConnectorKind::Junction));
        tracing::debug!(connector = %id, "junction created");
        self.notify(id, ChangeKind::Created);
        id
    }

    /// Add a component named after its gate tag and id.
    pub fn add_component<G: Gate>(&mut self, gate: G) -> ComponentId {
        self.add_boxed_component(None, Box::new(gate))
    }

    /// Add a component with an explicit display name.
    pub fn add_component_named<G: Gate>(&mut self, name: impl Into<String>, gate: G) -> ComponentId {
        self.add_boxed_component(Some(name.into()), Box::new(gate))
    }

    /// Add an already boxed gate, such as one built by a
    /// [`GateLibrary`](volt_gate::GateLibrary).
    ///
    /// One input pin and one output pin are created per entry of the
    /// gate's layout. Nothing is evaluated until an input changes.
    pub fn add_boxed_component(&mut self, name: Option<String>, gate: Box<dyn Gate>) -> ComponentId {
        let id = self.mint_component();
        let layout = gate.layout();
        let name = name.unwrap_or_else(|| format!("{}{}", gate.tag(), id));

        let mut inputs = SmallVec::new();
        for (index, pin_name) in layout.inputs.into_iter().enumerate() {
            let pin = self.mint_connector();
            let kind = ConnectorKind::Input {
                owner: Some(id),
                pin: PinSlot {
                    index,
                    name: pin_name,
                },
            };
            self.connectors.insert(pin, Connector::new(pin, kind));
            inputs.push(pin);
        }
        let mut outputs = SmallVec::new();
        for (index, pin_name) in layout.outputs.into_iter().enumerate() {
            let pin = self.mint_connector();
            let kind = ConnectorKind::Output {
                owner: Some(id),
                pin: PinSlot {
                    index,
                    name: pin_name,
                },
            };
            self.connectors.insert(pin, Connector::new(pin, kind));
            outputs.push(pin);
        }

        tracing::debug!(
            component = %id,
            tag = gate.tag(),
            inputs = inputs.len(),
            outputs = outputs.len(),
            "component created"
        );
        let pins: SmallVec<[ConnectorId; 6]> = inputs.iter().chain(outputs.iter()).copied().collect();
        self.components.insert(
            id,
            Component {
                id,
                name,
                inputs,
                outputs,
                position: Position::default(),
                gate,
            },
        );
        for pin in pins {
            self.notify(pin, ChangeKind::Created);
        }
        self.notify(id, ChangeKind::Created);
        id
    }

    // ── Pin access ─────────────────────────────────────────────────

    fn pin(&self, component: ComponentId, direction: PinDirection, index: usize) -> Result<ConnectorId, NetError> {
        let pins = self.component(component)?.pins(direction);
        pins.get(index).copied().ok_or(NetError::PinOutOfRange {
            component,
            direction,
            index,
            count: pins.len(),
        })
    }

    /// The `index`th input pin of `component`.
    pub fn input(&self, component: ComponentId, index: usize) -> Result<ConnectorId, NetError> {
        self.pin(component, PinDirection::Input, index)
    }

    /// The `index`th output pin of `component`.
    pub fn output(&self, component: ComponentId, index: usize) -> Result<ConnectorId, NetError> {
        self.pin(component, PinDirection::Output, index)
    }

    // ── Topology ───────────────────────────────────────────────────

    /// Join two connectors with a new wire and seed its value.
    ///
    /// An input pin already holding a wire has that wire destroyed
    /// first. The new wire then reads both endpoints: if exactly one
    /// carries a value it is written into the other, and if both do the
    /// wire becomes CONFLICT and writes that into both ends.
    pub fn connect(&mut self, a: ConnectorId, b: ConnectorId) -> Result<WireId, NetError> {
        if a == b {
            return Err(NetError::SelfLoop(a));
        }
        self.connector(a)?;
        self.connector(b)?;

        let id = self.mint_wire();
        self.wires.insert(id, Wire::new(id, a, b));
        tracing::debug!(wire = %id, a = %a, b = %b, "wire created");
        self.notify(id, ChangeKind::Created);
        self.attach(a, id)?;
        self.attach(b, id)?;

        let va = self.read_value(a, Caller::Wire(id))?;
        let vb = self.read_value(b, Caller::Wire(id))?;
        match (va.is_driven(), vb.is_driven()) {
            (false, false) => {}
            (true, false) => {
                self.set_wire_value(id, va);
                self.write_value(b, Caller::Wire(id), va)?;
            }
            (false, true) => {
                self.set_wire_value(id, vb);
                self.write_value(a, Caller::Wire(id), vb)?;
            }
            (true, true) => {
                self.set_wire_value(id, Value::Conflict);
                self.write_value(a, Caller::Wire(id), Value::Conflict)?;
                self.write_value(b, Caller::Wire(id), Value::Conflict)?;
            }
        }
        Ok(id)
    }

    fn attach(&mut self, end: ConnectorId, wire: WireId) -> Result<(), NetError> {
        let conn = self.connector(end)?;
        if matches!(conn.kind, ConnectorKind::Input { .. }) {
            let stale: SmallVec<[WireId; 2]> =
                conn.wires.iter().copied().filter(|&w| w != wire).collect();
            for w in stale {
                tracing::debug!(connector = %end, replaced = %w, "input pin rewired");
                self.destroy_wire(w)?;
            }
        }
        self.connector_mut(end)?.attach(wire);
        Ok(())
    }

    fn set_wire_value(&mut self, id: WireId, value: Value) {
        if let Some(wire) = self.wires.get_mut(&id) {
            if wire.value != value {
                wire.value = value;
                self.notify(id, ChangeKind::Value(value));
            }
        }
    }

    /// Remove a wire and run both former endpoints' disconnect hooks.
    ///
    /// Destroying a wire that is already being destroyed is a no-op.
    pub fn destroy_wire(&mut self, id: WireId) -> Result<(), NetError> {
        let wire = self
            .wires
            .get_mut(&id)
            .ok_or(NetError::NotFound(EntityId::Wire(id)))?;
        if !wire.is_valid() {
            return Ok(());
        }
        let (a, b) = wire.endpoints();
        wire.id = WireId::INVALID;
        wire.value = Value::Floating;
        for end in [a, b] {
            if let Some(conn) = self.connectors.get_mut(&end) {
                conn.detach(id);
            }
        }
        tracing::debug!(wire = %id, a = %a, b = %b, "wire destroyed");

        let result = self
            .post_disconnect(a)
            .and_then(|()| self.post_disconnect(b));
        self.wires.shift_remove(&id);
        self.notify(id, ChangeKind::Destroyed);
        result
    }

    fn destroy_all_wires(&mut self, connector: ConnectorId) -> Result<(), NetError> {
        let wires = self.connector(connector)?.wires.clone();
        for w in wires {
            self.destroy_wire(w)?;
        }
        Ok(())
    }

    /// Remove a component, its pins and every wire attached to them.
    pub fn remove_component(&mut self, id: ComponentId) -> Result<(), NetError> {
        let comp = self.component(id)?;
        let pins: SmallVec<[ConnectorId; 6]> =
            comp.inputs.iter().chain(comp.outputs.iter()).copied().collect();
        for &pin in &pins {
            self.destroy_all_wires(pin)?;
        }
        for pin in pins {
            self.connectors.shift_remove(&pin);
            self.notify(pin, ChangeKind::Destroyed);
        }
        self.components.shift_remove(&id);
        tracing::debug!(component = %id, "component removed");
        self.notify(id, ChangeKind::Destroyed);
        Ok(())
    }

    /// Remove a junction and every wire attached to it.
    ///
    /// Pins can only be removed together with their component.
    pub fn remove_junction(&mut self, id: ConnectorId) -> Result<(), NetError> {
        let conn = self.connector(id)?;
        if !matches!(conn.kind, ConnectorKind::Junction) {
            return Err(NetError::WrongKind {
                connector: id,
                expected: "junction",
                actual: conn.kind_name(),
            });
        }
        self.destroy_all_wires(id)?;
        self.connectors.shift_remove(&id);
        tracing::debug!(connector = %id, "junction removed");
        self.notify(id, ChangeKind::Destroyed);
        Ok(())
    }

    // ── Driving ────────────────────────────────────────────────────

    /// Set the level a source component drives on its first output.
    ///
    /// FLOATING stops driving.
    pub fn set_source(&mut self, component: ComponentId, value: Value) -> Result<(), NetError> {
        self.drive(component, 0, value)
    }

    /// Drive output pin `pin` of `component` as if the component itself
    /// had computed `value`.
    pub fn drive(&mut self, component: ComponentId, pin: usize, value: Value) -> Result<(), NetError> {
        let out = self.output(component, pin)?;
        self.write_value(out, Caller::Component(component), value)
    }

    /// Write `value` into a connector from outside the network.
    ///
    /// On a junction the value only sticks while nothing drives the net;
    /// with one or more drivers present it counts as another driver and
    /// the junction goes to CONFLICT. Output pins can only be driven
    /// through [`Registry::drive`].
    pub fn write(&mut self, connector: ConnectorId, value: Value) -> Result<(), NetError> {
        self.write_value(connector, Caller::External, value)
    }

    /// Re-evaluate a component's gate and drive its outputs.
    ///
    /// The engine does this whenever an input pin changes; calling it
    /// directly lets a freshly added component drive its outputs before
    /// any input has been wired.
    pub fn recompute(&mut self, component: ComponentId) -> Result<(), NetError> {
        self.evaluate(component)
    }

    // ── Queries ────────────────────────────────────────────────────

    /// Look up a connector.
    pub fn connector(&self, id: ConnectorId) -> Result<&Connector, NetError> {
        self.connectors
            .get(&id)
            .ok_or(NetError::NotFound(EntityId::Connector(id)))
    }

    pub(crate) fn connector_mut(&mut self, id: ConnectorId) -> Result<&mut Connector, NetError> {
        self.connectors
            .get_mut(&id)
            .ok_or(NetError::NotFound(EntityId::Connector(id)))
    }

    /// Look up a wire.
    pub fn wire(&self, id: WireId) -> Result<&Wire, NetError> {
        self.wires
            .get(&id)
            .ok_or(NetError::NotFound(EntityId::Wire(id)))
    }

    /// Look up a component.
    pub fn component(&self, id: ComponentId) -> Result<&Component, NetError> {
        self.components
            .get(&id)
            .ok_or(NetError::NotFound(EntityId::Component(id)))
    }

    /// All connectors in creation order.
    pub fn connectors(&self) -> impl Iterator<Item = &Connector> {
        self.connectors.values()
    }

    /// All wires in creation order.
    pub fn wires(&self) -> impl Iterator<Item = &Wire> {
        self.wires.values()
    }

    /// All components in creation order.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    /// Last resolved value of a connector.
    pub fn value(&self, id: ConnectorId) -> Result<Value, NetError> {
        self.connector(id).map(Connector::value)
    }

    /// Last value routed across a wire.
    pub fn wire_value(&self, id: WireId) -> Result<Value, NetError> {
        self.wire(id).map(Wire::value)
    }

    /// Value seen by the first input pin of a sink component.
    pub fn sink_value(&self, component: ComponentId) -> Result<Value, NetError> {
        self.value(self.input(component, 0)?)
    }

    /// Output pins actively driving the net around `id`, as seen by
    /// `caller`. A wire caller's own wire is excluded from the search.
    /// An output pin reports only itself, and only while it drives.
    pub fn get_drivers(&mut self, id: ConnectorId, caller: Caller) -> Result<Vec<ConnectorId>, NetError> {
        let mut drivers = indexmap::IndexSet::new();
        self.collect_drivers(id, caller.wire(), &mut drivers)?;
        Ok(drivers.into_iter().collect())
    }

    // ── Positions ──────────────────────────────────────────────────

    /// Move a component on the canvas.
    pub fn set_component_position(&mut self, id: ComponentId, position: Position) -> Result<(), NetError> {
        let comp = self
            .components
            .get_mut(&id)
            .ok_or(NetError::NotFound(EntityId::Component(id)))?;
        comp.position = position;
        self.notify(id, ChangeKind::Moved(position));
        Ok(())
    }

    /// Move a connector on the canvas.
    pub fn set_connector_position(&mut self, id: ConnectorId, position: Position) -> Result<(), NetError> {
        self.connector_mut(id)?.position = position;
        self.notify(id, ChangeKind::Moved(position));
        Ok(())
    }

    // ── Observation ────────────────────────────────────────────────

    /// Register an observer for every change, or for one entity's
    /// changes when `filter` is set.
    pub fn subscribe<O: Observer + 'static>(&mut self, filter: Option<EntityId>, observer: O) -> SubscriptionId {
        self.observers.subscribe(filter, Box::new(observer))
    }

    /// Remove an observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// A channel receiving every change passing `filter`.
    ///
    /// The subscription ends on the first change after the receiver is
    /// dropped.
    pub fn change_feed(&mut self, filter: Option<EntityId>) -> Receiver<Change> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.observers.feed(filter, tx);
        rx
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("connectors", &self.connectors.len())
            .field("wires", &self.wires.len())
            .field("components", &self.components.len())
            .field("subscriptions", &self.observers.len())
            .finish()
    }
}
