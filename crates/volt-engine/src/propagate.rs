//! The connector protocol: driver search, writes and propagation.
//!
//! A node learns who drives its net by a depth-first walk over wires.
//! Each connector's in-progress flag doubles as a lock: while it is set,
//! a search reaching that connector finds nothing there. The walk ends
//! at pins. An input pin never drives, and an output pin reports itself
//! when it drives a level but never passes the search on.
//!
//! A junction resolves an incoming value against the drivers beyond the
//! wire it arrived on. FLOATING with exactly one driver adopts that
//! driver's level, any other write seeing a driver becomes CONFLICT,
//! and with no drivers the incoming value is kept. Adopted and
//! conflicting values spread over every wire, the wire they came on
//! included; a kept value goes only to the other wires, and only when
//! it changed the junction. A junction is
//! locked while it forwards, so searches passing back through it see
//! fewer drivers than a full walk would. The result errs towards the
//! incoming value rather than towards CONFLICT.
//!
//! Wires drop values they already carry. The one exception is an output
//! pin changing level: it delivers the new level over every wire, so a
//! second driver joining a net already at its level is still counted.

use indexmap::IndexSet;
use smallvec::SmallVec;
use volt_core::{Caller, ComponentId, ConnectorId, EntityId, NetError, ProtocolViolation, Value, WireId};

use crate::connector::ConnectorKind;
use crate::observer::ChangeKind;
use crate::registry::Registry;

impl Registry {
    fn violation(&self, violation: ProtocolViolation) -> NetError {
        tracing::error!(%violation, "protocol violation");
        violation.into()
    }

    /// Set the lock on `id`, returning what it was before.
    fn lock(&mut self, id: ConnectorId) -> Result<bool, NetError> {
        let conn = self.connector_mut(id)?;
        Ok(std::mem::replace(&mut conn.in_progress, true))
    }

    fn unlock(&mut self, id: ConnectorId, was: bool) {
        if let Some(conn) = self.connectors.get_mut(&id) {
            conn.in_progress = was;
        }
    }

    // ── Reads ──────────────────────────────────────────────────────

    /// A connector's value as seen by `caller`.
    ///
    /// An input pin read across a wire reports FLOATING: input pins
    /// never contribute a level to the net they sit on.
    pub fn read_value(&self, id: ConnectorId, caller: Caller) -> Result<Value, NetError> {
        let conn = self.connector(id)?;
        match (&conn.kind, caller) {
            (ConnectorKind::Input { .. }, Caller::Wire(_)) => Ok(Value::Floating),
            _ => Ok(conn.value),
        }
    }

    // ── Driver search ──────────────────────────────────────────────

    /// Collect driving output pins reachable from `id` without crossing
    /// `exclude`.
    pub(crate) fn collect_drivers(
        &mut self,
        id: ConnectorId,
        exclude: Option<WireId>,
        out: &mut IndexSet<ConnectorId>,
    ) -> Result<(), NetError> {
        let conn = self.connector_mut(id)?;
        if conn.in_progress {
            return Ok(());
        }
        match conn.kind {
            ConnectorKind::Input { .. } => return Ok(()),
            ConnectorKind::Output { .. } => {
                if conn.value.is_driven() {
                    out.insert(id);
                }
                return Ok(());
            }
            ConnectorKind::Junction => {}
        }
        let wires: SmallVec<[WireId; 4]> = conn
            .wires
            .iter()
            .copied()
            .filter(|&w| Some(w) != exclude)
            .collect();
        conn.in_progress = true;
        tracing::trace!(connector = %id, wires = wires.len(), "searching drivers");

        let mut result = Ok(());
        for w in wires {
            result = self.wire_drivers(w, id, out);
            if result.is_err() {
                break;
            }
        }
        self.unlock(id, false);
        result
    }

    /// Drivers on the far side of `wire`, as seen from endpoint `from`.
    fn wire_drivers(
        &mut self,
        wire: WireId,
        from: ConnectorId,
        out: &mut IndexSet<ConnectorId>,
    ) -> Result<(), NetError> {
        let w = self.wire(wire)?;
        if !w.is_valid() {
            return Ok(());
        }
        let Some(far) = w.other(from) else {
            return Err(self.violation(ProtocolViolation::ForeignEndpoint {
                wire,
                connector: from,
            }));
        };
        self.collect_drivers(far, Some(wire), out)
    }

    // ── Writes ─────────────────────────────────────────────────────

    /// Deliver `value` to connector `id` on behalf of `caller`.
    pub(crate) fn write_value(&mut self, id: ConnectorId, caller: Caller, value: Value) -> Result<(), NetError> {
        let limit = self.config.max_reentry;
        let conn = self.connector_mut(id)?;
        if conn.entries >= limit {
            tracing::warn!(connector = %id, limit, "re-entry limit exceeded");
            return Err(NetError::ReentryLimit { connector: id, limit });
        }
        conn.entries += 1;
        let result = self.write_value_inner(id, caller, value);
        if let Some(conn) = self.connectors.get_mut(&id) {
            conn.entries -= 1;
        }
        result
    }

    fn write_value_inner(&mut self, id: ConnectorId, caller: Caller, value: Value) -> Result<(), NetError> {
        let conn = self.connector(id)?;
        tracing::trace!(connector = %id, %caller, from = %conn.value, to = %value, "write");
        match conn.kind {
            ConnectorKind::Input { owner, .. } => {
                if let Caller::Component(component) = caller {
                    return Err(self.violation(ProtocolViolation::ComponentWroteInput {
                        connector: id,
                        component,
                    }));
                }
                if conn.value == value {
                    return Ok(());
                }
                self.store(id, value);
                match owner {
                    Some(owner) => self.evaluate(owner),
                    None => Ok(()),
                }
            }
            ConnectorKind::Output { owner, .. } => match caller {
                // The net never changes what a pin drives. A driving pin
                // that sees another level re-broadcasts CONFLICT.
                Caller::Wire(_) => {
                    if conn.is_driving() && value.is_driven() && value != conn.value {
                        tracing::debug!(connector = %id, drives = %conn.value, sees = %value, "output shorted");
                        self.spread(id, Value::Conflict)
                    } else {
                        Ok(())
                    }
                }
                // A pin changing level announces it even on wires that
                // already carry that level from elsewhere in the net.
                Caller::Component(c) if owner == Some(c) => {
                    let changed = self.store(id, value);
                    self.forward(id, None, value, changed)
                }
                _ => Err(self.violation(ProtocolViolation::ForeignDriver {
                    connector: id,
                    owner,
                    caller,
                })),
            },
            ConnectorKind::Junction => self.resolve(id, caller, value),
        }
    }

    /// Resolve `value` at junction `id` against the drivers beyond the
    /// caller's wire, then store and pass on the result.
    fn resolve(&mut self, id: ConnectorId, caller: Caller, value: Value) -> Result<(), NetError> {
        let mut drivers = IndexSet::new();
        self.collect_drivers(id, caller.wire(), &mut drivers)?;
        let resolved = match drivers.first() {
            Some(&only) if drivers.len() == 1 && value == Value::Floating => Some(self.connector(only)?.value),
            Some(_) => Some(Value::Conflict),
            None => None,
        };
        tracing::trace!(connector = %id, %caller, incoming = %value, drivers = drivers.len(), ?resolved, "resolved");
        match resolved {
            Some(resolved) => {
                self.store(id, resolved);
                self.spread(id, resolved)
            }
            None => {
                if self.store(id, value) {
                    self.forward(id, caller.wire(), value, false)
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Cache `value` on `id`, notifying on change. Returns whether it
    /// changed.
    fn store(&mut self, id: ConnectorId, value: Value) -> bool {
        match self.connectors.get_mut(&id) {
            Some(conn) if conn.value != value => {
                conn.value = value;
                self.notify(id, ChangeKind::Value(value));
                true
            }
            _ => false,
        }
    }

    /// Send `value` over every wire of `id`.
    fn spread(&mut self, id: ConnectorId, value: Value) -> Result<(), NetError> {
        self.forward(id, None, value, false)
    }

    /// Send `value` over every wire of `id` except `skip`, holding the
    /// lock on `id` throughout. With `force`, wires already carrying
    /// `value` deliver it anyway.
    fn forward(&mut self, id: ConnectorId, skip: Option<WireId>, value: Value, force: bool) -> Result<(), NetError> {
        let wires = self.connector(id)?.wires.clone();
        let was = self.lock(id)?;
        let mut result = Ok(());
        for w in wires.into_iter().filter(|&w| Some(w) != skip) {
            result = self.propagate(w, id, value, force);
            if result.is_err() {
                break;
            }
        }
        self.unlock(id, was);
        result
    }

    /// Carry `value` from endpoint `from` across `wire` to the other end.
    ///
    /// A wire already holding `value` drops it unless `force` is set.
    pub(crate) fn propagate(
        &mut self,
        wire: WireId,
        from: ConnectorId,
        value: Value,
        force: bool,
    ) -> Result<(), NetError> {
        let w = self
            .wires
            .get_mut(&wire)
            .ok_or(NetError::NotFound(EntityId::Wire(wire)))?;
        if !w.is_valid() {
            return Ok(());
        }
        let Some(to) = w.other(from) else {
            return Err(self.violation(ProtocolViolation::ForeignEndpoint {
                wire,
                connector: from,
            }));
        };
        if w.value == value && !force {
            return Ok(());
        }
        if w.value != value {
            w.value = value;
            self.notify(wire, ChangeKind::Value(value));
        }
        tracing::trace!(wire = %wire, %from, %to, %value, force, "propagate");
        self.write_value(to, Caller::Wire(wire), value)
    }

    // ── Disconnect and recompute ───────────────────────────────────

    /// Re-resolve junction `id` from the drivers it can still reach.
    pub(crate) fn settle(&mut self, id: ConnectorId) -> Result<(), NetError> {
        self.write_value(id, Caller::Connector(id), Value::Floating)
    }

    /// Hook run on each endpoint after a wire has been detached.
    pub(crate) fn post_disconnect(&mut self, id: ConnectorId) -> Result<(), NetError> {
        let Some(conn) = self.connectors.get(&id) else {
            return Ok(());
        };
        match conn.kind {
            ConnectorKind::Input { .. } => self.write_value(id, Caller::Connector(id), Value::Floating),
            ConnectorKind::Output { .. } => {
                let level = conn.value;
                self.spread(id, level)
            }
            ConnectorKind::Junction => self.settle(id),
        }
    }

    /// Read every input, run the gate and drive every output.
    pub(crate) fn evaluate(&mut self, component: ComponentId) -> Result<(), NetError> {
        let comp = self.component(component)?;
        let caller = Caller::Component(component);
        let inputs = comp
            .inputs
            .iter()
            .map(|&pin| self.read_value(pin, caller))
            .collect::<Result<SmallVec<[Value; 4]>, _>>()?;
        let mut outputs = comp
            .outputs
            .iter()
            .map(|&pin| self.read_value(pin, caller))
            .collect::<Result<SmallVec<[Value; 2]>, _>>()?;
        comp.gate.evaluate(&inputs, &mut outputs);
        let pins = comp.outputs.clone();
        tracing::debug!(
            component = %component,
            tag = comp.gate.tag(),
            inputs = ?inputs.as_slice(),
            outputs = ?outputs.as_slice(),
            "recompute"
        );

        for (pin, value) in pins.into_iter().zip(outputs) {
            self.write_value(pin, caller, value)?;
        }
        self.notify(component, ChangeKind::Recomputed);
        Ok(())
    }
}
