//! Value comparison between two snapshots of the same network.

use indexmap::IndexMap;
use volt_core::{EntityId, Value};

use crate::types::NetworkSnapshot;

/// One entity whose value differs between two snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValueDivergence {
    /// The connector or wire.
    pub entity: EntityId,
    /// Value in the first snapshot, `None` if absent there.
    pub expected: Option<Value>,
    /// Value in the second snapshot, `None` if absent there.
    pub actual: Option<Value>,
}

fn values(snap: &NetworkSnapshot) -> IndexMap<EntityId, Value> {
    let connectors = snap
        .connectors
        .iter()
        .map(|c| (EntityId::Connector(c.id), c.value));
    let wires = snap.wires.iter().map(|w| (EntityId::Wire(w.id), w.value));
    connectors.chain(wires).collect()
}

/// Compare connector and wire values, matching entities by id.
///
/// Returns an empty list when every entity present in either snapshot
/// carries the same value in both. Divergences are reported in
/// `expected`'s record order, followed by entities only `actual` has.
pub fn compare_values(expected: &NetworkSnapshot, actual: &NetworkSnapshot) -> Vec<ValueDivergence> {
    let expected = values(expected);
    let mut actual = values(actual);
    let mut divergences = Vec::new();

    for (&entity, &value) in &expected {
        match actual.shift_remove(&entity) {
            Some(found) if found == value => {}
            found => divergences.push(ValueDivergence {
                entity,
                expected: Some(value),
                actual: found,
            }),
        }
    }
    divergences.extend(actual.into_iter().map(|(entity, value)| ValueDivergence {
        entity,
        expected: None,
        actual: Some(value),
    }));
    divergences
}

#[cfg(test)]
mod tests {
    use volt_core::{ConnectorId, WireId};

    use super::*;
    use crate::types::{ConnectorRecord, WireRecord};

    fn pair(value: Value) -> NetworkSnapshot {
        let mut snap = NetworkSnapshot::default();
        for id in 0..2 {
            let mut rec = ConnectorRecord::junction(ConnectorId(id));
            rec.value = value;
            snap.connectors.push(rec);
        }
        let mut wire = WireRecord::new(WireId(0), ConnectorId(0), ConnectorId(1));
        wire.value = value;
        snap.wires.push(wire);
        snap
    }

    #[test]
    fn identical_snapshots_agree() {
        assert!(compare_values(&pair(Value::High), &pair(Value::High)).is_empty());
    }

    #[test]
    fn changed_values_reported_in_order() {
        let mut actual = pair(Value::High);
        actual.connectors[1].value = Value::Conflict;
        let diffs = compare_values(&pair(Value::High), &actual);
        assert_eq!(
            diffs,
            [ValueDivergence {
                entity: EntityId::Connector(ConnectorId(1)),
                expected: Some(Value::High),
                actual: Some(Value::Conflict),
            }]
        );
    }

    #[test]
    fn missing_and_extra_entities_reported() {
        let expected = pair(Value::Low);
        let mut actual = pair(Value::Low);
        actual.wires.clear();
        actual.connectors.push(ConnectorRecord::junction(ConnectorId(5)));
        let diffs = compare_values(&expected, &actual);
        assert_eq!(diffs.len(), 2);
        assert_eq!(diffs[0].entity, EntityId::Wire(WireId(0)));
        assert_eq!(diffs[0].actual, None);
        assert_eq!(diffs[1].entity, EntityId::Connector(ConnectorId(5)));
        assert_eq!(diffs[1].expected, None);
    }
}
