//! Export, serialise and restore whole networks.

use tracing::Level;
use volt_core::{ConnectorId, EntityId, Value};
use volt_engine::{EngineConfig, Registry, RestoreError};
use volt_gate::GateLibrary;
use volt_gates::{standard_library, Nand, Sink, Source};
use volt_snapshot::{compare_values, ConnectorKindRecord, NetworkSnapshot, SnapshotError};
use volt_test_utils::{capture_logs, Bus};

fn restore(snap: &NetworkSnapshot) -> Result<Registry, RestoreError> {
    Registry::restore(snap, &standard_library(), EngineConfig::default())
}

#[test]
fn json_round_trip_restores_identical_network() {
    let mut bus = Bus::new().unwrap();
    bus.net.set_source(bus.left, Value::High).unwrap();
    bus.net.set_source(bus.right, Value::Low).unwrap();
    let snap = bus.net.export();

    let json = serde_json::to_string_pretty(&snap).unwrap();
    let parsed: NetworkSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, snap);

    let back = restore(&parsed).unwrap();
    assert!(compare_values(&snap, &back.export()).is_empty());
    assert_eq!(back.export(), snap);
}

#[test]
fn restored_network_keeps_propagating() {
    let mut bus = Bus::new().unwrap();
    bus.net.set_source(bus.left, Value::High).unwrap();
    bus.net.set_source(bus.right, Value::Low).unwrap();

    let mut back = restore(&bus.net.export()).unwrap();
    assert_eq!(back.sink_value(bus.sink), Ok(Value::Conflict));

    back.set_source(bus.left, Value::Floating).unwrap();
    assert_eq!(back.sink_value(bus.sink), Ok(Value::Low));

    let j = back.create_junction();
    assert!(j > bus.junction);
    let w = back.connect(j, bus.junction).unwrap();
    assert!(bus.wires.iter().all(|&old| w > old));
    assert_eq!(back.value(j), Ok(Value::Low));
}

#[test]
fn divergence_reported_after_edit() {
    let mut net = Registry::new();
    let src = net.add_component(Source);
    let sink = net.add_component(Sink);
    let out = net.output(src, 0).unwrap();
    let pin = net.input(sink, 0).unwrap();
    let w = net.connect(out, pin).unwrap();
    let before = net.export();

    net.set_source(src, Value::High).unwrap();
    let diverged: Vec<EntityId> = compare_values(&before, &net.export())
        .into_iter()
        .map(|d| d.entity)
        .collect();
    assert_eq!(diverged, [EntityId::from(out), EntityId::from(pin), EntityId::from(w)]);
}

#[test]
fn stale_recorded_values_are_re_resolved() {
    let bus = Bus::new().unwrap();
    let mut snap = bus.net.export();
    for rec in &mut snap.connectors {
        if rec.id == bus.junction {
            rec.value = Value::High;
        }
    }
    let back = restore(&snap).unwrap();
    assert_eq!(back.value(bus.junction), Ok(Value::Floating));
}

#[test]
fn recorded_drive_level_survives_restore() {
    let mut net = Registry::new();
    let src = net.add_component(Source);
    net.set_source(src, Value::Low).unwrap();
    let snap = net.export();
    let out = net.output(src, 0).unwrap();
    assert!(snap.connectors.iter().any(|c| c.id == out
        && c.value == Value::Low
        && c.kind
            == ConnectorKindRecord::Output {
                index: 0,
                name: "Y".into(),
            }));

    let mut back = restore(&snap).unwrap();
    let j = back.create_junction();
    back.connect(out, j).unwrap();
    assert_eq!(back.value(j), Ok(Value::Low));
}

#[test]
fn unknown_tag_warns_and_keeps_pins() {
    let mut net = Registry::new();
    let nand = net.add_component(Nand::default());
    let src = net.add_component(Source);
    net.connect(net.output(src, 0).unwrap(), net.input(nand, 1).unwrap())
        .unwrap();
    let snap = net.export();

    let (logs, _guard) = capture_logs(Level::WARN);
    let mut back = Registry::restore(&snap, &GateLibrary::new(), EngineConfig::default()).unwrap();
    assert!(logs.contents().contains("unknown gate tag"));

    let comp = back.component(nand).unwrap();
    assert_eq!(comp.tag(), "NandGate");
    assert_eq!(comp.gate().tag(), "NandGate");
    assert_eq!(back.export(), snap);

    // The placeholder never drives its output.
    back.set_source(src, Value::Low).unwrap();
    assert_eq!(back.value(back.output(nand, 0).unwrap()), Ok(Value::Floating));
}

#[test]
fn malformed_snapshot_rejected_before_restore() {
    let bus = Bus::new().unwrap();
    let mut snap = bus.net.export();
    snap.wires[0].b = ConnectorId(999);
    match restore(&snap) {
        Err(RestoreError::Snapshot(SnapshotError::DanglingConnector { connector, .. })) => {
            assert_eq!(connector, ConnectorId(999))
        }
        other => panic!("expected DanglingConnector, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn invalid_config_rejected() {
    let snap = NetworkSnapshot::default();
    let config = EngineConfig {
        max_reentry: 0,
        ..EngineConfig::default()
    };
    match Registry::restore(&snap, &standard_library(), config) {
        Err(RestoreError::Config(_)) => {}
        other => panic!("expected Config error, got {:?}", other.map(|_| ())),
    }
}
