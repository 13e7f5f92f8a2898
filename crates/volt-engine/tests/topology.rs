//! Values after wires, junctions and components are added and removed.

use volt_core::{EntityId, NetError, Value};
use volt_engine::Registry;
use volt_gates::{And, Sink, Source};
use volt_test_utils::Bus;

use Value::{Conflict as X, Floating as Z, High as H, Low as L};

#[test]
fn destroying_driver_wire_floats_the_rest() {
    let mut bus = Bus::new().unwrap();
    bus.net.set_source(bus.left, H).unwrap();
    bus.net.destroy_wire(bus.wires[0]).unwrap();
    assert_eq!(bus.net.value(bus.junction), Ok(Z));
    assert_eq!(bus.net.sink_value(bus.sink), Ok(Z));
    // The source keeps asserting its own level.
    assert_eq!(bus.net.value(bus.net.output(bus.left, 0).unwrap()), Ok(H));
}

#[test]
fn destroying_one_of_two_drivers_resolves_conflict() {
    let mut bus = Bus::new().unwrap();
    bus.net.set_source(bus.left, H).unwrap();
    bus.net.set_source(bus.right, L).unwrap();
    assert_eq!(bus.net.sink_value(bus.sink), Ok(X));

    bus.net.destroy_wire(bus.wires[1]).unwrap();
    assert_eq!(bus.net.sink_value(bus.sink), Ok(H));
    assert_eq!(bus.net.value(bus.net.output(bus.right, 0).unwrap()), Ok(L));
    assert_eq!(bus.net.value(bus.net.output(bus.left, 0).unwrap()), Ok(H));
}

#[test]
fn destroyed_wire_is_gone() {
    let mut bus = Bus::new().unwrap();
    let w = bus.wires[2];
    bus.net.destroy_wire(w).unwrap();
    assert_eq!(
        bus.net.wire_value(w),
        Err(NetError::NotFound(EntityId::Wire(w)))
    );
    assert!(!bus.net.connector(bus.junction).unwrap().wires().contains(&w));
    assert_eq!(bus.net.wires().count(), 2);
}

#[test]
fn joining_two_driven_nets_conflicts_until_split() {
    let mut net = Registry::new();
    let a = net.add_component(Source);
    let b = net.add_component(Source);
    let ja = net.create_junction();
    let jb = net.create_junction();
    net.connect(net.output(a, 0).unwrap(), ja).unwrap();
    net.connect(net.output(b, 0).unwrap(), jb).unwrap();
    net.set_source(a, H).unwrap();
    net.set_source(b, L).unwrap();

    let bridge = net.connect(ja, jb).unwrap();
    assert_eq!(net.wire_value(bridge), Ok(X));
    assert_eq!(net.value(ja), Ok(X));
    assert_eq!(net.value(jb), Ok(X));

    net.destroy_wire(bridge).unwrap();
    assert_eq!(net.value(ja), Ok(H));
    assert_eq!(net.value(jb), Ok(L));
}

#[test]
fn joining_driven_and_floating_nets_spreads_level() {
    let mut net = Registry::new();
    let src = net.add_component(Source);
    let sink = net.add_component(Sink);
    let ja = net.create_junction();
    let jb = net.create_junction();
    net.connect(net.output(src, 0).unwrap(), ja).unwrap();
    net.connect(jb, net.input(sink, 0).unwrap()).unwrap();
    net.set_source(src, L).unwrap();
    assert_eq!(net.sink_value(sink), Ok(Z));

    net.connect(jb, ja).unwrap();
    assert_eq!(net.sink_value(sink), Ok(L));
}

#[test]
fn cycle_of_junctions_settles() {
    let mut net = Registry::new();
    let src = net.add_component(Source);
    let ring: Vec<_> = (0..3).map(|_| net.create_junction()).collect();
    for i in 0..3 {
        net.connect(ring[i], ring[(i + 1) % 3]).unwrap();
    }
    net.connect(net.output(src, 0).unwrap(), ring[0]).unwrap();

    net.set_source(src, H).unwrap();
    assert!(ring.iter().all(|&j| net.value(j) == Ok(H)));
    assert!(net.wires().all(|w| w.value() == H));

    net.set_source(src, Z).unwrap();
    assert!(ring.iter().all(|&j| net.value(j) == Ok(Z)));
    assert!(net.wires().all(|w| w.value() == Z));
}

#[test]
fn wire_between_two_live_nodes_conflicts_until_removed() {
    let mut net = Registry::new();
    let src = net.add_component(Source);
    let out = net.output(src, 0).unwrap();
    let j = net.create_junction();
    net.set_source(src, H).unwrap();
    let first = net.connect(out, j).unwrap();
    assert_eq!(net.value(j), Ok(H));

    // Both ends already carry a level, even if it is the same one.
    let second = net.connect(out, j).unwrap();
    assert_eq!(net.wire_value(second), Ok(X));
    assert_eq!(net.wire_value(first), Ok(X));
    assert_eq!(net.value(j), Ok(X));
    assert_eq!(net.value(out), Ok(H));

    net.destroy_wire(second).unwrap();
    assert_eq!(net.value(j), Ok(H));
    assert_eq!(net.wire_value(first), Ok(H));
}

#[test]
fn output_fans_out_to_many_sinks() {
    let mut net = Registry::new();
    let src = net.add_component(Source);
    let out = net.output(src, 0).unwrap();
    let sinks: Vec<_> = (0..4).map(|_| net.add_component(Sink)).collect();
    for &s in &sinks {
        net.connect(out, net.input(s, 0).unwrap()).unwrap();
    }
    net.set_source(src, L).unwrap();
    assert!(sinks.iter().all(|&s| net.sink_value(s) == Ok(L)));
}

#[test]
fn removing_source_component_floats_its_net() {
    let mut bus = Bus::new().unwrap();
    bus.net.set_source(bus.left, H).unwrap();
    bus.net.set_source(bus.right, H).unwrap();
    bus.net.remove_component(bus.right).unwrap();
    assert_eq!(bus.net.sink_value(bus.sink), Ok(H));
    bus.net.remove_component(bus.left).unwrap();
    assert_eq!(bus.net.sink_value(bus.sink), Ok(Z));
    assert!(bus.net.component(bus.left).is_err());
}

#[test]
fn removing_junction_disconnects_everything() {
    let mut bus = Bus::new().unwrap();
    bus.net.set_source(bus.left, L).unwrap();
    bus.net.remove_junction(bus.junction).unwrap();
    assert_eq!(bus.net.sink_value(bus.sink), Ok(Z));
    assert_eq!(bus.net.wires().count(), 0);
    assert!(bus.net.connector(bus.junction).is_err());
}

#[test]
fn gate_output_recovers_after_input_rewired() {
    let mut net = Registry::new();
    let hi = net.add_component(Source);
    let lo = net.add_component(Source);
    let and = net.add_component(And::default());
    let sink = net.add_component(Sink);
    net.set_source(hi, H).unwrap();
    net.set_source(lo, L).unwrap();
    net.connect(net.output(hi, 0).unwrap(), net.input(and, 0).unwrap())
        .unwrap();
    net.connect(net.output(hi, 0).unwrap(), net.input(and, 1).unwrap())
        .unwrap();
    net.connect(net.output(and, 0).unwrap(), net.input(sink, 0).unwrap())
        .unwrap();
    assert_eq!(net.sink_value(sink), Ok(H));

    net.connect(net.output(lo, 0).unwrap(), net.input(and, 1).unwrap())
        .unwrap();
    assert_eq!(net.sink_value(sink), Ok(L));
    assert_eq!(net.connector(net.output(hi, 0).unwrap()).unwrap().wires().len(), 1);
}
