//! Change notification through callbacks and channels.

use std::sync::{Arc, Mutex};

use volt_core::{EntityId, Position, Value};
use volt_engine::{Change, ChangeKind, Registry};
use volt_gates::{Sink, Source};

fn recorder() -> (Arc<Mutex<Vec<Change>>>, impl FnMut(&Change) + Send + 'static) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    (log, move |c: &Change| sink.lock().unwrap().push(*c))
}

#[test]
fn creation_is_reported_pins_first() {
    let mut net = Registry::new();
    let (log, observer) = recorder();
    net.subscribe(None, observer);

    let src = net.add_component(Source);
    let out = net.output(src, 0).unwrap();
    let j = net.create_junction();

    let log = log.lock().unwrap();
    assert_eq!(
        *log,
        [
            Change {
                entity: out.into(),
                kind: ChangeKind::Created
            },
            Change {
                entity: src.into(),
                kind: ChangeKind::Created
            },
            Change {
                entity: j.into(),
                kind: ChangeKind::Created
            },
        ]
    );
}

#[test]
fn value_changes_arrive_in_propagation_order() {
    let mut net = Registry::new();
    let src = net.add_component(Source);
    let sink = net.add_component(Sink);
    let out = net.output(src, 0).unwrap();
    let pin = net.input(sink, 0).unwrap();
    let w = net.connect(out, pin).unwrap();
    let feed = net.change_feed(None);

    net.set_source(src, Value::High).unwrap();
    let changes: Vec<_> = feed.try_iter().collect();
    assert_eq!(
        changes,
        [
            Change {
                entity: out.into(),
                kind: ChangeKind::Value(Value::High)
            },
            Change {
                entity: w.into(),
                kind: ChangeKind::Value(Value::High)
            },
            Change {
                entity: pin.into(),
                kind: ChangeKind::Value(Value::High)
            },
            Change {
                entity: sink.into(),
                kind: ChangeKind::Recomputed
            },
        ]
    );
}

#[test]
fn filter_limits_delivery_to_one_entity() {
    let mut net = Registry::new();
    let a = net.create_junction();
    let b = net.create_junction();
    net.connect(a, b).unwrap();
    let only_b = net.change_feed(Some(EntityId::Connector(b)));

    net.write(a, Value::Low).unwrap();
    net.set_connector_position(a, Position::new(1.0, 1.0)).unwrap();

    let changes: Vec<_> = only_b.try_iter().collect();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].entity, EntityId::Connector(b));
    assert_eq!(changes[0].kind, ChangeKind::Value(Value::Low));
}

#[test]
fn moves_are_reported() {
    let mut net = Registry::new();
    let src = net.add_component(Source);
    let feed = net.change_feed(Some(src.into()));
    let at = Position::new(40.0, -8.0);
    net.set_component_position(src, at).unwrap();
    assert_eq!(net.component(src).unwrap().position(), at);
    assert_eq!(
        feed.try_recv().map(|c| c.kind),
        Ok(ChangeKind::Moved(at))
    );
}

#[test]
fn destroyed_wire_reports_last() {
    let mut net = Registry::new();
    let src = net.add_component(Source);
    let j = net.create_junction();
    let w = net.connect(net.output(src, 0).unwrap(), j).unwrap();
    net.set_source(src, Value::High).unwrap();
    let feed = net.change_feed(None);

    net.destroy_wire(w).unwrap();
    let changes: Vec<_> = feed.try_iter().collect();
    assert_eq!(
        changes.last(),
        Some(&Change {
            entity: w.into(),
            kind: ChangeKind::Destroyed
        })
    );
    assert!(changes.contains(&Change {
        entity: j.into(),
        kind: ChangeKind::Value(Value::Floating)
    }));
}

#[test]
fn removing_component_reports_pins_then_component() {
    let mut net = Registry::new();
    let sink = net.add_component(Sink);
    let pin = net.input(sink, 0).unwrap();
    let feed = net.change_feed(None);
    net.remove_component(sink).unwrap();
    let kinds: Vec<_> = feed.try_iter().map(|c| (c.entity, c.kind)).collect();
    assert_eq!(
        kinds,
        [
            (EntityId::from(pin), ChangeKind::Destroyed),
            (EntityId::from(sink), ChangeKind::Destroyed)
        ]
    );
}

#[test]
fn unsubscribe_stops_delivery() {
    let mut net = Registry::new();
    let (log, observer) = recorder();
    let id = net.subscribe(None, observer);
    net.create_junction();
    assert!(net.unsubscribe(id));
    assert!(!net.unsubscribe(id));
    net.create_junction();
    assert_eq!(log.lock().unwrap().len(), 1);
}

#[test]
fn dropped_feed_is_pruned() {
    let mut net = Registry::new();
    let feed = net.change_feed(None);
    drop(feed);
    net.create_junction();
    assert!(format!("{net:?}").contains("subscriptions: 0"));
}
