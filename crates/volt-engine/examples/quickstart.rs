//! Volt quickstart: a half adder built from gates, driven through its
//! truth table, then saved and restored.
//!
//! Demonstrates:
//!   1. Adding components and junctions to a registry
//!   2. Fanning a shared input out through a junction
//!   3. Driving sources and reading sinks
//!   4. Watching changes through a change feed
//!   5. Exporting a snapshot and restoring it
//!
//! Run with:
//!   RUST_LOG=volt_engine=debug cargo run -p volt-engine --example quickstart

use tracing_subscriber::EnvFilter;
use volt_core::{ComponentId, EntityId, NetError, Value};
use volt_engine::{ChangeKind, EngineConfig, Registry};
use volt_gates::{standard_library, And, Sink, Source, Xor};

// ─── Circuit ────────────────────────────────────────────────────

struct HalfAdder {
    a: ComponentId,
    b: ComponentId,
    sum: ComponentId,
    carry: ComponentId,
}

fn build(net: &mut Registry) -> Result<HalfAdder, NetError> {
    let a = net.add_component_named("a", Source);
    let b = net.add_component_named("b", Source);
    let xor = net.add_component(Xor::default());
    let and = net.add_component(And::default());
    let sum = net.add_component_named("sum", Sink);
    let carry = net.add_component_named("carry", Sink);

    // Each input feeds both gates through its own junction.
    for (i, src) in [a, b].into_iter().enumerate() {
        let j = net.create_junction();
        net.connect(net.output(src, 0)?, j)?;
        net.connect(j, net.input(xor, i)?)?;
        net.connect(j, net.input(and, i)?)?;
    }
    net.connect(net.output(xor, 0)?, net.input(sum, 0)?)?;
    net.connect(net.output(and, 0)?, net.input(carry, 0)?)?;
    Ok(HalfAdder { a, b, sum, carry })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut net = Registry::new();
    let adder = build(&mut net)?;
    println!(
        "built {} components, {} connectors, {} wires",
        net.components().count(),
        net.connectors().count(),
        net.wires().count()
    );

    // ─── Truth table ────────────────────────────────────────────

    let feed = net.change_feed(Some(EntityId::Component(adder.sum)));
    println!(" a b | sum carry");
    for a in [Value::Low, Value::High] {
        for b in [Value::Low, Value::High] {
            net.set_source(adder.a, a)?;
            net.set_source(adder.b, b)?;
            println!(
                " {a} {b} |  {}    {}",
                net.sink_value(adder.sum)?,
                net.sink_value(adder.carry)?
            );
        }
    }
    let recomputes = feed
        .try_iter()
        .filter(|c| c.kind == ChangeKind::Recomputed)
        .count();
    println!("sum sink recomputed {recomputes} times");

    // Releasing one input leaves the gates with an undriven operand.
    net.set_source(adder.b, Value::Floating)?;
    println!(
        "b released: sum = {}, carry = {}",
        net.sink_value(adder.sum)?,
        net.sink_value(adder.carry)?
    );

    // ─── Snapshot ───────────────────────────────────────────────

    let snap = net.export();
    let mut restored = Registry::restore(&snap, &standard_library(), EngineConfig::default())?;
    restored.set_source(adder.b, Value::High)?;
    println!(
        "restored, b = 1: sum = {}, carry = {}",
        restored.sink_value(adder.sum)?,
        restored.sink_value(adder.carry)?
    );
    Ok(())
}
