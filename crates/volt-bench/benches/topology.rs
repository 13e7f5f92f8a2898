//! Criterion benchmarks for wiring and unwiring under load.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use volt_bench::{junction_grid, wide_bus};
use volt_core::Value;

fn bench_connect_destroy_on_bus(c: &mut Criterion) {
    let mut p = wide_bus(32).unwrap();
    for &src in &p.sources {
        p.net.set_source(src, Value::Low).unwrap();
    }
    let out = p.net.output(p.sources[0], 0).unwrap();
    c.bench_function("bus_32_connect_destroy", |b| {
        b.iter(|| {
            let j = p.net.create_junction();
            let w = p.net.connect(out, j).unwrap();
            black_box(p.net.value(j).unwrap());
            p.net.remove_junction(j).unwrap();
            black_box(w);
        });
    });
}

fn bench_split_and_rejoin_grid(c: &mut Criterion) {
    let mut p = junction_grid(12, 12).unwrap();
    p.net.set_source(p.sources[0], Value::High).unwrap();
    let out = p.net.output(p.sources[0], 0).unwrap();
    let corner = p.net.connector(out).unwrap().wires()[0];
    let (_, first) = p.net.wire(corner).unwrap().endpoints();
    c.bench_function("grid_12x12_detach_reattach_source", |b| {
        b.iter(|| {
            let w = p.net.connector(out).unwrap().wires()[0];
            p.net.destroy_wire(w).unwrap();
            black_box(p.net.sink_value(p.sink).unwrap());
            p.net.connect(out, first).unwrap();
        });
    });
}

criterion_group!(benches, bench_connect_destroy_on_bus, bench_split_and_rejoin_grid);
criterion_main!(benches);
