//! Benchmark profiles for the Volt logic network simulator.
//!
//! Each profile builds a [`Registry`] sized for one propagation pattern:
//!
//! - [`inverter_chain`]: a long series path, one gate evaluation per hop
//! - [`wide_bus`]: many drivers on one junction, a wide driver search
//! - [`junction_grid`]: a meshed net full of cycles
//!
//! All profiles run under the default [`EngineConfig`](volt_engine::EngineConfig).

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use volt_core::{ComponentId, ConnectorId, NetError};
use volt_engine::Registry;
use volt_gates::{Inverter, Sink, Source};

/// A built network with the handles a benchmark drives and reads.
#[derive(Debug)]
pub struct Profile {
    /// The network.
    pub net: Registry,
    /// Sources, in creation order.
    pub sources: Vec<ComponentId>,
    /// The sink observing the far end.
    pub sink: ComponentId,
}

/// A source, `n` inverters in series, and a sink.
///
/// Each hop costs two nested writes (input pin, then output pin).
pub fn inverter_chain(n: usize) -> Result<Profile, NetError> {
    let mut net = Registry::new();
    let source = net.add_component(Source);
    let mut prev = net.output(source, 0)?;
    for _ in 0..n {
        let inv = net.add_component(Inverter);
        net.connect(prev, net.input(inv, 0)?)?;
        prev = net.output(inv, 0)?;
    }
    let sink = net.add_component(Sink);
    net.connect(prev, net.input(sink, 0)?)?;
    Ok(Profile {
        net,
        sources: vec![source],
        sink,
    })
}

/// `drivers` sources sharing one junction, read by a sink.
pub fn wide_bus(drivers: usize) -> Result<Profile, NetError> {
    let mut net = Registry::new();
    let junction = net.create_junction();
    let mut sources = Vec::with_capacity(drivers);
    for _ in 0..drivers {
        let src = net.add_component(Source);
        net.connect(net.output(src, 0)?, junction)?;
        sources.push(src);
    }
    let sink = net.add_component(Sink);
    net.connect(junction, net.input(sink, 0)?)?;
    Ok(Profile {
        net,
        sources,
        sink,
    })
}

/// A `rows` x `cols` mesh of junctions, each wired to its right and
/// lower neighbour. One source drives the top-left corner and a sink
/// reads the bottom-right one.
pub fn junction_grid(rows: usize, cols: usize) -> Result<Profile, NetError> {
    let mut net = Registry::new();
    let grid: Vec<ConnectorId> = (0..rows * cols).map(|_| net.create_junction()).collect();
    for r in 0..rows {
        for c in 0..cols {
            let here = grid[r * cols + c];
            if c + 1 < cols {
                net.connect(here, grid[r * cols + c + 1])?;
            }
            if r + 1 < rows {
                net.connect(here, grid[(r + 1) * cols + c])?;
            }
        }
    }
    let source = net.add_component(Source);
    net.connect(net.output(source, 0)?, grid[0])?;
    let sink = net.add_component(Sink);
    if let Some(&corner) = grid.last() {
        net.connect(corner, net.input(sink, 0)?)?;
    }
    Ok(Profile {
        net,
        sources: vec![source],
        sink,
    })
}

#[cfg(test)]
mod tests {
    use volt_core::Value;

    use super::*;

    #[test]
    fn chain_settles_under_default_config() {
        let mut p = inverter_chain(100).unwrap();
        p.net.set_source(p.sources[0], Value::High).unwrap();
        assert_eq!(p.net.sink_value(p.sink), Ok(Value::High));
    }

    #[test]
    fn bus_with_two_levels_conflicts() {
        let mut p = wide_bus(8).unwrap();
        for (i, &src) in p.sources.iter().enumerate() {
            p.net.set_source(src, Value::from(i % 2 == 0)).unwrap();
        }
        assert_eq!(p.net.sink_value(p.sink), Ok(Value::Conflict));
    }

    #[test]
    fn grid_carries_corner_level() {
        let mut p = junction_grid(6, 6).unwrap();
        p.net.set_source(p.sources[0], Value::Low).unwrap();
        assert_eq!(p.net.sink_value(p.sink), Ok(Value::Low));
        assert!(p.net.wires().all(|w| w.value() == Value::Low));
    }
}
