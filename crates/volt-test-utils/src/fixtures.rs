//! Reusable test circuits.
//!
//! - [`GateHarness`]: one source per input of a gate under test, and a
//!   sink on its first output.
//! - [`Chain`]: a source feeding `n` inverters in series into a sink.
//! - [`Bus`]: two sources sharing a junction that feeds a sink.

use volt_core::{ComponentId, ConnectorId, NetError, Value, WireId};
use volt_engine::{EngineConfig, Registry};
use volt_gate::Gate;
use volt_gates::{Inverter, Sink, Source};

/// Sources wired to every input of one gate, a sink on its output.
///
/// The gate is evaluated once on construction so its output reflects
/// all-floating inputs from the start.
pub struct GateHarness {
    pub net: Registry,
    pub sources: Vec<ComponentId>,
    pub gate: ComponentId,
    pub sink: ComponentId,
}

impl GateHarness {
    pub fn new<G: Gate>(gate: G) -> Result<Self, NetError> {
        let mut net = Registry::new();
        let gate = net.add_component(gate);
        let inputs = net.component(gate)?.inputs().len();
        let mut sources = Vec::with_capacity(inputs);
        for i in 0..inputs {
            let src = net.add_component(Source);
            net.connect(net.output(src, 0)?, net.input(gate, i)?)?;
            sources.push(src);
        }
        let sink = net.add_component(Sink);
        net.connect(net.output(gate, 0)?, net.input(sink, 0)?)?;
        net.recompute(gate)?;
        Ok(Self {
            net,
            sources,
            gate,
            sink,
        })
    }

    /// Drive every source, then read the sink.
    pub fn apply(&mut self, inputs: &[Value]) -> Result<Value, NetError> {
        for (&src, &v) in self.sources.iter().zip(inputs) {
            self.net.set_source(src, v)?;
        }
        self.net.sink_value(self.sink)
    }
}

/// A source, `n` inverters in series, and a sink.
pub struct Chain {
    pub net: Registry,
    pub source: ComponentId,
    pub inverters: Vec<ComponentId>,
    pub sink: ComponentId,
}

impl Chain {
    pub fn new(n: usize) -> Result<Self, NetError> {
        Self::with_config(n, EngineConfig::default())
    }

    /// Panics if `config` is invalid.
    pub fn with_config(n: usize, config: EngineConfig) -> Result<Self, NetError> {
        let mut net = Registry::with_config(config).expect("chain fixture needs a valid config");
        let source = net.add_component(Source);
        let mut prev = net.output(source, 0)?;
        let mut inverters = Vec::with_capacity(n);
        for _ in 0..n {
            let inv = net.add_component(Inverter);
            net.connect(prev, net.input(inv, 0)?)?;
            prev = net.output(inv, 0)?;
            inverters.push(inv);
        }
        let sink = net.add_component(Sink);
        net.connect(prev, net.input(sink, 0)?)?;
        Ok(Self {
            net,
            source,
            inverters,
            sink,
        })
    }
}

/// Two sources on one junction, read by a sink.
pub struct Bus {
    pub net: Registry,
    pub left: ComponentId,
    pub right: ComponentId,
    pub junction: ConnectorId,
    pub sink: ComponentId,
    pub wires: [WireId; 3],
}

impl Bus {
    pub fn new() -> Result<Self, NetError> {
        let mut net = Registry::new();
        let left = net.add_component(Source);
        let right = net.add_component(Source);
        let sink = net.add_component(Sink);
        let junction = net.create_junction();
        let wires = [
            net.connect(net.output(left, 0)?, junction)?,
            net.connect(net.output(right, 0)?, junction)?,
            net.connect(junction, net.input(sink, 0)?)?,
        ];
        Ok(Self {
            net,
            left,
            right,
            junction,
            sink,
            wires,
        })
    }
}
