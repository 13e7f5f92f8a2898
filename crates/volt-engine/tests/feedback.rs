//! Feedback loops: stable latches settle, oscillators hit the re-entry
//! limit, and long acyclic paths are never mistaken for either.

use volt_core::{ConnectorId, NetError, Value};
use volt_engine::{EngineConfig, Registry};
use volt_gates::{Inverter, Or, Sink, Source};
use volt_test_utils::{capture_logs, Chain};

use Value::{High as H, Low as L};

fn ring_oscillator(config: EngineConfig) -> (Registry, ConnectorId) {
    let mut net = Registry::with_config(config).unwrap();
    let inv = net.add_component(Inverter);
    let input = net.input(inv, 0).unwrap();
    net.connect(net.output(inv, 0).unwrap(), input).unwrap();
    (net, input)
}

fn reentry(limit: usize) -> EngineConfig {
    EngineConfig {
        max_reentry: limit,
        ..EngineConfig::default()
    }
}

#[test]
fn self_inverting_loop_stops_at_reentry_limit() {
    let (mut net, input) = ring_oscillator(reentry(64));
    assert_eq!(
        net.write(input, H),
        Err(NetError::ReentryLimit {
            connector: input,
            limit: 64
        })
    );
}

#[test]
fn reentry_limit_is_logged() {
    let (mut net, input) = ring_oscillator(reentry(16));
    let (logs, _guard) = capture_logs(tracing::Level::WARN);
    let _ = net.write(input, L);
    assert!(logs.contents().contains("re-entry limit exceeded"));
}

#[test]
fn registry_stays_usable_after_reentry_error() {
    let (mut net, input) = ring_oscillator(EngineConfig::default());
    assert!(net.write(input, H).is_err());

    let src = net.add_component(Source);
    let sink = net.add_component(Sink);
    net.connect(net.output(src, 0).unwrap(), net.input(sink, 0).unwrap())
        .unwrap();
    net.set_source(src, L).unwrap();
    assert_eq!(net.sink_value(sink), Ok(L));
}

#[test]
fn or_latch_holds_high() {
    let mut net = Registry::new();
    let src = net.add_component(Source);
    let or = net.add_component(Or::default());
    let sink = net.add_component(Sink);
    let out = net.output(or, 0).unwrap();
    net.connect(net.output(src, 0).unwrap(), net.input(or, 0).unwrap())
        .unwrap();
    net.connect(out, net.input(or, 1).unwrap()).unwrap();
    net.connect(out, net.input(sink, 0).unwrap()).unwrap();

    net.set_source(src, H).unwrap();
    assert_eq!(net.sink_value(sink), Ok(H));

    net.set_source(src, L).unwrap();
    assert_eq!(net.sink_value(sink), Ok(H));
}

#[test]
fn chain_never_reenters_a_connector() {
    let mut chain = Chain::with_config(40, reentry(1)).unwrap();
    chain.net.set_source(chain.source, H).unwrap();
    assert_eq!(chain.net.sink_value(chain.sink), Ok(H));
    chain.net.set_source(chain.source, L).unwrap();
    assert_eq!(chain.net.sink_value(chain.sink), Ok(L));
}

#[test]
fn long_chain_settles_under_default_config() {
    // Every hop nests a few calls; give the recursion a roomy stack.
    let settled = std::thread::Builder::new()
        .stack_size(64 * 1024 * 1024)
        .spawn(|| {
            let mut chain = Chain::new(300).unwrap();
            chain.net.set_source(chain.source, H).unwrap();
            let high = chain.net.sink_value(chain.sink);
            chain.net.set_source(chain.source, L).unwrap();
            (high, chain.net.sink_value(chain.sink))
        })
        .unwrap()
        .join()
        .unwrap();
    assert_eq!(settled, (Ok(H), Ok(L)));
}
