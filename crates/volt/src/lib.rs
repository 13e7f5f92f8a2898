//! Volt: a discrete digital-logic network simulator.
//!
//! This is the facade crate re-exporting the public API of the Volt
//! sub-crates. Networks are built from components (gates with input and
//! output pins), free-standing junctions and the wires joining them.
//! Every node carries one of four values (HIGH, LOW, CONFLICT, FLOATING)
//! and changes propagate eagerly through the network.
//!
//! # Quick start
//!
//! ```rust
//! use volt::prelude::*;
//!
//! let mut net = Registry::new();
//! let a = net.add_component(Source);
//! let b = net.add_component(Source);
//! let nand = net.add_component(Nand::default());
//! let led = net.add_component(Sink);
//!
//! net.connect(net.output(a, 0)?, net.input(nand, 0)?)?;
//! net.connect(net.output(b, 0)?, net.input(nand, 1)?)?;
//! net.connect(net.output(nand, 0)?, net.input(led, 0)?)?;
//!
//! net.set_source(a, Value::High)?;
//! net.set_source(b, Value::High)?;
//! assert_eq!(net.sink_value(led)?, Value::Low);
//!
//! net.set_source(b, Value::Low)?;
//! assert_eq!(net.sink_value(led)?, Value::High);
//!
//! // Round-trip through a snapshot.
//! let snap = net.export();
//! let back = Registry::restore(&snap, &standard_library(), EngineConfig::default())?;
//! assert_eq!(back.sink_value(led)?, Value::High);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `volt-core` | Values, ids, callers, errors |
//! | [`gate`] | `volt-gate` | `Gate` trait, pin layouts, gate library |
//! | [`gates`] | `volt-gates` | Standard sources, sinks and logic gates |
//! | [`snapshot`] | `volt-snapshot` | Serializable network records and validation |
//! | [`engine`] | `volt-engine` | Registry, propagation and observers |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Values, ids and errors (`volt-core`).
pub use volt_core as types;

/// The [`gate::Gate`] trait and the tag-keyed [`gate::GateLibrary`]
/// (`volt-gate`).
pub use volt_gate as gate;

/// Standard gate implementations (`volt-gates`).
///
/// [`gates::standard_library`] registers all of them under their tags.
pub use volt_gates as gates;

/// Flat network records for persistence (`volt-snapshot`).
pub use volt_snapshot as snapshot;

/// The network registry and propagation engine (`volt-engine`).
pub use volt_engine as engine;

/// Common imports for building and driving networks.
///
/// ```rust
/// use volt::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use volt_core::{
        Caller, ComponentId, ConnectorId, EntityId, NetError, PinDirection, Position, Value,
        WireId,
    };

    // Gates
    pub use volt_gate::{Gate, GateLibrary, PinLayout};
    pub use volt_gates::{
        standard_library, And, Buffer, Inverter, Nand, Nor, Or, Sink, Source, Xor,
    };

    // Snapshots
    pub use volt_snapshot::{compare_values, NetworkSnapshot};

    // Engine
    pub use volt_engine::{Change, ChangeKind, EngineConfig, Observer, Registry, RestoreError};
}
