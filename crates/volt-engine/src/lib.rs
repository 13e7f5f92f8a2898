//! Registry and propagation engine for Volt logic networks.
//!
//! A [`Registry`] owns every connector, wire and component of one
//! network. Edits go through it (create a junction, add a component,
//! connect or destroy a wire, drive a source) and each edit resolves
//! values outward synchronously until nothing changes:
//!
//! - a node's value is computed from the output pins actively driving
//!   its net: none floats, one wins, two or more conflict
//! - a component recomputes whenever one of its input pins changes
//! - observers and change feeds see every value and topology change
//!
//! [`Registry::export`] flattens the arena into a
//! [`NetworkSnapshot`](volt_snapshot::NetworkSnapshot) and
//! [`Restore`] rebuilds one in three type-enforced phases.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod component;
pub mod config;
pub mod connector;
pub mod observer;
mod propagate;
pub mod registry;
pub mod snapshot;
pub mod wire;

pub use component::Component;
pub use config::{ConfigError, EngineConfig};
pub use connector::{Connector, ConnectorKind, PinSlot};
pub use observer::{Change, ChangeKind, Observer, SubscriptionId};
pub use registry::Registry;
pub use snapshot::{AwaitingComponents, AwaitingConnectors, AwaitingWires, Restore, RestoreError};
pub use wire::Wire;
