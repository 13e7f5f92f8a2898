//! Snapshot records for Volt networks.
//!
//! A [`NetworkSnapshot`] is a flat, id-keyed description of every
//! connector, component and wire in a registry. The engine produces one
//! with `Registry::export` and rebuilds a registry from one with its
//! three-phase restore.
//!
//! # Architecture
//!
//! - [`ConnectorRecord`], [`ComponentRecord`], [`WireRecord`] mirror the
//!   arena entities, with every cross reference stored as an id
//! - [`NetworkSnapshot::validate`] checks referential integrity before
//!   any restore phase runs
//! - [`compare_values`] reports per-entity value differences between
//!   two snapshots
//!
//! All records derive serde's `Serialize`/`Deserialize`. Choosing a
//! document format is left to the caller.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod compare;
pub mod error;
pub mod types;
mod validate;

pub use compare::{compare_values, ValueDivergence};
pub use error::SnapshotError;
pub use types::{ComponentRecord, ConnectorKindRecord, ConnectorRecord, NetworkSnapshot, WireRecord};

/// Current snapshot format version.
///
/// History:
/// - v1: initial record layout
pub const FORMAT_VERSION: u32 = 1;
