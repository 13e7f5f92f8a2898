//! Core types for the Volt logic network simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the four-valued logic domain, the strongly-typed entity identifiers
//! the registry hands out, and the error taxonomy shared by every other
//! crate in the workspace.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod value;

pub use error::{NetError, ProtocolViolation};
pub use id::{Caller, ComponentId, ConnectorId, EntityId, PinDirection, Position, WireId};
pub use value::{ParseValueError, Value};
