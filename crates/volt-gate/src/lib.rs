//! Gate trait and gate library registry for Volt networks.
//!
//! A [`Gate`] is the pure recombination function behind a component:
//! it declares a fixed [`PinLayout`] and maps the current input levels
//! to new output levels. The [`GateLibrary`] maps class tags back to
//! constructors so snapshots can be restored, degrading to a
//! [`Placeholder`] when a tag is unknown.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod gate;
pub mod library;
pub mod placeholder;

pub use gate::{Gate, PinLayout};
pub use library::{GateFactory, GateLibrary};
pub use placeholder::Placeholder;
