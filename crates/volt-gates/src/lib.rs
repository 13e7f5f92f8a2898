//! Standard gate library for Volt networks.
//!
//! Every gate here is a total function over the four-valued domain:
//!
//! - [`Source`] / [`Sink`]: the network's external terminals.
//! - [`Buffer`] / [`Inverter`]: single-input pass-through and negation.
//! - [`And`], [`Or`], [`Nand`], [`Nor`], [`Xor`]: reductions over two
//!   or more inputs.
//!
//! [`standard_library()`] registers all of them under their class tags
//! for snapshot restore.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod io;
pub mod reduce;
pub mod unary;

pub use io::{Sink, Source};
pub use reduce::{And, Nand, Nor, Or, Xor};
pub use unary::{Buffer, Inverter};

use volt_gate::{Gate, GateLibrary};

fn boxed<G: Gate>(gate: G) -> Box<dyn Gate> {
    Box::new(gate)
}

/// A [`GateLibrary`] with every gate in this crate registered.
pub fn standard_library() -> GateLibrary {
    let mut lib = GateLibrary::new();
    lib.register(Source::TAG, |_, _| Some(boxed(Source)))
        .register(Sink::TAG, |_, _| Some(boxed(Sink)))
        .register(Buffer::TAG, |_, _| Some(boxed(Buffer)))
        .register(Inverter::TAG, |_, _| Some(boxed(Inverter)))
        .register(And::TAG, |n, _| And::with_inputs(n).map(boxed))
        .register(Or::TAG, |n, _| Or::with_inputs(n).map(boxed))
        .register(Nand::TAG, |n, _| Nand::with_inputs(n).map(boxed))
        .register(Nor::TAG, |n, _| Nor::with_inputs(n).map(boxed))
        .register(Xor::TAG, |n, _| Xor::with_inputs(n).map(boxed));
    lib
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_library_round_trips_tags() {
        let lib = standard_library();
        for tag in lib.tags().collect::<Vec<_>>() {
            let (inputs, outputs) = match tag {
                "Source" => (0, 1),
                "Sink" => (1, 0),
                "Buffer" | "Inverter" => (1, 1),
                _ => (3, 1),
            };
            let gate = lib.instantiate(tag, inputs, outputs);
            assert_eq!(gate.tag(), tag);
        }
    }

    #[test]
    fn and_with_one_input_is_placeholder() {
        let lib = standard_library();
        let gate = lib.instantiate(And::TAG, 1, 1);
        let mut out = [volt_core::Value::Floating];
        gate.evaluate(&[volt_core::Value::High], &mut out);
        assert_eq!(out, [volt_core::Value::Floating]);
    }
}
