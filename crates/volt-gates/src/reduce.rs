//! Multi-input reductions: AND, OR, their negations, and XOR.
//!
//! Each gate takes two or more inputs and drives a single output `Y`.
//! FLOATING inputs are treated like CONFLICT unless a dominant input
//! already decides the result.

use volt_core::Value;
use volt_gate::{Gate, PinLayout};

/// Minimum fan-in for every reduction gate.
pub const MIN_INPUTS: usize = 2;

macro_rules! reduction_gate {
    ($(#[$meta:meta])* $name:ident, $tag:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub struct $name {
            inputs: usize,
        }

        impl $name {
            /// Class tag.
            pub const TAG: &'static str = $tag;

            /// A gate with `n` inputs, or `None` if `n` is below
            /// [`MIN_INPUTS`].
            pub fn with_inputs(n: usize) -> Option<Self> {
                (n >= MIN_INPUTS).then_some(Self { inputs: n })
            }

            /// Number of input pins.
            pub fn inputs(&self) -> usize {
                self.inputs
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self { inputs: MIN_INPUTS }
            }
        }
    };
}

reduction_gate!(
    /// Any LOW gives LOW; otherwise any CONFLICT or FLOATING gives
    /// CONFLICT; otherwise HIGH.
    And,
    "AndGate"
);
reduction_gate!(
    /// Any HIGH gives HIGH; otherwise any CONFLICT or FLOATING gives
    /// CONFLICT; otherwise LOW.
    Or,
    "OrGate"
);
reduction_gate!(
    /// Negated [`And`].
    Nand,
    "NandGate"
);
reduction_gate!(
    /// Negated [`Or`].
    Nor,
    "NorGate"
);
reduction_gate!(
    /// HIGH when an odd number of inputs are HIGH. Any CONFLICT or
    /// FLOATING input gives CONFLICT.
    Xor,
    "XorGate"
);

/// `dominant` if any input carries it, CONFLICT if any input is not a
/// level, otherwise the opposite of `dominant`.
fn dominated(inputs: &[Value], dominant: Value) -> Value {
    if inputs.contains(&dominant) {
        dominant
    } else if inputs.iter().all(|v| v.is_level()) {
        !dominant
    } else {
        Value::Conflict
    }
}

fn parity(inputs: &[Value]) -> Value {
    if inputs.iter().all(|v| v.is_level()) {
        Value::from(inputs.iter().filter(|&&v| v == Value::High).count() % 2 == 1)
    } else {
        Value::Conflict
    }
}

impl Gate for And {
    fn tag(&self) -> &str {
        Self::TAG
    }

    fn layout(&self) -> PinLayout {
        PinLayout::lettered(self.inputs)
    }

    fn evaluate(&self, inputs: &[Value], outputs: &mut [Value]) {
        debug_assert_eq!(outputs.len(), 1, "reduction gates have one output");
        outputs[0] = dominated(inputs, Value::Low);
    }
}

impl Gate for Or {
    fn tag(&self) -> &str {
        Self::TAG
    }

    fn layout(&self) -> PinLayout {
        PinLayout::lettered(self.inputs)
    }

    fn evaluate(&self, inputs: &[Value], outputs: &mut [Value]) {
        debug_assert_eq!(outputs.len(), 1, "reduction gates have one output");
        outputs[0] = dominated(inputs, Value::High);
    }
}

impl Gate for Nand {
    fn tag(&self) -> &str {
        Self::TAG
    }

    fn layout(&self) -> PinLayout {
        PinLayout::lettered(self.inputs)
    }

    fn evaluate(&self, inputs: &[Value], outputs: &mut [Value]) {
        debug_assert_eq!(outputs.len(), 1, "reduction gates have one output");
        outputs[0] = !dominated(inputs, Value::Low);
    }
}

impl Gate for Nor {
    fn tag(&self) -> &str {
        Self::TAG
    }

    fn layout(&self) -> PinLayout {
        PinLayout::lettered(self.inputs)
    }

    fn evaluate(&self, inputs: &[Value], outputs: &mut [Value]) {
        debug_assert_eq!(outputs.len(), 1, "reduction gates have one output");
        outputs[0] = !dominated(inputs, Value::High);
    }
}

impl Gate for Xor {
    fn tag(&self) -> &str {
        Self::TAG
    }

    fn layout(&self) -> PinLayout {
        PinLayout::lettered(self.inputs)
    }

    fn evaluate(&self, inputs: &[Value], outputs: &mut [Value]) {
        debug_assert_eq!(outputs.len(), 1, "reduction gates have one output");
        outputs[0] = parity(inputs);
    }
}
