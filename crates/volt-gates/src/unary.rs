//! Single-input gates.

use volt_core::Value;
use volt_gate::{Gate, PinLayout};

/// Passes a level through. Anything that is not a level becomes
/// CONFLICT.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Buffer;

impl Buffer {
    /// Class tag.
    pub const TAG: &'static str = "Buffer";
}

impl Gate for Buffer {
    fn tag(&self) -> &str {
        Self::TAG
    }

    fn layout(&self) -> PinLayout {
        PinLayout::lettered(1)
    }

    fn evaluate(&self, inputs: &[Value], outputs: &mut [Value]) {
        debug_assert_eq!(
            (inputs.len(), outputs.len()),
            (1, 1),
            "single-input gates have one pin per side"
        );
        outputs[0] = if inputs[0].is_level() {
            inputs[0]
        } else {
            Value::Conflict
        };
    }
}

/// Logical NOT.
///
/// | A | Y |
/// |---|---|
/// | 1 | 0 |
/// | 0 | 1 |
/// | Z | X |
/// | X | X |
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Inverter;

impl Inverter {
    /// Class tag.
    pub const TAG: &'static str = "Inverter";
}

impl Gate for Inverter {
    fn tag(&self) -> &str {
        Self::TAG
    }

    fn layout(&self) -> PinLayout {
        PinLayout::lettered(1)
    }

    fn evaluate(&self, inputs: &[Value], outputs: &mut [Value]) {
        debug_assert_eq!(
            (inputs.len(), outputs.len()),
            (1, 1),
            "single-input gates have one pin per side"
        );
        outputs[0] = !inputs[0];
    }
}
