//! Network terminals: [`Source`] and [`Sink`].
//!
//! Neither computes anything. A source's level is driven from outside
//! through `Registry::set_source`; a sink's level is whatever its input
//! pin resolved to.

use volt_core::Value;
use volt_gate::{Gate, PinLayout};

/// No inputs, one output driven externally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Source;

impl Source {
    /// Class tag.
    pub const TAG: &'static str = "Source";
}

impl Gate for Source {
    fn tag(&self) -> &str {
        Self::TAG
    }

    fn layout(&self) -> PinLayout {
        PinLayout::new(std::iter::empty::<&str>(), ["Y"])
    }

    fn evaluate(&self, _inputs: &[Value], _outputs: &mut [Value]) {}
}

/// One input, no outputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sink;

impl Sink {
    /// Class tag.
    pub const TAG: &'static str = "Sink";
}

impl Gate for Sink {
    fn tag(&self) -> &str {
        Self::TAG
    }

    fn layout(&self) -> PinLayout {
        PinLayout::new(["A"], std::iter::empty::<&str>())
    }

    fn evaluate(&self, _inputs: &[Value], _outputs: &mut [Value]) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_layout() {
        let layout = Source.layout();
        assert!(layout.inputs.is_empty());
        assert_eq!(layout.outputs.as_slice(), ["Y"]);
    }

    #[test]
    fn sink_layout() {
        let layout = Sink.layout();
        assert_eq!(layout.inputs.as_slice(), ["A"]);
        assert!(layout.outputs.is_empty());
    }

    #[test]
    fn source_keeps_driven_level() {
        let mut out = [Value::High];
        Source.evaluate(&[], &mut out);
        assert_eq!(out, [Value::High]);
    }
}
