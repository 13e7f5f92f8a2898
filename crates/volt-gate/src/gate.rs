//! The [`Gate`] trait and [`PinLayout`].

use smallvec::SmallVec;
use volt_core::{PinDirection, Value};

/// Names of a gate's input and output pins, in pin-index order.
///
/// The lengths are the component's fixed pin counts; pins are never
/// added or removed after construction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PinLayout {
    /// Input pin names.
    pub inputs: SmallVec<[String; 4]>,
    /// Output pin names.
    pub outputs: SmallVec<[String; 2]>,
}

impl PinLayout {
    /// Build a layout from pin names.
    pub fn new<I, O>(inputs: I, outputs: O) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        O: IntoIterator,
        O::Item: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            outputs: outputs.into_iter().map(Into::into).collect(),
        }
    }

    /// `n` inputs named `A`, `B`, `C`, ... (falling back to `I<n>` past
    /// `Z`) and a single output named `Y`.
    pub fn lettered(n: usize) -> Self {
        let inputs = (0..n).map(|i| match u8::try_from(i) {
            Ok(i) if i < 26 => char::from(b'A' + i).to_string(),
            _ => format!("I{i}"),
        });
        Self::new(inputs, ["Y"])
    }

    /// Number of pins on one side.
    pub fn count(&self, direction: PinDirection) -> usize {
        match direction {
            PinDirection::Input => self.inputs.len(),
            PinDirection::Output => self.outputs.len(),
        }
    }
}

/// A pure combinational function with a fixed pin layout.
///
/// # Contract
///
/// - `evaluate()` MUST be total over the four-valued domain: every input
///   vector produces a defined output for every output pin.
/// - `evaluate()` MUST be side-effect free. All observable effects are
///   the engine's writes of `outputs` into the output pins.
/// - `layout()` is called once, when the component is created.
///
/// # Object safety
///
/// This trait is object-safe; the registry stores gates as
/// `Box<dyn Gate>`.
///
/// # Examples
///
/// A two-input gate that is high only when its inputs differ:
///
/// ```
/// use volt_core::Value;
/// use volt_gate::{Gate, PinLayout};
///
/// struct Differ;
///
/// impl Gate for Differ {
///     fn tag(&self) -> &str { "Differ" }
///
///     fn layout(&self) -> PinLayout { PinLayout::lettered(2) }
///
///     fn evaluate(&self, inputs: &[Value], outputs: &mut [Value]) {
///         outputs[0] = match (inputs[0], inputs[1]) {
///             (a, b) if a.is_level() && b.is_level() => Value::from(a != b),
///             _ => Value::Conflict,
///         };
///     }
/// }
///
/// let mut out = [Value::Floating];
/// Differ.evaluate(&[Value::High, Value::Low], &mut out);
/// assert_eq!(out, [Value::High]);
/// ```
pub trait Gate: Send + 'static {
    /// Class tag identifying the gate type in snapshots.
    fn tag(&self) -> &str;

    /// Pin names, which also fix the pin counts.
    fn layout(&self) -> PinLayout;

    /// Compute new output levels from the current input levels.
    ///
    /// `inputs` has one entry per input pin. `outputs` has one entry per
    /// output pin, pre-filled with the levels the component currently
    /// drives; entries left untouched keep driving their current level.
    fn evaluate(&self, inputs: &[Value], outputs: &mut [Value]);
}
