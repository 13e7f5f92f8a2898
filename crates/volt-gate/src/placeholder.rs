//! Stand-in gate for class tags the library does not know.

use crate::gate::{Gate, PinLayout};
use volt_core::Value;

/// A gate that keeps a foreign tag and pin geometry but never computes.
///
/// Restoring a snapshot that names an unknown gate produces one of these
/// instead of failing, so the rest of the network still comes back and
/// the tag survives a later export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placeholder {
    tag: String,
    layout: PinLayout,
}

impl Placeholder {
    /// Placeholder with generic pin names.
    pub fn new(tag: impl Into<String>, inputs: usize, outputs: usize) -> Self {
        let layout = PinLayout::new(
            (0..inputs).map(|i| format!("I{i}")),
            (0..outputs).map(|i| format!("O{i}")),
        );
        Self::with_layout(tag, layout)
    }

    /// Placeholder preserving specific pin names.
    pub fn with_layout(tag: impl Into<String>, layout: PinLayout) -> Self {
        Self {
            tag: tag.into(),
            layout,
        }
    }
}

impl Gate for Placeholder {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn layout(&self) -> PinLayout {
        self.layout.clone()
    }

    fn evaluate(&self, _inputs: &[Value], _outputs: &mut [Value]) {}
}
