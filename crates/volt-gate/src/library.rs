//! Class-tag registry used to rebuild gates from snapshots.

use indexmap::IndexMap;

use crate::gate::Gate;
use crate::placeholder::Placeholder;

/// Constructor for a gate given the pin counts recorded in a snapshot.
///
/// Returns `None` when the gate cannot be built with those counts (for
/// example an AND gate asked for a single input).
pub type GateFactory = fn(inputs: usize, outputs: usize) -> Option<Box<dyn Gate>>;

/// Maps class tags to gate constructors.
///
/// Tags are kept in registration order so listings are deterministic.
#[derive(Clone, Default)]
pub struct GateLibrary {
    factories: IndexMap<String, GateFactory>,
}

impl GateLibrary {
    /// An empty library. Every tag restores as a [`Placeholder`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory, replacing any previous factory for `tag`.
    pub fn register(&mut self, tag: impl Into<String>, factory: GateFactory) -> &mut Self {
        self.factories.insert(tag.into(), factory);
        self
    }

    /// `true` if a factory is registered for `tag`.
    pub fn contains(&self, tag: &str) -> bool {
        self.factories.contains_key(tag)
    }

    /// Registered tags in registration order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Build a gate for `tag` with exactly `inputs` and `outputs` pins.
    ///
    /// Falls back to a [`Placeholder`] carrying the original tag when the
    /// tag is unknown, the factory refuses the counts, or the gate it
    /// builds has a different pin geometry.
    pub fn instantiate(&self, tag: &str, inputs: usize, outputs: usize) -> Box<dyn Gate> {
        let Some(factory) = self.factories.get(tag) else {
            tracing::warn!(tag, inputs, outputs, "unknown gate tag, using placeholder");
            return Box::new(Placeholder::new(tag, inputs, outputs));
        };
        match factory(inputs, outputs) {
            Some(gate) => {
                let layout = gate.layout();
                if layout.inputs.len() == inputs && layout.outputs.len() == outputs {
                    gate
                } else {
                    tracing::warn!(
                        tag,
                        inputs,
                        outputs,
                        built_inputs = layout.inputs.len(),
                        built_outputs = layout.outputs.len(),
                        "gate pin geometry mismatch, using placeholder"
                    );
                    Box::new(Placeholder::new(tag, inputs, outputs))
                }
            }
            None => {
                tracing::warn!(tag, inputs, outputs, "gate factory refused pin counts, using placeholder");
                Box::new(Placeholder::new(tag, inputs, outputs))
            }
        }
    }
}

impl std::fmt::Debug for GateLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GateLibrary")
            .field("tags", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}
