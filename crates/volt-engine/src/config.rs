//! Engine configuration, validation, and error types.
//!
//! [`EngineConfig`] is the input for constructing a [`Registry`](crate::Registry).
//! [`validate()`](EngineConfig::validate) checks it before any arena is
//! allocated.

// ── EngineConfig ───────────────────────────────────────────────────

/// Limits and pre-allocation hints for one registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// How many writes to the same connector may be nested within one
    /// edit. Acyclic networks re-enter a connector at most a couple of
    /// times however long they are. A feedback loop that keeps flipping
    /// stops with
    /// [`NetError::ReentryLimit`](volt_core::NetError::ReentryLimit)
    /// once this is reached. Default: 32.
    pub max_reentry: usize,
    /// Connectors to pre-allocate room for. Default: 0.
    pub connector_capacity: usize,
    /// Wires to pre-allocate room for. Default: 0.
    pub wire_capacity: usize,
    /// Components to pre-allocate room for. Default: 0.
    pub component_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_reentry: 32,
            connector_capacity: 0,
            wire_capacity: 0,
            component_capacity: 0,
        }
    }
}

impl EngineConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_reentry == 0 {
            return Err(ConfigError::ZeroReentry);
        }
        let hints = [
            ("connector_capacity", self.connector_capacity),
            ("wire_capacity", self.wire_capacity),
            ("component_capacity", self.component_capacity),
        ];
        for (field, value) in hints {
            if u32::try_from(value).is_err() {
                return Err(ConfigError::CapacityOverflow { field, value });
            }
        }
        Ok(())
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`EngineConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `max_reentry` is zero, which would reject every write.
    #[error("max_reentry must be at least 1")]
    ZeroReentry,
    /// A capacity hint exceeds the id space.
    #[error("{field} of {value} exceeds the u32 id space")]
    CapacityOverflow {
        /// Which hint overflowed.
        field: &'static str,
        /// The configured value.
        value: usize,
    },
}
