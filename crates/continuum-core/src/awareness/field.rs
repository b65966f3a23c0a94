//! Field generator - observation + memory snapshot → awareness record

use crate::knowledge::MemoryState;
use crate::types::{dims, AwarenessRecord, Field, Observation};
use tracing::debug;

/// Derives an awareness record from one observation. Pure: no hidden state.
#[derive(Debug, Default, Clone, Copy)]
pub struct FieldGenerator;

impl FieldGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Field dimensions are left unclamped; the gates reject out-of-range results.
    pub fn generate(&self, observation: &Observation, memory: &MemoryState) -> AwarenessRecord {
        let coherence = observation.coherence_or_default();
        let uncertainty = 1.0 - observation.confidence_or_default();

        let mut field = Field::new();
        field.insert(
            dims::NOVELTY.into(),
            observation.novelty_or_default() * (1.0 - uncertainty),
        );
        field.insert(
            dims::COMPLEXITY.into(),
            observation.complexity_or_default() * coherence,
        );
        field.insert(dims::RISK.into(), uncertainty * (1.0 - coherence));
        field.insert(
            dims::MEMORY_PRESSURE.into(),
            memory.coherence.unwrap_or(0.0),
        );

        debug!(coherence, uncertainty, "generated awareness field");
        AwarenessRecord::new(field, coherence, uncertainty)
    }
}
