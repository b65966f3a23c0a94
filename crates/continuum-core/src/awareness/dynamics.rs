//! Stability regulator

use crate::knowledge::MemoryState;
use crate::types::{dims, AwarenessRecord};

#[derive(Debug, Default, Clone, Copy)]
pub struct StabilityRegulator;

impl StabilityRegulator {
    pub fn new() -> Self {
        Self
    }

    /// `field.stability = coherence - remembered coherence`. Negative means
    /// the record is less coherent than accumulated memory.
    pub fn regulate(&self, mut record: AwarenessRecord, memory: &MemoryState) -> AwarenessRecord {
        let stability = record.coherence - memory.coherence.unwrap_or(0.0);
        record.set_dimension(dims::STABILITY, stability);
        record
    }
}
