//! Drift reflector - the only place drift is computed

use crate::types::{dims, AwarenessRecord};

#[derive(Debug, Default, Clone, Copy)]
pub struct DriftReflector;

impl DriftReflector {
    pub fn new() -> Self {
        Self
    }

    /// Stamp `field.drift` as the absolute coherence change against the last
    /// archived record, or 0.0 when history is empty.
    pub fn reflect(&self, mut record: AwarenessRecord, history: &[AwarenessRecord]) -> AwarenessRecord {
        let drift = history
            .last()
            .map(|prev| (record.coherence - prev.coherence).abs())
            .unwrap_or(0.0);
        record.set_dimension(dims::DRIFT, drift);
        record
    }
}
