//! Feedback - how this cycle's record compares to what memory held before it

use super::memory::MemoryState;
use crate::types::{dims, AwarenessRecord};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeedbackSignal {
    pub feedback: f64,
    pub feedback_delta: f64,
    pub feedback_drift: f64,
    pub feedback_stability: f64,
}

impl FeedbackSignal {
    pub fn is_positive(&self) -> bool {
        self.feedback_delta >= 0.0
    }

    pub fn requires_correction(&self) -> bool {
        self.feedback_delta < Feedback::DELTA_FLOOR || self.feedback_drift > Feedback::DRIFT_CEILING
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Feedback;

impl Feedback {
    pub const DELTA_FLOOR: f64 = -0.2;
    pub const DRIFT_CEILING: f64 = 0.3;

    pub fn new() -> Self {
        Self
    }

    /// Compute the signal for `record`. `previous` must be the memory state
    /// captured before this cycle's [`Memory::update`](super::Memory::update);
    /// with no remembered coherence the delta is 0.
    pub fn apply(&self, previous: &MemoryState, record: &AwarenessRecord) -> FeedbackSignal {
        let before = previous.coherence.unwrap_or(record.coherence);
        FeedbackSignal {
            feedback: record.coherence,
            feedback_delta: record.coherence - before,
            feedback_drift: record.dimension_or(dims::DRIFT, 0.0),
            feedback_stability: record.dimension_or(dims::STABILITY, 0.0),
        }
    }

    /// True when no feedback has been recorded yet.
    pub fn is_positive(&self, memory: &MemoryState) -> bool {
        memory.feedback.map_or(true, |f| f.is_positive())
    }

    pub fn requires_correction(&self, memory: &MemoryState) -> bool {
        memory.feedback.map_or(false, |f| f.requires_correction())
    }
}
