//! Continuity assessment over the full ordered history

use crate::types::{dims, round4, AwarenessRecord};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoherenceTrend {
    Improving,
    Degrading,
    Stable,
    InsufficientData,
    None,
}

impl fmt::Display for CoherenceTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Improving => write!(f, "improving"),
            Self::Degrading => write!(f, "degrading"),
            Self::Stable => write!(f, "stable"),
            Self::InsufficientData => write!(f, "insufficient_data"),
            Self::None => write!(f, "none"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContinuityReport {
    pub length: usize,
    pub continuous: bool,
    pub average_coherence: f64,
    pub coherence_trend: CoherenceTrend,
    pub drift_events: usize,
}

impl ContinuityReport {
    pub fn empty() -> Self {
        Self {
            length: 0,
            continuous: false,
            average_coherence: 0.0,
            coherence_trend: CoherenceTrend::None,
            drift_events: 0,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Continuity;

impl Continuity {
    /// Drift above this counts as a discontinuity.
    pub const DRIFT_THRESHOLD: f64 = 0.2;

    pub fn new() -> Self {
        Self
    }

    pub fn assess(&self, history: &[AwarenessRecord]) -> ContinuityReport {
        let (first, last) = match (history.first(), history.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return ContinuityReport::empty(),
        };

        let total: f64 = history.iter().map(|r| r.coherence).sum();
        let average_coherence = round4(total / history.len() as f64);

        // the first record's drift is measured against nothing in this window
        let drift_events = history
            .iter()
            .skip(1)
            .filter(|r| r.dimension_or(dims::DRIFT, 0.0) > Self::DRIFT_THRESHOLD)
            .count();

        let coherence_trend = if history.len() < 2 {
            CoherenceTrend::InsufficientData
        } else if last.coherence > first.coherence {
            CoherenceTrend::Improving
        } else if last.coherence < first.coherence {
            CoherenceTrend::Degrading
        } else {
            CoherenceTrend::Stable
        };

        ContinuityReport {
            length: history.len(),
            continuous: drift_events == 0,
            average_coherence,
            coherence_trend,
            drift_events,
        }
    }
}
