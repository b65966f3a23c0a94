//! Process-wide memory: latest state plus an append-only snapshot list

use super::feedback::FeedbackSignal;
use crate::types::{AwarenessRecord, Field};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Latest remembered state. Every key is empty until the first update.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryState {
    pub coherence: Option<f64>,
    pub uncertainty: Option<f64>,
    pub field: Option<Field>,
    pub last_updated: Option<DateTime<Utc>>,
    pub feedback: Option<FeedbackSignal>,
}

impl MemoryState {
    /// Names of the populated keys, in a fixed order. This is the structural
    /// fingerprint lineage records.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        if self.coherence.is_some() {
            keys.push("coherence");
        }
        if self.uncertainty.is_some() {
            keys.push("uncertainty");
        }
        if self.field.is_some() {
            keys.push("field");
        }
        if self.last_updated.is_some() {
            keys.push("last_updated");
        }
        if self.feedback.is_some() {
            keys.extend([
                "feedback",
                "feedback_delta",
                "feedback_drift",
                "feedback_stability",
            ]);
        }
        keys.into_iter().map(String::from).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.coherence.is_none() && self.last_updated.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MemorySnapshot {
    pub coherence: f64,
    pub uncertainty: f64,
    pub field: Field,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct Memory {
    state: MemoryState,
    snapshots: Vec<MemorySnapshot>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &MemoryState {
        &self.state
    }

    /// Overwrite the latest state with `record` and archive a snapshot.
    /// Feedback from an earlier cycle is kept until [`Memory::record_feedback`]
    /// replaces it.
    pub fn update(&mut self, record: &AwarenessRecord) {
        let now = Utc::now();
        self.state.coherence = Some(record.coherence);
        self.state.uncertainty = Some(record.uncertainty);
        self.state.field = Some(record.field.clone());
        self.state.last_updated = Some(now);

        self.snapshots.push(MemorySnapshot {
            coherence: record.coherence,
            uncertainty: record.uncertainty,
            field: record.field.clone(),
            timestamp: now,
        });
    }

    pub fn record_feedback(&mut self, signal: FeedbackSignal) {
        self.state.feedback = Some(signal);
    }

    /// The newest `n` snapshots, oldest first.
    pub fn recall(&self, n: usize) -> &[MemorySnapshot] {
        let start = self.snapshots.len().saturating_sub(n);
        &self.snapshots[start..]
    }

    pub fn depth(&self) -> usize {
        self.snapshots.len()
    }
}
