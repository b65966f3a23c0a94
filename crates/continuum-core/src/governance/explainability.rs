//! Explainability recorder - append-only decision trace

use crate::types::{AwarenessRecord, Field};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub field: Field,
    pub coherence: f64,
    pub uncertainty: f64,
    /// Keys of the agent output. `None` for plain state explanations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_keys: Option<Vec<String>>,
    pub dominant_dimension: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct Explainability {
    traces: Vec<TraceEntry>,
}

impl Explainability {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the state alone.
    pub fn explain(&mut self, record: &AwarenessRecord) -> TraceEntry {
        self.push(record, None)
    }

    /// Record a decision: the state that produced an agent output and the keys it returned.
    pub fn explain_decision<I, S>(&mut self, record: &AwarenessRecord, action_keys: I) -> TraceEntry
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(record, Some(action_keys.into_iter().map(Into::into).collect()))
    }

    fn push(&mut self, record: &AwarenessRecord, action_keys: Option<Vec<String>>) -> TraceEntry {
        let entry = TraceEntry {
            field: record.field.clone(),
            coherence: record.coherence,
            uncertainty: record.uncertainty,
            action_keys,
            dominant_dimension: record.dominant_dimension().map(str::to_string),
            timestamp: Utc::now(),
        };
        self.traces.push(entry.clone());
        entry
    }

    pub fn full_trace(&self) -> &[TraceEntry] {
        &self.traces
    }

    pub fn len(&self) -> usize {
        self.traces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    /// Keep only the newest `keep` entries.
    pub fn truncate(&mut self, keep: usize) {
        if self.traces.len() > keep {
            let excess = self.traces.len() - keep;
            self.traces.drain(..excess);
        }
    }
}
