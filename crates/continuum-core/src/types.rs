//! Core types for Continuum

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Named dimension → signal. Keys accumulate as pipeline stages annotate a record.
pub type Field = BTreeMap<String, f64>;

/// Well-known field dimensions written by the pipeline stages.
pub mod dims {
    pub const NOVELTY: &str = "novelty";
    pub const COMPLEXITY: &str = "complexity";
    pub const RISK: &str = "risk";
    pub const MEMORY_PRESSURE: &str = "memory_pressure";
    pub const DRIFT: &str = "drift";
    pub const STABILITY: &str = "stability";
}

/// Clamp a scalar into [0, 1]. NaN collapses to 0.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Round to 4 decimal places, the precision used by audit summaries.
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// One external observation. Every key is optional; absent or non-finite
/// values fall back to their documented defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coherence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub novelty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<f64>,
}

impl Observation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_coherence(mut self, value: f64) -> Self {
        self.coherence = Some(value);
        self
    }

    pub fn with_confidence(mut self, value: f64) -> Self {
        self.confidence = Some(value);
        self
    }

    pub fn with_novelty(mut self, value: f64) -> Self {
        self.novelty = Some(value);
        self
    }

    pub fn with_complexity(mut self, value: f64) -> Self {
        self.complexity = Some(value);
        self
    }

    pub fn coherence_or_default(&self) -> f64 {
        finite_or(self.coherence, 1.0)
    }

    pub fn confidence_or_default(&self) -> f64 {
        finite_or(self.confidence, 1.0)
    }

    pub fn novelty_or_default(&self) -> f64 {
        finite_or(self.novelty, 0.0)
    }

    pub fn complexity_or_default(&self) -> f64 {
        finite_or(self.complexity, 0.0)
    }

    /// The supplied keys as a JSON object, used as agent context.
    pub fn to_context(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

fn finite_or(value: Option<f64>, default: f64) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(default)
}

/// The unit of state threading through the pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AwarenessRecord {
    pub field: Field,
    pub coherence: f64,
    pub uncertainty: f64,
    pub created_at: DateTime<Utc>,
}

impl AwarenessRecord {
    /// Build a record, clamping `coherence` and `uncertainty` into [0, 1].
    pub fn new(field: Field, coherence: f64, uncertainty: f64) -> Self {
        Self {
            field,
            coherence: clamp_unit(coherence),
            uncertainty: clamp_unit(uncertainty),
            created_at: Utc::now(),
        }
    }

    pub fn dimension(&self, name: &str) -> Option<f64> {
        self.field.get(name).copied()
    }

    pub fn dimension_or(&self, name: &str, default: f64) -> f64 {
        self.dimension(name).unwrap_or(default)
    }

    pub fn set_dimension(&mut self, name: &str, value: f64) {
        self.field.insert(name.to_string(), value);
    }

    /// Dimension with the largest signal. Ties resolve to the first key in
    /// lexical order.
    pub fn dominant_dimension(&self) -> Option<&str> {
        let mut best: Option<(&str, f64)> = None;
        for (name, value) in &self.field {
            match best {
                Some((_, top)) if *value <= top => {}
                _ => best = Some((name.as_str(), *value)),
            }
        }
        best.map(|(name, _)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_clamps_scalars() {
        let record = AwarenessRecord::new(Field::new(), 1.4, -0.2);
        assert_eq!(record.coherence, 1.0);
        assert_eq!(record.uncertainty, 0.0);

        let record = AwarenessRecord::new(Field::new(), f64::NAN, 0.5);
        assert_eq!(record.coherence, 0.0);
    }

    #[test]
    fn dominant_dimension_picks_largest() {
        let mut record = AwarenessRecord::new(Field::new(), 0.5, 0.5);
        assert_eq!(record.dominant_dimension(), None);
        record.set_dimension("risk", 0.2);
        record.set_dimension("novelty", 0.7);
        record.set_dimension("drift", 0.7);
        // "drift" sorts before "novelty" and ties on value
        assert_eq!(record.dominant_dimension(), Some("drift"));
    }

    #[test]
    fn observation_context_lists_only_supplied_keys() {
        let obs = Observation::new().with_confidence(0.4).with_novelty(0.1);
        let ctx = obs.to_context();
        let keys: Vec<&String> = ctx.keys().collect();
        assert_eq!(keys.len(), 2);
        assert!(ctx.contains_key("confidence"));
        assert!(ctx.contains_key("novelty"));
    }

    #[test]
    fn observation_ignores_non_finite_inputs() {
        let obs = Observation::new()
            .with_coherence(f64::INFINITY)
            .with_confidence(f64::NAN);
        assert_eq!(obs.coherence_or_default(), 1.0);
        assert_eq!(obs.confidence_or_default(), 1.0);
    }

    #[test]
    fn round4_matches_audit_precision() {
        assert_eq!(round4(0.123456), 0.1235);
        assert_eq!(round4(0.5), 0.5);
    }
}
