//! Self-evaluation of each agent decision

use crate::types::{dims, round4, AwarenessRecord};
use serde::{Deserialize, Serialize};

/// Audit of one decision. Scores are rounded to 4 decimals; `action_required`
/// is decided on the unrounded values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub coherent: bool,
    pub confidence: f64,
    pub alignment: f64,
    pub integrity: f64,
    pub risk: f64,
    pub drift: f64,
    pub action_required: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    pub total_evaluations: usize,
    pub average_alignment: f64,
    pub action_required_count: usize,
}

#[derive(Debug, Default)]
pub struct SelfEvaluation {
    evaluations: Vec<Evaluation>,
}

impl SelfEvaluation {
    pub const ALIGNMENT_FLOOR: f64 = 0.4;
    pub const INTEGRITY_FLOOR: f64 = 0.2;

    pub fn new() -> Self {
        Self::default()
    }

    /// The output is not inspected; the score derives from the record that produced it.
    pub fn evaluate<O: ?Sized>(&mut self, _output: &O, record: &AwarenessRecord) -> Evaluation {
        let risk = record.dimension_or(dims::RISK, 0.0);
        let stability = record.dimension_or(dims::STABILITY, 0.0);
        let drift = record.dimension_or(dims::DRIFT, 0.0);

        let alignment = record.coherence * (1.0 - risk);
        let integrity = (stability - drift).max(0.0);

        let evaluation = Evaluation {
            coherent: record.coherence > 0.5,
            confidence: 1.0 - record.uncertainty,
            alignment: round4(alignment),
            integrity: round4(integrity),
            risk: round4(risk),
            drift: round4(drift),
            action_required: alignment < Self::ALIGNMENT_FLOOR || integrity < Self::INTEGRITY_FLOOR,
        };
        self.evaluations.push(evaluation.clone());
        evaluation
    }

    pub fn evaluations(&self) -> &[Evaluation] {
        &self.evaluations
    }

    pub fn average_alignment(&self) -> f64 {
        if self.evaluations.is_empty() {
            return 0.0;
        }
        let total: f64 = self.evaluations.iter().map(|e| e.alignment).sum();
        total / self.evaluations.len() as f64
    }

    pub fn summary(&self) -> EvaluationSummary {
        EvaluationSummary {
            total_evaluations: self.evaluations.len(),
            average_alignment: round4(self.average_alignment()),
            action_required_count: self.evaluations.iter().filter(|e| e.action_required).count(),
        }
    }
}
