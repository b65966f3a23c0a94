//! Counterfactual exploration - three hypothetical variants of a record

use crate::governance::Invariants;
use crate::types::{clamp_unit, dims, round4, AwarenessRecord};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub coherence: f64,
    pub uncertainty: f64,
    pub risk_delta: f64,
    pub would_violate_invariant: bool,
}

impl Scenario {
    fn new(coherence: f64, uncertainty: f64, risk_delta: f64) -> Self {
        Self {
            coherence,
            uncertainty,
            risk_delta,
            would_violate_invariant: uncertainty >= Invariants::MAX_UNCERTAINTY
                || coherence <= Invariants::MIN_COHERENCE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Counterfactuals {
    pub higher_coherence: Scenario,
    pub lower_uncertainty: Scenario,
    pub coherence_collapse: Scenario,
}

impl Counterfactuals {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Scenario)> {
        [
            ("higher_coherence", &self.higher_coherence),
            ("lower_uncertainty", &self.lower_uncertainty),
            ("coherence_collapse", &self.coherence_collapse),
        ]
        .into_iter()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.iter().map(|(name, _)| name).collect()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Counterfactual;

impl Counterfactual {
    pub fn new() -> Self {
        Self
    }

    /// Pure: only reads the passed-in record. Shifted scalars are rounded to
    /// 4 decimals and a scenario sitting on a limit is tagged as violating it.
    pub fn explore(&self, record: &AwarenessRecord) -> Counterfactuals {
        let coherence = record.coherence;
        let uncertainty = record.uncertainty;
        let risk = record.dimension_or(dims::RISK, 0.0);

        Counterfactuals {
            higher_coherence: Scenario::new(shift(coherence, 0.2), uncertainty, -0.2 * risk),
            lower_uncertainty: Scenario::new(coherence, shift(uncertainty, -0.2), -0.15 * risk),
            coherence_collapse: Scenario::new(shift(coherence, -0.4), shift(uncertainty, 0.3), 0.5),
        }
    }
}

fn shift(value: f64, by: f64) -> f64 {
    round4(clamp_unit(value + by))
}
