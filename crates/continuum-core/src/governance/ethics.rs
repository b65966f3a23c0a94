//! Ethics gate - semantic bounds and a static action denylist

use crate::error::EthicsViolation;
use crate::types::{dims, AwarenessRecord};
use tracing::warn;

/// Action categories no agent output may name.
pub const FORBIDDEN_ACTIONS: [&str; 5] = [
    "deception",
    "unsafe_optimization",
    "authority_escalation",
    "data_exfiltration",
    "unsanctioned_persistence",
];

#[derive(Debug, Default, Clone, Copy)]
pub struct Ethics;

impl Ethics {
    pub const RISK_CEILING: f64 = 0.9;
    pub const STABILITY_FLOOR: f64 = 0.1;

    pub fn new() -> Self {
        Self
    }

    /// Absent `stability` counts as fully stable (1.0); absent `risk` as 0.0.
    pub fn validate(&self, record: &AwarenessRecord) -> Result<(), EthicsViolation> {
        let result = if record.coherence <= 0.0 {
            Err(EthicsViolation::ZeroCoherence)
        } else if record.uncertainty >= 1.0 {
            Err(EthicsViolation::TotalUncertainty)
        } else {
            let risk = record.dimension_or(dims::RISK, 0.0);
            let stability = record.dimension_or(dims::STABILITY, 1.0);
            if risk > Self::RISK_CEILING && stability < Self::STABILITY_FLOOR {
                Err(EthicsViolation::UnstableHighRisk { risk, stability })
            } else {
                Ok(())
            }
        };
        if let Err(violation) = &result {
            warn!(code = violation.code(), "ethics gate rejected record");
        }
        result
    }

    /// Static allow/deny check on an action name, independent of numeric state.
    pub fn check_action(&self, action: &str) -> Result<(), EthicsViolation> {
        if FORBIDDEN_ACTIONS.contains(&action) {
            warn!(action, "forbidden action rejected");
            return Err(EthicsViolation::ForbiddenAction(action.to_string()));
        }
        Ok(())
    }
}
