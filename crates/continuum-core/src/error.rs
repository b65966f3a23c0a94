//! Gate rejection types for Continuum

use thiserror::Error;

/// Hard numeric bound rejected by the invariant gate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    #[error("uncertainty_exceeded: {uncertainty:.3} > {limit}")]
    UncertaintyExceeded { uncertainty: f64, limit: f64 },

    #[error("recursion_exceeded: {depth} > {limit}")]
    RecursionExceeded { depth: usize, limit: usize },

    #[error("coherence_collapsed: {coherence:.3} < {limit}")]
    CoherenceCollapsed { coherence: f64, limit: f64 },

    #[error("agent_population_exceeded: {active} >= {limit}")]
    AgentPopulationExceeded { active: usize, limit: usize },
}

impl InvariantViolation {
    /// Stable rule name, independent of the offending values.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UncertaintyExceeded { .. } => "uncertainty_exceeded",
            Self::RecursionExceeded { .. } => "recursion_exceeded",
            Self::CoherenceCollapsed { .. } => "coherence_collapsed",
            Self::AgentPopulationExceeded { .. } => "agent_population_exceeded",
        }
    }
}

/// Semantic bound or denylisted action rejected by the ethics gate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EthicsViolation {
    #[error("action_from_zero_coherence")]
    ZeroCoherence,

    #[error("action_from_total_uncertainty")]
    TotalUncertainty,

    #[error("unstable_high_risk_action: risk {risk:.3}, stability {stability:.3}")]
    UnstableHighRisk { risk: f64, stability: f64 },

    #[error("forbidden_action: {0}")]
    ForbiddenAction(String),
}

impl EthicsViolation {
    pub fn code(&self) -> &'static str {
        match self {
            Self::ZeroCoherence => "action_from_zero_coherence",
            Self::TotalUncertainty => "action_from_total_uncertainty",
            Self::UnstableHighRisk { .. } => "unstable_high_risk_action",
            Self::ForbiddenAction(_) => "forbidden_action",
        }
    }
}

/// Any rejection that aborts the current cycle.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GateError {
    #[error("invariant violation: {0}")]
    Invariant(#[from] InvariantViolation),

    #[error("ethics violation: {0}")]
    Ethics(#[from] EthicsViolation),
}

impl GateError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Invariant(v) => v.code(),
            Self::Ethics(v) => v.code(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GateError>;
