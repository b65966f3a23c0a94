//! Error types for agents and the pipeline

use continuum_core::{EthicsViolation, GateError, InvariantViolation};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgentError {
    #[error("agent {0} has already acted")]
    AlreadyActed(Uuid),
}

/// Why a cycle was aborted. Gate rejections pass through uninterpreted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error(transparent)]
    Gate(#[from] GateError),

    #[error(transparent)]
    Agent(#[from] AgentError),
}

impl PipelineError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Gate(e) => e.code(),
            Self::Agent(AgentError::AlreadyActed(_)) => "agent_already_acted",
        }
    }

    pub fn as_gate(&self) -> Option<&GateError> {
        match self {
            Self::Gate(e) => Some(e),
            Self::Agent(_) => None,
        }
    }
}

impl From<InvariantViolation> for PipelineError {
    fn from(v: InvariantViolation) -> Self {
        Self::Gate(v.into())
    }
}

impl From<EthicsViolation> for PipelineError {
    fn from(v: EthicsViolation) -> Self {
        Self::Gate(v.into())
    }
}
