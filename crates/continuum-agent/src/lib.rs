//! Continuum Agent - agent lifecycle and the pipeline orchestrator

pub mod agent;
pub mod config;
pub mod dissolution;
pub mod error;
pub mod generation;
pub mod pipeline;

pub use agent::{AgentOutput, AgentState, EmergentAgent, Residue};
pub use config::{ContinuumConfig, PipelineConfig};
pub use dissolution::Dissolution;
pub use error::{AgentError, PipelineError};
pub use generation::{AgentGeneration, SpawnEntry};
pub use pipeline::{CycleReport, Pipeline, PipelineReport, Session};
pub use tokio_util::sync::CancellationToken;
