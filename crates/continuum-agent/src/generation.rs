//! Agent generation - population-gated spawning

use crate::agent::EmergentAgent;
use chrono::{DateTime, Utc};
use continuum_core::{AwarenessRecord, InvariantViolation, Invariants};
use continuum_llm::CompletionBackend;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Bookkeeping for one spawned agent. Liveness is shared with the agent and
/// flips when it dissolves.
#[derive(Debug, Clone)]
pub struct SpawnEntry {
    pub id: Uuid,
    pub spawned_at: DateTime<Utc>,
    alive: Arc<AtomicBool>,
}

impl SpawnEntry {
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }
}

#[derive(Default)]
pub struct AgentGeneration {
    backend: Option<Arc<dyn CompletionBackend>>,
    spawned: Vec<SpawnEntry>,
}

impl AgentGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backend(backend: Arc<dyn CompletionBackend>) -> Self {
        Self {
            backend: Some(backend),
            spawned: Vec::new(),
        }
    }

    /// Reserve population, then bind a new agent to `record`. The record is
    /// moved in, so no two live agents can share one. On a full population
    /// nothing is created and the counter is unchanged.
    pub fn spawn(
        &mut self,
        invariants: &Invariants,
        record: AwarenessRecord,
    ) -> Result<EmergentAgent, InvariantViolation> {
        let active = invariants.register_spawn()?;

        let alive = Arc::new(AtomicBool::new(true));
        let agent = EmergentAgent::new(record, self.backend.clone(), alive.clone());
        self.spawned.push(SpawnEntry {
            id: agent.id(),
            spawned_at: Utc::now(),
            alive,
        });

        info!(agent = %agent.id(), active_agents = active, "spawned agent");
        Ok(agent)
    }

    pub fn spawn_count(&self) -> usize {
        self.spawned.len()
    }

    /// Ids of agents not yet dissolved.
    pub fn active_agents(&self) -> Vec<Uuid> {
        self.spawned
            .iter()
            .filter(|e| e.is_alive())
            .map(|e| e.id)
            .collect()
    }

    pub fn entries(&self) -> &[SpawnEntry] {
        &self.spawned
    }
}
