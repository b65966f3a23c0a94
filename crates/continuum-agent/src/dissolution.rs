//! Dissolution - retire agents and keep their residues

use crate::agent::{EmergentAgent, Residue};
use continuum_core::{AwarenessRecord, Invariants};
use tracing::info;

#[derive(Debug, Default)]
pub struct Dissolution {
    residues: Vec<Residue>,
}

impl Dissolution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill `agent`, archive its residue and release its population slot.
    /// Returns the residue and the record the agent owned.
    pub fn dissolve(
        &mut self,
        invariants: &Invariants,
        agent: EmergentAgent,
    ) -> (Residue, AwarenessRecord) {
        let (residue, record) = agent.dissolve();
        self.residues.push(residue.clone());
        let active = invariants.register_dissolution();
        info!(agent = %residue.agent_id, active_agents = active, "dissolved agent");
        (residue, record)
    }

    pub fn total_dissolved(&self) -> usize {
        self.residues.len()
    }

    pub fn last_residue(&self) -> Option<&Residue> {
        self.residues.last()
    }

    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }
}
