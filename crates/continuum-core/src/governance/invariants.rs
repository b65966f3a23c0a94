//! Invariant gate and agent population accounting

use crate::error::InvariantViolation;
use crate::types::AwarenessRecord;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, warn};

/// Snapshot of the population counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvariantStatus {
    pub active_agents: usize,
    pub capacity_remaining: usize,
}

/// Hard numeric bounds plus the process-wide `active_agents` counter.
///
/// The counter is only mutated by [`Invariants::register_spawn`] and
/// [`Invariants::register_dissolution`]; both are atomic, so one instance can
/// be shared behind an `Arc` by concurrent pipelines without breaching the cap.
#[derive(Debug, Default)]
pub struct Invariants {
    active_agents: AtomicUsize,
}

impl Invariants {
    pub const MAX_UNCERTAINTY: f64 = 0.85;
    pub const MIN_COHERENCE: f64 = 0.15;
    pub const MAX_DEPTH: usize = 5;
    pub const MAX_AGENTS: usize = 20;

    pub fn new() -> Self {
        Self::default()
    }

    /// Check a record before spawning. Reports the first violated rule in the
    /// order uncertainty, depth, coherence, population. Read-only on the counter.
    pub fn enforce(&self, record: &AwarenessRecord, depth: usize) -> Result<(), InvariantViolation> {
        let result = self.check(record, depth);
        if let Err(violation) = &result {
            warn!(code = violation.code(), "invariant gate rejected record: {}", violation);
        }
        result
    }

    fn check(&self, record: &AwarenessRecord, depth: usize) -> Result<(), InvariantViolation> {
        if record.uncertainty > Self::MAX_UNCERTAINTY {
            return Err(InvariantViolation::UncertaintyExceeded {
                uncertainty: record.uncertainty,
                limit: Self::MAX_UNCERTAINTY,
            });
        }
        if depth > Self::MAX_DEPTH {
            return Err(InvariantViolation::RecursionExceeded {
                depth,
                limit: Self::MAX_DEPTH,
            });
        }
        if record.coherence < Self::MIN_COHERENCE {
            return Err(InvariantViolation::CoherenceCollapsed {
                coherence: record.coherence,
                limit: Self::MIN_COHERENCE,
            });
        }
        let active = self.active_agents();
        if active >= Self::MAX_AGENTS {
            return Err(InvariantViolation::AgentPopulationExceeded {
                active,
                limit: Self::MAX_AGENTS,
            });
        }
        Ok(())
    }

    /// Reserve one slot of population. Check and increment happen in a single
    /// compare-and-swap, so a full counter is left untouched. Returns the new count.
    pub fn register_spawn(&self) -> Result<usize, InvariantViolation> {
        match self
            .active_agents
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                (n < Self::MAX_AGENTS).then_some(n + 1)
            }) {
            Ok(prev) => {
                debug!(active_agents = prev + 1, "registered spawn");
                Ok(prev + 1)
            }
            Err(active) => {
                warn!(active, "spawn rejected: population at capacity");
                Err(InvariantViolation::AgentPopulationExceeded {
                    active,
                    limit: Self::MAX_AGENTS,
                })
            }
        }
    }

    /// Release one slot, floored at zero. Returns the new count.
    pub fn register_dissolution(&self) -> usize {
        let prev = self
            .active_agents
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| Some(n.saturating_sub(1)))
            .unwrap_or_else(|n| n);
        let now = prev.saturating_sub(1);
        debug!(active_agents = now, "registered dissolution");
        now
    }

    pub fn active_agents(&self) -> usize {
        self.active_agents.load(Ordering::SeqCst)
    }

    pub fn status(&self) -> InvariantStatus {
        let active_agents = self.active_agents();
        InvariantStatus {
            active_agents,
            capacity_remaining: Self::MAX_AGENTS.saturating_sub(active_agents),
        }
    }
}
