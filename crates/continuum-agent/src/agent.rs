//! Emergent agent - one short-lived execution unit per validated record

use crate::error::AgentError;
use chrono::{DateTime, Utc};
use continuum_core::{AwarenessRecord, Field};
use continuum_llm::{degraded, CompletionBackend, LlmError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use uuid::Uuid;

/// `Spawned → Acted → Dissolved`. Acting is optional; no state goes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentState {
    Spawned,
    Acted,
    Dissolved,
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawned => write!(f, "spawned"),
            Self::Acted => write!(f, "acted"),
            Self::Dissolved => write!(f, "dissolved"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentOutput {
    pub awareness_field: Field,
    pub context_keys: Vec<String>,
    /// Present only when an enabled backend was consulted. Empty on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_response: Option<String>,
}

impl AgentOutput {
    pub fn keys(&self) -> Vec<&'static str> {
        let mut keys = vec!["awareness_field", "context_keys"];
        if self.llm_response.is_some() {
            keys.push("llm_response");
        }
        keys
    }
}

/// Snapshot taken when an agent dissolves. Owns deep copies; never aliases
/// the record it was taken from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Residue {
    pub agent_id: Uuid,
    pub final_coherence: f64,
    pub final_uncertainty: f64,
    pub final_field: Field,
    pub dissolved_at: DateTime<Utc>,
}

pub struct EmergentAgent {
    id: Uuid,
    record: AwarenessRecord,
    state: AgentState,
    alive: Arc<AtomicBool>,
    backend: Option<Arc<dyn CompletionBackend>>,
}

impl EmergentAgent {
    pub(crate) fn new(
        record: AwarenessRecord,
        backend: Option<Arc<dyn CompletionBackend>>,
        alive: Arc<AtomicBool>,
    ) -> Self {
        alive.store(true, Ordering::SeqCst);
        Self {
            id: Uuid::new_v4(),
            record,
            state: AgentState::Spawned,
            alive,
            backend,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The bound record, read-only for the agent's lifetime.
    pub fn record(&self) -> &AwarenessRecord {
        &self.record
    }

    pub fn state(&self) -> AgentState {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    pub fn prompt(&self, context: &Map<String, Value>) -> String {
        let field = serde_json::to_string(&self.record.field).unwrap_or_default();
        let context = serde_json::to_string(context).unwrap_or_default();
        format!(
            "You are an emergent cognitive agent.\n\
             Awareness field: {}\n\
             Coherence: {}\n\
             Uncertainty: {}\n\
             Context: {}\n\
             Analyze the situation and provide structured findings.",
            field, self.record.coherence, self.record.uncertainty, context
        )
    }

    /// Produce this agent's single output. With an enabled backend one
    /// completion is requested; a failure, or `cancel` firing first, yields
    /// an empty response rather than an error.
    pub async fn act(
        &mut self,
        context: &Map<String, Value>,
        cancel: Option<CancellationToken>,
    ) -> Result<AgentOutput, AgentError> {
        if self.state != AgentState::Spawned {
            return Err(AgentError::AlreadyActed(self.id));
        }
        self.state = AgentState::Acted;

        let llm_response = match self.backend.as_ref().filter(|b| b.enabled()) {
            None => None,
            Some(backend) => {
                let prompt = self.prompt(context);
                debug!(agent = %self.id, backend = backend.name(), "requesting completion");
                let text = match cancel {
                    Some(token) => tokio::select! {
                        text = backend.complete(&prompt) => text,
                        _ = token.cancelled() => degraded(backend.name(), &LlmError::Cancelled),
                    },
                    None => backend.complete(&prompt).await,
                };
                Some(text)
            }
        };

        Ok(AgentOutput {
            awareness_field: self.record.field.clone(),
            context_keys: context.keys().cloned().collect(),
            llm_response,
        })
    }

    /// Terminal transition. Consumes the agent so it cannot be reused, and
    /// hands the record back to the caller alongside its residue.
    pub(crate) fn dissolve(mut self) -> (Residue, AwarenessRecord) {
        self.state = AgentState::Dissolved;
        self.alive.store(false, Ordering::SeqCst);
        let residue = Residue {
            agent_id: self.id,
            final_coherence: self.record.coherence,
            final_uncertainty: self.record.uncertainty,
            final_field: self.record.field.clone(),
            dissolved_at: Utc::now(),
        };
        (residue, self.record)
    }
}

impl fmt::Debug for EmergentAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmergentAgent")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("coherence", &self.record.coherence)
            .field("uncertainty", &self.record.uncertainty)
            .field("backend", &self.backend.as_ref().map(|b| b.name().to_string()))
            .finish()
    }
}
