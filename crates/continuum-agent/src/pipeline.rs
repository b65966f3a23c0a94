//! Pipeline - drives one observation through every stage in order
//!
//! Per cycle:
//! 1. FieldGenerator → DriftReflector → StabilityRegulator
//! 2. Invariants, then Ethics (either may abort the cycle)
//! 3. spawn → act
//! 4. Explainability, SelfEvaluation, Counterfactual (read-only audit)
//! 5. Feedback (against pre-update memory), Memory update, Lineage, then
//!    the feedback signal is stored for the next cycle
//! 6. dissolve, archive the record, Continuity over the full history
//!
//! A rejected cycle leaves every piece of session state as it was.

use crate::agent::{AgentOutput, Residue};
use crate::config::{ContinuumConfig, PipelineConfig};
use crate::dissolution::Dissolution;
use crate::error::PipelineError;
use crate::generation::AgentGeneration;
use continuum_core::{
    AwarenessRecord, Continuity, ContinuityReport, Counterfactual, Counterfactuals, DriftReflector,
    Ethics, Evaluation, EvaluationSummary, Explainability, Feedback, FeedbackSignal,
    FieldGenerator, InvariantStatus, Invariants, LineageEntry, Lineage, Memory, Observation,
    SelfEvaluation, StabilityRegulator, TraceEntry,
};
use continuum_llm::{build_backend, CompletionBackend};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Process-wide state, singly owned by the pipeline. Readable by anyone,
/// written only by the stage responsible for each collection.
#[derive(Default)]
pub struct Session {
    history: Vec<AwarenessRecord>,
    memory: Memory,
    lineage: Lineage,
    explainability: Explainability,
    self_evaluation: SelfEvaluation,
    generation: AgentGeneration,
    dissolution: Dissolution,
    invariants: Arc<Invariants>,
}

impl Session {
    pub fn history(&self) -> &[AwarenessRecord] {
        &self.history
    }
    pub fn memory(&self) -> &Memory {
        &self.memory
    }
    pub fn lineage(&self) -> &Lineage {
        &self.lineage
    }
    pub fn explainability(&self) -> &Explainability {
        &self.explainability
    }
    pub fn self_evaluation(&self) -> &SelfEvaluation {
        &self.self_evaluation
    }
    pub fn generation(&self) -> &AgentGeneration {
        &self.generation
    }
    pub fn dissolution(&self) -> &Dissolution {
        &self.dissolution
    }
    pub fn invariants(&self) -> &Arc<Invariants> {
        &self.invariants
    }
}

/// Everything one accepted cycle produced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CycleReport {
    pub cycle: usize,
    pub record: AwarenessRecord,
    pub output: AgentOutput,
    pub explanation: TraceEntry,
    pub evaluation: Evaluation,
    pub counterfactuals: Counterfactuals,
    pub feedback: FeedbackSignal,
    pub lineage: LineageEntry,
    pub residue: Residue,
    pub continuity: ContinuityReport,
}

/// End-of-run summary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    pub cycles: usize,
    pub audit: EvaluationSummary,
    pub continuity: ContinuityReport,
    pub coherence_lineage: Vec<f64>,
    pub agents_spawned: usize,
    pub agents_dissolved: usize,
    pub invariant_status: InvariantStatus,
    pub trace_count: usize,
    pub memory_depth: usize,
}

pub struct Pipeline {
    config: PipelineConfig,
    session: Session,
    field: FieldGenerator,
    drift: DriftReflector,
    stability: StabilityRegulator,
    ethics: Ethics,
    counterfactual: Counterfactual,
    continuity: Continuity,
    feedback: Feedback,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            session: Session::default(),
            field: FieldGenerator::new(),
            drift: DriftReflector::new(),
            stability: StabilityRegulator::new(),
            ethics: Ethics::new(),
            counterfactual: Counterfactual::new(),
            continuity: Continuity::new(),
            feedback: Feedback::new(),
        }
    }

    /// Build the pipeline and, when the config enables one, its completion backend.
    pub fn from_config(config: &ContinuumConfig) -> Self {
        let pipeline = Self::new(config.pipeline.clone());
        if config.llm.enabled() {
            info!("Completion backend: {}", config.llm);
            pipeline.with_backend(build_backend(&config.llm))
        } else {
            pipeline
        }
    }

    pub fn with_backend(mut self, backend: Arc<dyn CompletionBackend>) -> Self {
        self.session.generation = AgentGeneration::with_backend(backend);
        self
    }

    /// Share one population counter with other pipelines.
    pub fn with_invariants(mut self, invariants: Arc<Invariants>) -> Self {
        self.session.invariants = invariants;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Screen an action name an agent proposes against the ethics denylist.
    pub fn check_action(&self, action: &str) -> Result<(), PipelineError> {
        Ok(self.ethics.check_action(action)?)
    }

    /// Run one observation through the full cycle.
    pub async fn run_cycle(&mut self, observation: &Observation) -> Result<CycleReport, PipelineError> {
        let cancel = completion_token(self.config.completion_timeout_ms);
        let s = &mut self.session;
        let depth = s.history.len();

        let record = self.field.generate(observation, s.memory.state());
        let record = self.drift.reflect(record, &s.history);
        let record = self.stability.regulate(record, s.memory.state());

        s.invariants.enforce(&record, depth)?;
        self.ethics.validate(&record)?;

        let mut agent = s.generation.spawn(&s.invariants, record)?;
        let context = observation.to_context();
        let acted = agent.act(&context, cancel.clone()).await;
        if let Some(token) = &cancel {
            token.cancel();
        }
        let output = match acted {
            Ok(output) => output,
            Err(e) => {
                warn!("agent failed to act: {}", e);
                s.dissolution.dissolve(&s.invariants, agent);
                return Err(e.into());
            }
        };

        let explanation = s.explainability.explain_decision(agent.record(), output.keys());
        let evaluation = s.self_evaluation.evaluate(&output, agent.record());
        let counterfactuals = self.counterfactual.explore(agent.record());

        let feedback = self.feedback.apply(s.memory.state(), agent.record());
        s.memory.update(agent.record());
        let lineage = s.lineage.track(s.memory.state());
        s.memory.record_feedback(feedback);

        let (residue, record) = s.dissolution.dissolve(&s.invariants, agent);
        s.history.push(record.clone());
        if let Some(limit) = self.config.trace_limit {
            s.explainability.truncate(limit);
        }

        let continuity = self.continuity.assess(&s.history);
        info!(
            cycle = depth + 1,
            coherence = record.coherence,
            uncertainty = record.uncertainty,
            trend = %continuity.coherence_trend,
            "cycle complete"
        );

        Ok(CycleReport {
            cycle: depth + 1,
            record,
            output,
            explanation,
            evaluation,
            counterfactuals,
            feedback,
            lineage,
            residue,
            continuity,
        })
    }

    /// Continuity over everything archived so far.
    pub fn assess(&self) -> ContinuityReport {
        self.continuity.assess(&self.session.history)
    }

    pub fn report(&self) -> PipelineReport {
        let s = &self.session;
        PipelineReport {
            cycles: s.history.len(),
            audit: s.self_evaluation.summary(),
            continuity: self.assess(),
            coherence_lineage: s.lineage.coherence_history(),
            agents_spawned: s.generation.spawn_count(),
            agents_dissolved: s.dissolution.total_dissolved(),
            invariant_status: s.invariants.status(),
            trace_count: s.explainability.len(),
            memory_depth: s.memory.depth(),
        }
    }
}

/// A token that fires after `timeout_ms`. The timer stops early once the
/// caller cancels the token itself.
fn completion_token(timeout_ms: Option<u64>) -> Option<CancellationToken> {
    let ms = timeout_ms?;
    let token = CancellationToken::new();
    let timer = token.clone();
    tokio::spawn(async move {
        tokio::select! {
            _ = tokio::time::sleep(Duration::from_millis(ms)) => timer.cancel(),
            _ = timer.cancelled() => {}
        }
    });
    Some(token)
}
