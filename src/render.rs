//! Plain-text and JSON rendering of a run.

use continuum_agent::{CycleReport, PipelineError, PipelineReport};
use continuum_core::Field;
use serde::Serialize;

const RULE: &str = "============================================================";

/// Result of feeding one observation to the pipeline.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CycleOutcome {
    Accepted(Box<CycleReport>),
    Rejected {
        observation: usize,
        code: String,
        message: String,
    },
}

impl CycleOutcome {
    pub fn rejected(observation: usize, error: &PipelineError) -> Self {
        Self::Rejected {
            observation,
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }
}

/// Everything `continuum run --json` prints.
#[derive(Debug, Serialize)]
pub struct RunDocument {
    pub cycles: Vec<CycleOutcome>,
    pub report: PipelineReport,
}

pub fn banner() -> String {
    format!("{RULE}\nCONTINUUM AWARENESS PIPELINE\n{RULE}")
}

pub fn field(field: &Field) -> String {
    let parts: Vec<String> = field
        .iter()
        .map(|(name, value)| format!("{name}: {value:.4}"))
        .collect();
    format!("{{{}}}", parts.join(", "))
}

pub fn outcome(outcome: &CycleOutcome) -> String {
    match outcome {
        CycleOutcome::Accepted(report) => cycle(report),
        CycleOutcome::Rejected {
            observation,
            message,
            ..
        } => format!("\n--- Observation {observation} rejected ---\n  {message}"),
    }
}

pub fn cycle(report: &CycleReport) -> String {
    let mut out = String::new();
    let record = &report.record;
    let evaluation = &report.evaluation;
    out.push_str(&format!("\n--- Cycle {} ---\n", report.cycle));
    out.push_str(&format!("  Field: {}\n", field(&record.field)));
    out.push_str(&format!("  Coherence: {}\n", record.coherence));
    out.push_str(&format!("  Uncertainty: {:.4}\n", record.uncertainty));
    out.push_str(&format!(
        "  Audit: alignment {}, integrity {}, action required: {}\n",
        evaluation.alignment, evaluation.integrity, evaluation.action_required
    ));
    out.push_str(&format!(
        "  Continuity: trend {}, drift events {}\n",
        report.continuity.coherence_trend, report.continuity.drift_events
    ));
    out.push_str(&format!(
        "  Counterfactual scenarios: {}\n",
        report.counterfactuals.names().join(", ")
    ));
    if let Some(text) = &report.output.llm_response {
        let text = if text.is_empty() { "(empty)" } else { text.as_str() };
        out.push_str(&format!("  Agent response: {}\n", text));
    }
    out.push_str(&format!(
        "  Dissolved residue coherence: {}\n",
        report.residue.final_coherence
    ));
    out.push_str(&format!("  Lineage step: {}\n", report.lineage.step));
    out.push_str(&format!("  Feedback positive: {}", report.feedback.is_positive()));
    out
}

pub fn summary(report: &PipelineReport) -> String {
    let mut out = String::new();
    let audit = &report.audit;
    let continuity = &report.continuity;
    out.push_str(&format!("\n{RULE}\nCONTINUUM REPORT\n{RULE}\n"));
    out.push_str(&format!("  Total cycles: {}\n", report.cycles));
    out.push_str(&format!(
        "  Audit summary: {} evaluations, average alignment {}, {} requiring action\n",
        audit.total_evaluations, audit.average_alignment, audit.action_required_count
    ));
    out.push_str(&format!(
        "  Continuity: continuous {}, average coherence {}, trend {}, drift events {}\n",
        continuity.continuous,
        continuity.average_coherence,
        continuity.coherence_trend,
        continuity.drift_events
    ));
    out.push_str(&format!("  Coherence lineage: {:?}\n", report.coherence_lineage));
    out.push_str(&format!("  Agents spawned: {}\n", report.agents_spawned));
    out.push_str(&format!("  Agents dissolved: {}\n", report.agents_dissolved));
    out.push_str(&format!(
        "  Invariant status: {} active, {} capacity remaining\n",
        report.invariant_status.active_agents, report.invariant_status.capacity_remaining
    ));
    out.push_str(&format!("  Explainability trace count: {}", report.trace_count));
    out
}
