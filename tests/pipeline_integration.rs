//! Integration tests: scenario files driven through the full pipeline and
//! rendered the way the `continuum` binary prints them.

use continuum::render::{self, CycleOutcome, RunDocument};
use continuum::{default_observations, load_observations};
use continuum_agent::{ContinuumConfig, Pipeline};
use continuum_core::{CoherenceTrend, Invariants, Observation};
use std::sync::Arc;

async fn run_all(pipeline: &mut Pipeline, observations: &[Observation]) -> Vec<CycleOutcome> {
    let mut outcomes = Vec::new();
    for (index, obs) in observations.iter().enumerate() {
        outcomes.push(match pipeline.run_cycle(obs).await {
            Ok(report) => CycleOutcome::Accepted(Box::new(report)),
            Err(e) => CycleOutcome::rejected(index + 1, &e),
        });
    }
    outcomes
}

// ===========================================================================
// Default scenario
// ===========================================================================

#[tokio::test]
async fn default_scenario_runs_clean() {
    let mut pipeline = Pipeline::from_config(&ContinuumConfig::default());
    let outcomes = run_all(&mut pipeline, &default_observations()).await;

    assert!(outcomes.iter().all(|o| matches!(o, CycleOutcome::Accepted(_))));
    let report = pipeline.report();
    assert_eq!(report.cycles, 3);
    assert_eq!(report.agents_spawned, report.agents_dissolved);
    assert_eq!(report.invariant_status.active_agents, 0);
    assert_eq!(report.invariant_status.capacity_remaining, Invariants::MAX_AGENTS);
    assert_eq!(report.continuity.coherence_trend, CoherenceTrend::Degrading);
}

#[tokio::test]
async fn default_scenario_renders_text() {
    let mut pipeline = Pipeline::default();
    let outcomes = run_all(&mut pipeline, &default_observations()).await;

    let first = render::outcome(&outcomes[0]);
    assert!(first.contains("--- Cycle 1 ---"));
    assert!(first.contains("Coherence: 0.6"));
    assert!(first.contains("risk: 0.2200"));
    assert!(first.contains("higher_coherence, lower_uncertainty, coherence_collapse"));
    assert!(!first.contains("Agent response"));

    let summary = render::summary(&pipeline.report());
    assert!(summary.contains("Total cycles: 3"));
    assert!(summary.contains("Coherence lineage: [0.6, 0.9, 0.35]"));
    assert!(summary.contains("Agents dissolved: 3"));
    assert!(summary.contains("trend degrading"));
}

// ===========================================================================
// Scenario files
// ===========================================================================

#[tokio::test]
async fn rejected_observation_does_not_stop_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scenario.json");
    std::fs::write(
        &path,
        r#"[
            {"confidence": 0.9, "coherence": 0.8},
            {"confidence": 0.05, "coherence": 0.8},
            {"confidence": 0.9, "coherence": 0.75}
        ]"#,
    )
    .unwrap();

    let observations = load_observations(&path).unwrap();
    let mut pipeline = Pipeline::default();
    let outcomes = run_all(&mut pipeline, &observations).await;

    match &outcomes[1] {
        CycleOutcome::Rejected { observation, code, .. } => {
            assert_eq!(*observation, 2);
            assert_eq!(code, "uncertainty_exceeded");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
    match &outcomes[2] {
        CycleOutcome::Accepted(report) => assert_eq!(report.cycle, 2),
        other => panic!("expected acceptance, got {other:?}"),
    }
    assert!(render::outcome(&outcomes[1]).contains("Observation 2 rejected"));
    assert_eq!(pipeline.report().cycles, 2);
}

#[test]
fn missing_scenario_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_observations(&dir.path().join("absent.json")).unwrap_err();
    assert!(err.to_string().contains("failed to read"));
}

// ===========================================================================
// JSON document
// ===========================================================================

#[tokio::test]
async fn run_document_serializes_outcomes() {
    let mut pipeline = Pipeline::default();
    let observations = vec![
        Observation::new().with_confidence(0.9).with_coherence(0.8),
        Observation::new().with_coherence(0.05),
    ];
    let cycles = run_all(&mut pipeline, &observations).await;
    let document = RunDocument {
        cycles,
        report: pipeline.report(),
    };

    let json = serde_json::to_value(&document).unwrap();
    assert_eq!(json["cycles"][0]["status"], "accepted");
    assert_eq!(json["cycles"][0]["cycle"], 1);
    assert_eq!(json["cycles"][1]["status"], "rejected");
    assert_eq!(json["cycles"][1]["code"], "coherence_collapsed");
    assert_eq!(json["report"]["cycles"], 1);
    assert_eq!(json["report"]["continuity"]["coherence_trend"], "insufficient_data");
}

// ===========================================================================
// Shared population
// ===========================================================================

#[tokio::test]
async fn pipelines_share_one_population_cap() {
    let invariants = Arc::new(Invariants::new());
    let mut a = Pipeline::default().with_invariants(invariants.clone());
    let mut b = Pipeline::default().with_invariants(invariants.clone());

    let obs = default_observations();
    run_all(&mut a, &obs).await;
    run_all(&mut b, &obs).await;

    assert_eq!(invariants.active_agents(), 0);
    assert_eq!(a.report().agents_spawned + b.report().agents_spawned, 6);
}
