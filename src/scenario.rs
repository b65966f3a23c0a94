//! Observation input for a run.
//!
//! A scenario file is either a bare JSON array of observations or an object
//! with an `observations` array. Unknown keys inside an observation are ignored.

use anyhow::{bail, Context, Result};
use continuum_core::Observation;
use serde::Deserialize;
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum ScenarioFile {
    List(Vec<Observation>),
    Wrapped { observations: Vec<Observation> },
}

/// The three-observation demonstration: a moderate start, a confident
/// recovery, then a noisy degradation.
pub fn default_observations() -> Vec<Observation> {
    vec![
        Observation::new()
            .with_confidence(0.45)
            .with_novelty(0.8)
            .with_complexity(0.7)
            .with_coherence(0.6),
        Observation::new()
            .with_confidence(0.85)
            .with_novelty(0.3)
            .with_complexity(0.4)
            .with_coherence(0.9),
        Observation::new()
            .with_confidence(0.3)
            .with_novelty(0.9)
            .with_complexity(0.85)
            .with_coherence(0.35),
    ]
}

pub fn parse_observations(content: &str) -> Result<Vec<Observation>> {
    let file: ScenarioFile =
        serde_json::from_str(content).context("expected a JSON array of observations")?;
    let observations = match file {
        ScenarioFile::List(list) => list,
        ScenarioFile::Wrapped { observations } => observations,
    };
    if observations.is_empty() {
        bail!("scenario contains no observations");
    }
    Ok(observations)
}

pub fn load_observations(path: &Path) -> Result<Vec<Observation>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_observations(&content).with_context(|| format!("invalid scenario {}", path.display()))
}
