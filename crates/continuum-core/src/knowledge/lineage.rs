//! Lineage - one structural fingerprint of memory per update

use super::memory::MemoryState;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineageEntry {
    pub keys: Vec<String>,
    pub coherence: Option<f64>,
    pub uncertainty: Option<f64>,
    pub step: usize,
}

#[derive(Debug, Default)]
pub struct Lineage {
    chain: Vec<LineageEntry>,
}

impl Lineage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&mut self, memory: &MemoryState) -> LineageEntry {
        let entry = LineageEntry {
            keys: memory.keys(),
            coherence: memory.coherence,
            uncertainty: memory.uncertainty,
            step: self.chain.len(),
        };
        self.chain.push(entry.clone());
        entry
    }

    pub fn full_lineage(&self) -> &[LineageEntry] {
        &self.chain
    }

    pub fn coherence_history(&self) -> Vec<f64> {
        self.chain.iter().filter_map(|e| e.coherence).collect()
    }

    pub fn length(&self) -> usize {
        self.chain.len()
    }
}
