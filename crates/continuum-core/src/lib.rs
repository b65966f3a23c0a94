//! Continuum Core - awareness records, gates, knowledge and audit
//!
//! Everything in this crate is synchronous and free of I/O. The stages are
//! driven in order by the pipeline in `continuum-agent`:
//!
//! FieldGenerator → DriftReflector → StabilityRegulator → Invariants → Ethics
//! → (agent) → Explainability / SelfEvaluation / Counterfactual
//! → Feedback / Memory / Lineage → Continuity

pub mod audit;
pub mod awareness;
pub mod error;
pub mod governance;
pub mod knowledge;
pub mod types;

pub use audit::*;
pub use awareness::*;
pub use error::{EthicsViolation, GateError, InvariantViolation, Result};
pub use governance::*;
pub use knowledge::*;
pub use types::*;
