//! Read-only diagnostics. Nothing here mutates pipeline state; records are
//! taken by reference and copied where retained.

pub mod continuity;
pub mod counterfactual;
pub mod self_evaluation;

pub use continuity::{Continuity, ContinuityReport, CoherenceTrend};
pub use counterfactual::{Counterfactual, Counterfactuals, Scenario};
pub use self_evaluation::{Evaluation, EvaluationSummary, SelfEvaluation};
