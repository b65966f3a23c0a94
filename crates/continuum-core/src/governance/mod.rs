//! Governance: hard invariants, ethics screening, decision trace.

pub mod ethics;
pub mod explainability;
pub mod invariants;

pub use ethics::{Ethics, FORBIDDEN_ACTIONS};
pub use explainability::{Explainability, TraceEntry};
pub use invariants::{InvariantStatus, Invariants};
