//! Awareness stages: generation, drift reflection, stability regulation.
//!
//! Each stage annotates the record in place and hands it back, so the
//! pipeline threads one record through them in order.

pub mod dynamics;
pub mod field;
pub mod recursion;

pub use dynamics::StabilityRegulator;
pub use field::FieldGenerator;
pub use recursion::DriftReflector;
