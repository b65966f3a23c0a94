//! Knowledge: rolling memory, its lineage, and the feedback signal fed back
//! into the next cycle.

pub mod feedback;
pub mod lineage;
pub mod memory;

pub use feedback::{Feedback, FeedbackSignal};
pub use lineage::{Lineage, LineageEntry};
pub use memory::{Memory, MemorySnapshot, MemoryState};
