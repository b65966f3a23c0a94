//! Continuum - governed awareness pipeline runner
//!
//! Shared between the `continuum` binary and the integration tests.

pub mod render;
pub mod scenario;

pub use scenario::{default_observations, load_observations, parse_observations};
