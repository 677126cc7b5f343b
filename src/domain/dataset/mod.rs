//! Dataset domain module
//!
//! This module provides the in-memory tabular dataset consumed by the
//! analysis engine: typed columns, equality filtering, and the experiment
//! metadata record, plus a deterministic simulated-data generator.

mod column;
mod fixtures;
mod frame;
mod metadata;

// Re-export all public types
pub use column::{Column, FilterValue};
pub use fixtures::generate_random_data;
pub use frame::DataFrame;
pub use metadata::ExperimentMetadata;
