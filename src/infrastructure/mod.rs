//! Infrastructure layer - analysis primitives and orchestration

pub mod analysis;
pub mod services;

pub use services::{Experiment, ThresholdKind};
