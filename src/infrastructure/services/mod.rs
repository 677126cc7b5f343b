//! Infrastructure services

mod experiment;

pub use experiment::{Experiment, ThresholdKind};
