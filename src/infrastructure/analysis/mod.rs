//! Statistical analysis primitives
//!
//! Pure computation: partitioning, the fixed-horizon test, post-hoc power,
//! and multiple-testing correction. Nothing here logs or mutates a dataset.

mod correction;
mod partition;
mod power;
mod statistical;

pub use correction::{Correction, correct};
pub use partition::{apply_filters, partition};
pub use power::{pooled_std, statistical_power};
pub use statistical::fixed_horizon_test;
