//! Domain layer: entities, value objects, and domain errors.

pub mod dataset;
pub mod error;
pub mod experiment;

pub use dataset::{Column, DataFrame, ExperimentMetadata, FilterValue, generate_random_data};
pub use error::AnalysisError;
pub use experiment::{
    AnalysisConfig, ConfidenceInterval, CorrectedTestResult, CorrectionMethod, DerivedKpi,
    FeatureFilter, GroupStatistics, Kpi, Metric, StatisticalTest, StatisticalTestResult,
    StatisticalTestSuite, SuiteResult, TestMethod, TestStatistics, TestValidationError, Variants,
};
