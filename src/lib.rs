//! PMP Experiment Analysis
//!
//! An A/B test analysis engine with support for:
//! - Simple and derived (ratio) KPIs over an in-memory dataset
//! - Feature-filtered variant partitioning
//! - Fixed-horizon Welch t-tests with confidence intervals and post-hoc power
//! - Suite-level multiple-testing correction (Bonferroni, Benjamini-Hochberg)

pub mod domain;
pub mod infrastructure;

pub use domain::{
    AnalysisConfig, AnalysisError, Column, ConfidenceInterval, CorrectedTestResult,
    CorrectionMethod, DataFrame, DerivedKpi, ExperimentMetadata, FeatureFilter, FilterValue,
    GroupStatistics, Kpi, Metric, StatisticalTest, StatisticalTestResult, StatisticalTestSuite,
    SuiteResult, TestMethod, TestStatistics, TestValidationError, Variants, generate_random_data,
};
pub use infrastructure::{Experiment, ThresholdKind};
