//! Statistical test domain module
//!
//! This module provides the entities describing A/B tests (KPIs, feature
//! filters, variant definitions, suites), the analysis configuration, and
//! the result types they produce.

mod config;
mod entity;
mod result;
mod validation;

// Re-export all public types
pub use config::AnalysisConfig;
pub use entity::{
    CorrectionMethod, DerivedKpi, FeatureFilter, Kpi, Metric, StatisticalTest,
    StatisticalTestSuite, TestMethod, Variants,
};
pub use result::{
    ConfidenceInterval, CorrectedTestResult, GroupStatistics, StatisticalTestResult, SuiteResult,
    TestStatistics,
};
pub use validation::{
    TestValidationError, validate_alpha, validate_column_name, validate_kpi_name,
    validate_variant_name,
};
