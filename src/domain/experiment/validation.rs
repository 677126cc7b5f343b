//! Statistical test validation utilities

use thiserror::Error;

use crate::domain::error::AnalysisError;

/// Validation errors for statistical tests and suites
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TestValidationError {
    #[error("KPI name cannot be empty")]
    EmptyKpiName,

    #[error("KPI name cannot start or end with whitespace")]
    KpiNameSurroundingWhitespace,

    #[error("Column name cannot be empty")]
    EmptyColumnName,

    #[error("Column name cannot start or end with whitespace")]
    ColumnNameSurroundingWhitespace,

    #[error("Variant name cannot be empty")]
    EmptyVariantName,

    #[error("Variant name cannot start or end with whitespace")]
    VariantNameSurroundingWhitespace,

    #[error("Control and treatment variants must differ, got '{0}' for both")]
    IdenticalVariants(String),

    #[error("Derived KPI '{0}' cannot be named after one of its source columns")]
    DerivedNameCollision(String),

    #[error("Unknown correction method: '{0}'")]
    UnknownCorrectionMethod(String),

    #[error("Unknown test method: '{0}'")]
    UnknownTestMethod(String),

    #[error("Test suite must contain at least one test")]
    EmptySuite,

    #[error("Significance level alpha must lie in (0, 1), got {0}")]
    InvalidAlpha(f64),
}

impl From<TestValidationError> for AnalysisError {
    fn from(err: TestValidationError) -> Self {
        AnalysisError::invalid_configuration(err.to_string())
    }
}

/// Validate a KPI name
pub fn validate_kpi_name(name: &str) -> Result<(), TestValidationError> {
    if name.is_empty() {
        return Err(TestValidationError::EmptyKpiName);
    }

    if name.trim() != name {
        return Err(TestValidationError::KpiNameSurroundingWhitespace);
    }

    Ok(())
}

/// Validate a dataset column name
pub fn validate_column_name(name: &str) -> Result<(), TestValidationError> {
    if name.is_empty() {
        return Err(TestValidationError::EmptyColumnName);
    }

    if name.trim() != name {
        return Err(TestValidationError::ColumnNameSurroundingWhitespace);
    }

    Ok(())
}

/// Validate a variant name
pub fn validate_variant_name(name: &str) -> Result<(), TestValidationError> {
    if name.is_empty() {
        return Err(TestValidationError::EmptyVariantName);
    }

    if name.trim() != name {
        return Err(TestValidationError::VariantNameSurroundingWhitespace);
    }

    Ok(())
}

/// Validate a significance level
pub fn validate_alpha(alpha: f64) -> Result<(), TestValidationError> {
    if !alpha.is_finite() || alpha <= 0.0 || alpha >= 1.0 {
        return Err(TestValidationError::InvalidAlpha(alpha));
    }

    Ok(())
}
