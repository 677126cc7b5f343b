//! Statistical test result types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{CorrectionMethod, StatisticalTest, TestMethod};

// ============================================================================
// GroupStatistics
// ============================================================================

/// Summary of one arm's sample for one KPI
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupStatistics {
    /// Number of non-NaN observations
    pub sample_size: usize,
    /// Sample mean
    pub mean: f64,
    /// Sample variance (n-1 denominator)
    pub variance: f64,
}

impl GroupStatistics {
    /// Calculate group statistics from raw observations. NaN values are
    /// excluded from the count and the moments; mean and variance are NaN
    /// when too few observations remain to define them.
    pub fn from_values(values: &[f64]) -> Self {
        let observed: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        let sample_size = observed.len();

        if sample_size == 0 {
            return Self {
                sample_size: 0,
                mean: f64::NAN,
                variance: f64::NAN,
            };
        }

        let mean = observed.iter().sum::<f64>() / sample_size as f64;
        let variance = if sample_size < 2 {
            f64::NAN
        } else {
            observed.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (sample_size - 1) as f64
        };

        Self {
            sample_size,
            mean,
            variance,
        }
    }

    /// Sample standard deviation
    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }
}

// ============================================================================
// ConfidenceInterval
// ============================================================================

/// A two-sided confidence interval for the effect size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    /// Lower bound
    pub lower: f64,
    /// Upper bound
    pub upper: f64,
    /// Confidence level (e.g. 0.95 for 95%)
    pub confidence_level: f64,
}

impl ConfidenceInterval {
    /// Width of the interval
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Check whether the interval contains a value
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

// ============================================================================
// TestStatistics
// ============================================================================

/// Outcome of one hypothesis test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestStatistics {
    /// Control arm summary
    pub control_statistics: GroupStatistics,
    /// Treatment arm summary
    pub treatment_statistics: GroupStatistics,
    /// Difference in means, treatment minus control
    pub effect_size: f64,
    /// Two-sided p-value
    pub p_value: f64,
    /// Confidence interval for the effect size
    pub confidence_interval: ConfidenceInterval,
    /// Achieved power at the observed effect, sample sizes, and alpha
    pub statistical_power: f64,
    /// Whether the null hypothesis is rejected at the raw alpha
    pub stop_decision: bool,
}

// ============================================================================
// StatisticalTestResult
// ============================================================================

/// An analyzed statistical test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticalTestResult {
    /// The test definition that was analyzed
    pub test: StatisticalTest,
    /// The computed statistics
    pub result: TestStatistics,
    /// The procedure that produced the statistics
    pub test_method: TestMethod,
    /// When the analysis ran
    pub analyzed_at: DateTime<Utc>,
}

impl StatisticalTestResult {
    /// Create a new result stamped with the current time
    pub fn new(test: StatisticalTest, result: TestStatistics, test_method: TestMethod) -> Self {
        Self {
            test,
            result,
            test_method,
            analyzed_at: Utc::now(),
        }
    }
}

// ============================================================================
// CorrectedTestResult
// ============================================================================

/// A test result paired with its multiple-testing-corrected decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectedTestResult {
    /// The raw per-test result, unmodified
    pub test_result: StatisticalTestResult,
    /// Reject decision after correction
    pub corrected_stop_decision: bool,
    /// P-value adjusted for the number of tests in the suite
    pub adjusted_p_value: f64,
}

impl CorrectedTestResult {
    pub fn new(
        test_result: StatisticalTestResult,
        corrected_stop_decision: bool,
        adjusted_p_value: f64,
    ) -> Self {
        Self {
            test_result,
            corrected_stop_decision,
            adjusted_p_value,
        }
    }
}

// ============================================================================
// SuiteResult
// ============================================================================

/// Outcomes for an entire suite with correction applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteResult {
    /// Per-test results, in the suite's input order
    pub results: Vec<CorrectedTestResult>,
    /// The correction method that was applied
    pub correction_method: CorrectionMethod,
    /// The significance level shared by every test
    pub alpha: f64,
    /// When the analysis ran
    pub analyzed_at: DateTime<Utc>,
}

impl SuiteResult {
    /// Create a new suite result stamped with the current time
    pub fn new(
        results: Vec<CorrectedTestResult>,
        correction_method: CorrectionMethod,
        alpha: f64,
    ) -> Self {
        Self {
            results,
            correction_method,
            alpha,
            analyzed_at: Utc::now(),
        }
    }

    /// Number of analyzed tests
    pub fn size(&self) -> usize {
        self.results.len()
    }
}
